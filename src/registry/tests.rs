//! Registry Module Tests
//!
//! Validates get-or-create semantics, metadata reporting and snapshots.

#[cfg(test)]
mod tests {
    use crate::error::GridError;
    use crate::record::{Entity, Organization, Person, Value};
    use crate::registry::{CacheConfig, CacheRegistry, RegistrySnapshot};
    use crate::storage::CacheMode;

    fn person_config() -> CacheConfig {
        CacheConfig::for_entity::<Person>("Persons")
            .mode(CacheMode::Partitioned)
            .backups(1)
            .index(Person::ORG_ID)
    }

    // ============================================================
    // GET-OR-CREATE
    // ============================================================

    #[test]
    fn test_get_or_create_twice_returns_same_store() {
        // ARRANGE
        let registry = CacheRegistry::new();
        let first = registry.get_or_create(person_config()).unwrap();
        let second = registry.get_or_create(person_config()).unwrap();

        // ACT: write through one handle
        let alice = Person::new(10, "Alice", 1);
        first.put(alice.key(), alice.to_record()).unwrap();

        // ASSERT: visible through the other
        assert_eq!(second.get(&Value::Int(10)), Some(alice.to_record()));
        assert_eq!(registry.cache_count(), 1);
    }

    #[test]
    fn test_get_or_create_with_other_kind_fails() {
        let registry = CacheRegistry::new();
        registry.get_or_create(person_config()).unwrap();

        let result = registry.get_or_create(CacheConfig::for_entity::<Organization>("Persons"));

        assert!(matches!(result, Err(GridError::TypeMismatch { .. })));
    }

    #[test]
    fn test_duplicate_index_in_config_fails() {
        let registry = CacheRegistry::new();
        let config = person_config().index(Person::ORG_ID);

        let result = registry.get_or_create(config);

        assert!(matches!(result, Err(GridError::DuplicateIndex { .. })));
        assert!(!registry.has_cache("Persons"));
    }

    #[test]
    fn test_unknown_cache() {
        let registry = CacheRegistry::new();
        assert_eq!(
            registry.cache("Nope").err(),
            Some(GridError::UnknownCache("Nope".to_string()))
        );
    }

    #[test]
    fn test_typed_handles_share_data() {
        let registry = CacheRegistry::new();
        let orgs = registry
            .get_or_create_typed::<Organization>(CacheConfig::for_entity::<Organization>("Orgs"))
            .unwrap();

        orgs.put(&Organization::new(1, "Microsoft")).unwrap();

        let again = registry.typed::<Organization>("Orgs").unwrap();
        assert_eq!(again.get(1_i64).unwrap(), Some(Organization::new(1, "Microsoft")));
        assert!(registry.typed::<Person>("Orgs").is_err());
    }

    // ============================================================
    // METADATA
    // ============================================================

    #[test]
    fn test_info_reports_mode_and_indexes() {
        let registry = CacheRegistry::new();
        let store = registry.get_or_create(person_config()).unwrap();
        let bob = Person::new(11, "Bob", 2);
        store.put(bob.key(), bob.to_record()).unwrap();

        let info = registry.info("Persons").unwrap();

        assert_eq!(info.kind, "Person");
        assert_eq!(info.mode, CacheMode::Partitioned);
        assert_eq!(info.backups, 1);
        assert_eq!(info.size, 1);
        assert_eq!(info.indexes, vec!["orgId".to_string()]);
        assert_eq!(info.partitions, 1);
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let registry = CacheRegistry::new();
        registry.get_or_create(person_config()).unwrap();
        registry
            .get_or_create(CacheConfig::for_entity::<Organization>("Organizations"))
            .unwrap();

        let names: Vec<String> = registry.list().into_iter().map(|i| i.name).collect();

        assert_eq!(names, vec!["Organizations".to_string(), "Persons".to_string()]);
    }

    #[test]
    fn test_owners_single_local_node() {
        let registry = CacheRegistry::new();
        registry.get_or_create(person_config()).unwrap();

        let owners = registry.owners("Persons", &Value::Int(10)).unwrap();

        assert_eq!(owners, vec![registry.node_id().clone()]);
    }

    // ============================================================
    // SNAPSHOTS
    // ============================================================

    #[test]
    fn test_write_snapshot_to_file() {
        let registry = CacheRegistry::new();
        let orgs = registry
            .get_or_create_typed::<Organization>(
                CacheConfig::for_entity::<Organization>("Orgs").mode(CacheMode::Replicated),
            )
            .unwrap();
        orgs.put(&Organization::new(1, "Microsoft")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        registry.write_snapshot(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let snapshot: RegistrySnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(snapshot.caches.len(), 1);
        assert_eq!(snapshot.caches[0].records.len(), 1);
        assert!(text.contains("\"REPLICATED\""));
    }
}

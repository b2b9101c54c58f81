//! Index Module Tests
//!
//! Validates index declaration rules and incremental maintenance, independent of any store.

#[cfg(test)]
mod tests {
    use crate::error::GridError;
    use crate::index::{EqualityIndex, IndexManager};
    use crate::record::{Entity, Person, Record, Value};

    fn person_manager() -> IndexManager {
        let mut manager = IndexManager::new("Persons", Person::kind());
        manager
            .declare(Person::ORG_ID, std::iter::empty::<(&Value, &Record)>())
            .unwrap();
        manager
    }

    // ============================================================
    // EQUALITY INDEX
    // ============================================================

    #[test]
    fn test_equality_index_drops_empty_sets() {
        let mut index = EqualityIndex::new("orgId");
        index.insert(Value::Int(1), Value::Int(10));

        index.remove(&Value::Int(1), &Value::Int(10));

        assert!(index.get(&Value::Int(1)).is_none());
        assert_eq!(index.distinct_values(), 0);
    }

    #[test]
    fn test_equality_index_keeps_insertion_order() {
        let mut index = EqualityIndex::new("orgId");
        for key in [12, 10, 11] {
            index.insert(Value::Int(1), Value::Int(key));
        }

        let keys: Vec<i64> = index
            .get(&Value::Int(1))
            .unwrap()
            .iter()
            .filter_map(Value::as_int)
            .collect();

        assert_eq!(keys, vec![12, 10, 11]);
    }

    // ============================================================
    // DECLARATION
    // ============================================================

    #[test]
    fn test_declare_twice_is_duplicate_index() {
        let mut manager = person_manager();

        let result = manager.declare(Person::ORG_ID, std::iter::empty::<(&Value, &Record)>());

        assert_eq!(
            result,
            Err(GridError::DuplicateIndex {
                cache: "Persons".to_string(),
                field: "orgId".to_string(),
            })
        );
    }

    #[test]
    fn test_declare_unknown_field() {
        let mut manager = IndexManager::new("Persons", Person::kind());

        let result = manager.declare("salary", std::iter::empty::<(&Value, &Record)>());

        assert!(matches!(result, Err(GridError::UnknownField { .. })));
        assert!(manager.indexed_fields().is_empty());
    }

    #[test]
    fn test_declare_backfills_existing_records() {
        let alice = Person::new(10, "Alice", 1);
        let bob = Person::new(11, "Bob", 2);
        let rows = vec![
            (alice.key(), alice.to_record()),
            (bob.key(), bob.to_record()),
        ];
        let mut manager = IndexManager::new("Persons", Person::kind());

        manager
            .declare(Person::ORG_ID, rows.iter().map(|(k, r)| (k, r)))
            .unwrap();

        let keys = manager.lookup(Person::ORG_ID, &Value::Int(2)).unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys.contains(&Value::Int(11)));
    }

    // ============================================================
    // MAINTENANCE
    // ============================================================

    #[test]
    fn test_on_write_moves_key_between_values() {
        let mut manager = person_manager();
        let before = Person::new(10, "Alice", 1).to_record();
        let after = Person::new(10, "Alice", 2).to_record();
        let key = Value::Int(10);

        manager.on_write(&key, None, &before);
        manager.on_write(&key, Some(&before), &after);

        assert!(manager.lookup(Person::ORG_ID, &Value::Int(1)).unwrap().is_empty());
        assert!(manager.lookup(Person::ORG_ID, &Value::Int(2)).unwrap().contains(&key));
        assert_eq!(manager.index_size(Person::ORG_ID), Some(1));
    }

    #[test]
    fn test_on_delete_removes_all_references() {
        let mut manager = person_manager();
        let record = Person::new(10, "Alice", 1).to_record();
        let key = Value::Int(10);
        manager.on_write(&key, None, &record);

        manager.on_delete(&key, &record);

        assert!(!manager.references(&key));
    }

    #[test]
    fn test_lookup_unindexed_field_is_none() {
        let manager = person_manager();
        assert!(manager.lookup("name", &Value::from("Alice")).is_none());
    }
}

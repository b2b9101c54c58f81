//! The organization/person directory: cache declarations and the one exposed query.

use super::engine::execute;
use super::types::JoinQuery;
use crate::error::GridResult;
use crate::record::{Organization, Person};
use crate::registry::{CacheConfig, CacheRegistry};
use crate::storage::{CacheMode, TypedCache};

pub const ORG_CACHE: &str = "GridJoinOrganizations";
pub const PERSON_CACHE: &str = "GridJoinPersons";

/// Declares the organization cache (replicated, no backups) and the person cache
/// (partitioned, one backup, indexed on `orgId`).
pub fn create_caches(
    registry: &CacheRegistry,
) -> GridResult<(TypedCache<Organization>, TypedCache<Person>)> {
    let organizations = registry.get_or_create_typed::<Organization>(
        CacheConfig::for_entity::<Organization>(ORG_CACHE)
            .mode(CacheMode::Replicated)
            .backups(0)
            .index("name"),
    )?;
    let persons = registry.get_or_create_typed::<Person>(
        CacheConfig::for_entity::<Person>(PERSON_CACHE)
            .mode(CacheMode::Partitioned)
            .backups(1)
            .index(Person::ORG_ID),
    )?;
    Ok((organizations, persons))
}

pub fn employees_query(organization: &str, ignore_case: bool) -> JoinQuery {
    JoinQuery::new(PERSON_CACHE, ORG_CACHE, Person::ORG_ID)
        .filter("name", organization)
        .select("name")
        .ignore_case(ignore_case)
}

/// Names of every person whose organization is named `organization`.
///
/// Exact, case-sensitive match unless `ignore_case` is set. Order follows the
/// organization index and then the person index; callers needing a fixed order sort.
pub fn employees_of(
    registry: &CacheRegistry,
    organization: &str,
    ignore_case: bool,
) -> GridResult<Vec<String>> {
    let cursor = execute(registry, &employees_query(organization, ignore_case))?;
    cursor
        .map(|row| {
            let row = row?;
            Ok(row.get(0).map(ToString::to_string).unwrap_or_default())
        })
        .collect()
}

use super::employees::employees_of;
use crate::error::GridError;
use crate::record::{FieldType, Record, Value};
use crate::registry::{CacheInfo, CacheRegistry};

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const ENDPOINT_CACHES: &str = "/caches";
pub const ENDPOINT_RECORD: &str = "/cache/:name/:key";
pub const ENDPOINT_EMPLOYEES: &str = "/query/employees";

#[derive(Debug, Deserialize)]
pub struct EmployeesParams {
    pub org: String,
    pub ignore_case: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeesResponse {
    pub organization: String,
    pub count: usize,
    pub names: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResponse {
    pub record: Option<Record>,
    pub error: Option<String>,
}

pub async fn handle_list_caches(
    Extension(registry): Extension<Arc<CacheRegistry>>,
) -> Json<Vec<CacheInfo>> {
    Json(registry.list())
}

pub async fn handle_get_record(
    Extension(registry): Extension<Arc<CacheRegistry>>,
    Path((name, key)): Path<(String, String)>,
) -> (StatusCode, Json<RecordResponse>) {
    let store = match registry.cache(&name) {
        Ok(store) => store,
        Err(e) => return error_response(StatusCode::NOT_FOUND, e.to_string()),
    };

    let key = match store.kind().key_type() {
        FieldType::Text => Value::Text(key),
        FieldType::Int => match key.parse::<i64>() {
            Ok(k) => Value::Int(k),
            Err(e) => {
                tracing::error!("Failed to parse key '{}' for {}: {}", key, name, e);
                return error_response(StatusCode::BAD_REQUEST, e.to_string());
            }
        },
    };

    match store.get(&key) {
        Some(record) => (
            StatusCode::OK,
            Json(RecordResponse {
                record: Some(record),
                error: None,
            }),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(RecordResponse {
                record: None,
                error: None,
            }),
        ),
    }
}

pub async fn handle_employees(
    Extension(registry): Extension<Arc<CacheRegistry>>,
    Query(params): Query<EmployeesParams>,
) -> (StatusCode, Json<EmployeesResponse>) {
    let ignore_case = params.ignore_case.unwrap_or(false);

    match employees_of(&registry, &params.org, ignore_case) {
        Ok(names) => (
            StatusCode::OK,
            Json(EmployeesResponse {
                organization: params.org,
                count: names.len(),
                names,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!("Employees query for '{}' failed: {}", params.org, e);
            let status = match &e {
                GridError::UnknownCache(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(EmployeesResponse {
                    organization: params.org,
                    count: 0,
                    names: Vec::new(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

fn error_response(status: StatusCode, error: String) -> (StatusCode, Json<RecordResponse>) {
    (
        status,
        Json(RecordResponse {
            record: None,
            error: Some(error),
        }),
    )
}

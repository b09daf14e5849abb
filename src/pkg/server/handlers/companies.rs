use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use standard_error::{Interpolate, StandardError, Status};
use validator::Validate;

use crate::{
    pkg::{
        internal::adaptors::companies::{
            mutators::CompanyMutator,
            selectors::CompanySelector,
            spec::{CompanyCriteria, CompanyWithJobs},
        },
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCompanyInput {
    #[validate(length(min = 1, max = 25, message = "Field must be 1-25 characters"))]
    pub handle: String,
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchCompanyInput {
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCompanyInput>,
) -> Result<(StatusCode, Json<Value>)> {
    input.validate().map_err(|e| {
        StandardError::new("ERR-VALIDATION-001")
            .interpolate_err(e.to_string())
            .code(StatusCode::BAD_REQUEST)
    })?;
    let mut conn = state.db_pool.acquire().await?;
    let company = CompanyMutator::new(&mut conn).create(input).await?;
    tracing::info!("created company {}", &company.handle);
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

pub async fn list(
    State(state): State<AppState>,
    Query(criteria): Query<CompanyCriteria>,
) -> Result<Json<Value>> {
    if let (Some(min), Some(max)) = (criteria.min_employees, criteria.max_employees) {
        if min > max {
            return Err(StandardError::new("ERR-FILTER-001").code(StatusCode::BAD_REQUEST));
        }
    }
    let mut conn = state.db_pool.acquire().await?;
    let companies = CompanySelector::new(&mut conn).get_all(&criteria).await?;
    Ok(Json(json!({ "companies": companies })))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Value>> {
    let mut conn = state.db_pool.acquire().await?;
    let mut selector = CompanySelector::new(&mut conn);
    let company = selector.get_by_handle(&handle).await?;
    let jobs = selector.get_jobs(&handle).await?;
    Ok(Json(json!({ "company": CompanyWithJobs::new(company, jobs) })))
}

pub async fn update(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Json(input): Json<PatchCompanyInput>,
) -> Result<Json<Value>> {
    input.validate().map_err(|e| {
        StandardError::new("ERR-VALIDATION-001")
            .interpolate_err(e.to_string())
            .code(StatusCode::BAD_REQUEST)
    })?;
    let mut conn = state.db_pool.acquire().await?;
    let company = CompanyMutator::new(&mut conn).update(&handle, input).await?;
    Ok(Json(json!({ "company": company })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Value>> {
    let mut conn = state.db_pool.acquire().await?;
    CompanyMutator::new(&mut conn).delete(&handle).await?;
    tracing::info!("deleted company {}", &handle);
    Ok(Json(json!({ "deleted": handle })))
}

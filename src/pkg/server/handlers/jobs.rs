use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::types::BigDecimal;
use standard_error::{Interpolate, StandardError, Status};
use validator::Validate;

use crate::{
    pkg::{
        internal::adaptors::jobs::{
            mutators::JobMutator,
            selectors::JobSelector,
            spec::JobCriteria,
        },
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateJobInput {
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub title: String,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub company_handle: String,
}

// id and company_handle deliberately have no field here; deny_unknown_fields
// keeps them out of the update path
#[derive(Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PatchJobInput {
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
}

fn check_equity(equity: &Option<BigDecimal>) -> Result<()> {
    if let Some(equity) = equity {
        if *equity > BigDecimal::from(1) {
            return Err(StandardError::new("ERR-VALIDATION-001")
                .interpolate_err("equity cannot exceed 1.0".to_string())
                .code(StatusCode::BAD_REQUEST));
        }
    }
    Ok(())
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateJobInput>,
) -> Result<(StatusCode, Json<Value>)> {
    input.validate().map_err(|e| {
        StandardError::new("ERR-VALIDATION-001")
            .interpolate_err(e.to_string())
            .code(StatusCode::BAD_REQUEST)
    })?;
    check_equity(&input.equity)?;
    let mut conn = state.db_pool.acquire().await?;
    let job = JobMutator::new(&mut conn).create(input).await?;
    tracing::info!("created job {} at {}", job.id, &job.company_handle);
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

pub async fn list(
    State(state): State<AppState>,
    Query(criteria): Query<JobCriteria>,
) -> Result<Json<Value>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn).get_all(&criteria).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let mut conn = state.db_pool.acquire().await?;
    let job = JobSelector::new(&mut conn).get_by_id(id).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<PatchJobInput>,
) -> Result<Json<Value>> {
    input.validate().map_err(|e| {
        StandardError::new("ERR-VALIDATION-001")
            .interpolate_err(e.to_string())
            .code(StatusCode::BAD_REQUEST)
    })?;
    check_equity(&input.equity)?;
    let mut conn = state.db_pool.acquire().await?;
    let job = JobMutator::new(&mut conn).update(id, input).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let mut conn = state.db_pool.acquire().await?;
    JobMutator::new(&mut conn).delete(id).await?;
    tracing::info!("deleted job {}", id);
    Ok(Json(json!({ "deleted": id.to_string() })))
}

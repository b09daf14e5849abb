use axum::http::StatusCode;
use sqlx::{PgConnection, QueryBuilder};
use standard_error::{Interpolate, StandardError, Status};

use crate::{
    pkg::internal::adaptors::{
        companies::spec::{CompanyCriteria, CompanyEntry},
        jobs::spec::JobEntry,
    },
    prelude::Result,
};

pub struct CompanySelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> CompanySelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        CompanySelector { pool }
    }

    pub async fn get_by_handle(&mut self, handle: &str) -> Result<CompanyEntry> {
        let row = sqlx::query_as::<_, CompanyEntry>(
            "SELECT handle, name, description, num_employees, logo_url
             FROM companies WHERE handle = $1",
        )
        .bind(handle)
        .fetch_optional(&mut *self.pool)
        .await?;
        match row {
            Some(company) => Ok(company),
            None => Err(StandardError::new("ERR-COMPANY-002")
                .interpolate_err(handle.to_string())
                .code(StatusCode::NOT_FOUND)),
        }
    }

    /// Each present criterion adds one conjunctive predicate, bound in
    /// encounter order; hasEquity-style literals don't apply here. Results
    /// always come back sorted by name.
    pub async fn get_all(&mut self, criteria: &CompanyCriteria) -> Result<Vec<CompanyEntry>> {
        let mut qb = QueryBuilder::new(
            "SELECT handle, name, description, num_employees, logo_url FROM companies",
        );
        let mut sep = " WHERE ";
        if let Some(min) = criteria.min_employees {
            qb.push(sep).push("num_employees >= ").push_bind(min);
            sep = " AND ";
        }
        if let Some(max) = criteria.max_employees {
            qb.push(sep).push("num_employees <= ").push_bind(max);
            sep = " AND ";
        }
        if let Some(name) = &criteria.name {
            qb.push(sep).push("name ILIKE ").push_bind(format!("%{}%", name));
        }
        qb.push(" ORDER BY name");

        let rows = qb
            .build_query_as::<CompanyEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_jobs(&mut self, handle: &str) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, salary, equity, company_handle
             FROM jobs WHERE company_handle = $1",
        )
        .bind(handle)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}

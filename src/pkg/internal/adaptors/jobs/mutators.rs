use axum::http::StatusCode;
use sqlx::PgConnection;
use standard_error::{Interpolate, StandardError, Status};

use crate::{
    pkg::{
        internal::adaptors::{
            jobs::spec::JobEntry,
            update::{partial_update, SqlValue},
        },
        server::handlers::jobs::{CreateJobInput, PatchJobInput},
    },
    prelude::Result,
};

const COL_NAMES: &[(&str, &str)] = &[
    ("title", "title"),
    ("salary", "salary"),
    ("equity", "equity"),
];

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    /// Same title at the same company counts as a duplicate. As with
    /// companies, the unique constraint is the backstop when two creates
    /// race past the pre-check.
    pub async fn create(&mut self, job: CreateJobInput) -> Result<JobEntry> {
        let existing = sqlx::query_scalar::<_, String>(
            "SELECT title FROM jobs WHERE (title, company_handle) = ($1, $2)",
        )
        .bind(&job.title)
        .bind(&job.company_handle)
        .fetch_optional(&mut *self.pool)
        .await?;
        if existing.is_some() {
            return Err(StandardError::new("ERR-JOB-001")
                .interpolate_err(job.title)
                .code(StatusCode::BAD_REQUEST));
        }

        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, salary, equity, company_handle
            "#,
        )
        .bind(&job.title)
        .bind(job.salary)
        .bind(&job.equity)
        .bind(&job.company_handle)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: i32, data: PatchJobInput) -> Result<JobEntry> {
        let mut fields: Vec<(&str, SqlValue)> = Vec::new();
        if let Some(title) = data.title {
            fields.push(("title", SqlValue::Text(title)));
        }
        if let Some(salary) = data.salary {
            fields.push(("salary", SqlValue::Int(salary)));
        }
        if let Some(equity) = data.equity {
            fields.push(("equity", SqlValue::Decimal(equity)));
        }
        let clause = partial_update(fields, COL_NAMES)?;

        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} \
             RETURNING id, title, salary, equity, company_handle",
            clause.cols,
            clause.values.len() + 1
        );
        let mut query = sqlx::query_as::<_, JobEntry>(&sql);
        for value in clause.values {
            query = match value {
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Decimal(v) => query.bind(v),
            };
        }
        match query.bind(id).fetch_optional(&mut *self.pool).await? {
            Some(row) => Ok(row),
            None => Err(StandardError::new("ERR-JOB-002")
                .interpolate_err(id.to_string())
                .code(StatusCode::NOT_FOUND)),
        }
    }

    pub async fn delete(&mut self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StandardError::new("ERR-JOB-002")
                .interpolate_err(id.to_string())
                .code(StatusCode::NOT_FOUND));
        }
        Ok(())
    }
}

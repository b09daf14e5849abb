use axum::http::StatusCode;
use sqlx::{PgConnection, QueryBuilder};
use standard_error::{Interpolate, StandardError, Status};

use crate::{
    pkg::internal::adaptors::jobs::spec::{JobCriteria, JobEntry},
    prelude::Result,
};

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        match row {
            Some(job) => Ok(job),
            None => Err(StandardError::new("ERR-JOB-002")
                .interpolate_err(id.to_string())
                .code(StatusCode::NOT_FOUND)),
        }
    }

    /// minSalary and title bind in that order; hasEquity contributes a
    /// literal predicate with no parameter when true and nothing otherwise.
    pub async fn get_all(&mut self, criteria: &JobCriteria) -> Result<Vec<JobEntry>> {
        let mut qb =
            QueryBuilder::new("SELECT id, title, salary, equity, company_handle FROM jobs");
        let mut sep = " WHERE ";
        if let Some(min) = criteria.min_salary {
            qb.push(sep).push("salary >= ").push_bind(min);
            sep = " AND ";
        }
        if let Some(title) = &criteria.title {
            qb.push(sep).push("title ILIKE ").push_bind(format!("%{}%", title));
            sep = " AND ";
        }
        if criteria.has_equity.unwrap_or(false) {
            qb.push(sep).push("equity > 0");
        }
        qb.push(" ORDER BY title");

        let rows = qb
            .build_query_as::<JobEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::{
        pkg::{
            internal::adaptors::{
                companies::mutators::CompanyMutator,
                jobs::mutators::JobMutator,
            },
            server::{
                handlers::{companies::CreateCompanyInput, jobs::CreateJobInput},
                state::AppState,
            },
        },
        prelude::Result,
    };

    fn tag() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    async fn seed_company(conn: &mut PgConnection, t: &str) -> Result<String> {
        let company = CompanyMutator::new(conn)
            .create(CreateCompanyInput {
                handle: format!("co-{t}"),
                name: format!("{t} widgets"),
                description: "makes widgets".to_string(),
                num_employees: Some(10),
                logo_url: None,
            })
            .await?;
        Ok(company.handle)
    }

    async fn seed_job(
        conn: &mut PgConnection,
        handle: &str,
        title: &str,
        salary: i32,
        equity: &str,
    ) -> Result<JobEntry> {
        JobMutator::new(conn)
            .create(CreateJobInput {
                title: title.to_string(),
                salary: Some(salary),
                equity: Some(equity.parse().unwrap()),
                company_handle: handle.to_string(),
            })
            .await
    }

    #[tokio::test]
    #[traced_test]
    async fn test_filter_composition_is_conjunctive() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        let t = tag();
        let handle = seed_company(&mut conn, &t).await?;
        seed_job(&mut conn, &handle, &format!("{t}-j1"), 20000, "1").await?;
        seed_job(&mut conn, &handle, &format!("{t}-j2"), 40000, "0").await?;
        seed_job(&mut conn, &handle, &format!("{t}-j3"), 60000, "0.1").await?;

        let mut selector = JobSelector::new(&mut conn);

        // minSalary and hasEquity both have to hold
        let filtered = selector
            .get_all(&JobCriteria {
                min_salary: Some(30000),
                title: Some(t.clone()),
                has_equity: Some(true),
            })
            .await?;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, format!("{t}-j3"));

        // hasEquity false adds no predicate
        let unrestricted = selector
            .get_all(&JobCriteria {
                min_salary: None,
                title: Some(t.clone()),
                has_equity: Some(false),
            })
            .await?;
        let titles: Vec<String> = unrestricted.iter().map(|j| j.title.clone()).collect();
        assert_eq!(
            titles,
            vec![format!("{t}-j1"), format!("{t}-j2"), format!("{t}-j3")]
        );

        CompanyMutator::new(&mut conn).delete(&handle).await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_equity_survives_as_decimal_string() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        let t = tag();
        let handle = seed_company(&mut conn, &t).await?;
        let job = seed_job(&mut conn, &handle, &format!("{t}-lead"), 100000, "0.5").await?;

        let fetched = JobSelector::new(&mut conn).get_by_id(job.id).await?;
        assert_eq!(fetched.equity, job.equity);
        let encoded = serde_json::to_value(&fetched).unwrap();
        assert_eq!(encoded["equity"], serde_json::json!("0.5"));

        CompanyMutator::new(&mut conn).delete(&handle).await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_get_unknown_id_is_not_found() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        assert!(JobSelector::new(&mut conn).get_by_id(0).await.is_err());
        Ok(())
    }
}

use axum::http::StatusCode;
use sqlx::PgConnection;
use standard_error::{Interpolate, StandardError, Status};

use crate::{
    pkg::{
        internal::adaptors::{
            companies::spec::CompanyEntry,
            update::{partial_update, SqlValue},
        },
        server::handlers::companies::{CreateCompanyInput, PatchCompanyInput},
    },
    prelude::Result,
};

const COL_NAMES: &[(&str, &str)] = &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

pub struct CompanyMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> CompanyMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        CompanyMutator { pool }
    }

    /// The pre-check gives a friendly 400 for the common case; the primary
    /// key is what actually guarantees uniqueness under concurrent creates.
    pub async fn create(&mut self, company: CreateCompanyInput) -> Result<CompanyEntry> {
        let existing =
            sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
                .bind(&company.handle)
                .fetch_optional(&mut *self.pool)
                .await?;
        if existing.is_some() {
            return Err(StandardError::new("ERR-COMPANY-001")
                .interpolate_err(company.handle)
                .code(StatusCode::BAD_REQUEST));
        }

        let row = sqlx::query_as::<_, CompanyEntry>(
            r#"
            INSERT INTO companies (handle, name, description, num_employees, logo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING handle, name, description, num_employees, logo_url
            "#,
        )
        .bind(&company.handle)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.num_employees)
        .bind(&company.logo_url)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    //TODO: support clearing nullable columns, needs explicit null handling in the patch input
    pub async fn update(&mut self, handle: &str, data: PatchCompanyInput) -> Result<CompanyEntry> {
        let mut fields: Vec<(&str, SqlValue)> = Vec::new();
        if let Some(name) = data.name {
            fields.push(("name", SqlValue::Text(name)));
        }
        if let Some(description) = data.description {
            fields.push(("description", SqlValue::Text(description)));
        }
        if let Some(num_employees) = data.num_employees {
            fields.push(("numEmployees", SqlValue::Int(num_employees)));
        }
        if let Some(logo_url) = data.logo_url {
            fields.push(("logoUrl", SqlValue::Text(logo_url)));
        }
        let clause = partial_update(fields, COL_NAMES)?;

        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} \
             RETURNING handle, name, description, num_employees, logo_url",
            clause.cols,
            clause.values.len() + 1
        );
        let mut query = sqlx::query_as::<_, CompanyEntry>(&sql);
        for value in clause.values {
            query = match value {
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Decimal(v) => query.bind(v),
            };
        }
        match query
            .bind(handle)
            .fetch_optional(&mut *self.pool)
            .await?
        {
            Some(row) => Ok(row),
            None => Err(StandardError::new("ERR-COMPANY-002")
                .interpolate_err(handle.to_string())
                .code(StatusCode::NOT_FOUND)),
        }
    }

    pub async fn delete(&mut self, handle: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
            .bind(handle)
            .execute(&mut *self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StandardError::new("ERR-COMPANY-002")
                .interpolate_err(handle.to_string())
                .code(StatusCode::NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::{
        pkg::{
            internal::adaptors::companies::selectors::CompanySelector,
            server::state::AppState,
        },
        prelude::Result,
    };

    fn tag() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    fn new_company(t: &str) -> CreateCompanyInput {
        CreateCompanyInput {
            handle: format!("co-{t}"),
            name: format!("{t} widgets"),
            description: "makes widgets".to_string(),
            num_employees: Some(42),
            logo_url: Some("http://example.com/logo.png".to_string()),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_create_then_get_round_trip() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        let t = tag();

        let created = CompanyMutator::new(&mut conn).create(new_company(&t)).await?;
        assert_eq!(created.handle, format!("co-{t}"));
        assert_eq!(created.num_employees, Some(42));

        let fetched = CompanySelector::new(&mut conn)
            .get_by_handle(&created.handle)
            .await?;
        assert_eq!(fetched.name, created.name);
        assert_eq!(fetched.description, created.description);
        assert_eq!(fetched.logo_url, created.logo_url);

        CompanyMutator::new(&mut conn).delete(&created.handle).await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_duplicate_create_is_bad_request() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        let t = tag();

        let created = CompanyMutator::new(&mut conn).create(new_company(&t)).await?;
        assert!(CompanyMutator::new(&mut conn)
            .create(new_company(&t))
            .await
            .is_err());

        // the original row survives the failed duplicate
        let still_there = CompanySelector::new(&mut conn)
            .get_by_handle(&created.handle)
            .await?;
        assert_eq!(still_there.name, created.name);

        CompanyMutator::new(&mut conn).delete(&created.handle).await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_partial_update_changes_only_supplied_fields() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        let t = tag();

        let created = CompanyMutator::new(&mut conn).create(new_company(&t)).await?;
        let updated = CompanyMutator::new(&mut conn)
            .update(
                &created.handle,
                PatchCompanyInput {
                    name: None,
                    description: Some("makes better widgets".to_string()),
                    num_employees: Some(50),
                    logo_url: None,
                },
            )
            .await?;
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.description, "makes better widgets");
        assert_eq!(updated.num_employees, Some(50));
        assert_eq!(updated.logo_url, created.logo_url);

        CompanyMutator::new(&mut conn).delete(&created.handle).await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_empty_patch_is_bad_request() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        let t = tag();

        let created = CompanyMutator::new(&mut conn).create(new_company(&t)).await?;
        assert!(CompanyMutator::new(&mut conn)
            .update(
                &created.handle,
                PatchCompanyInput {
                    name: None,
                    description: None,
                    num_employees: None,
                    logo_url: None,
                },
            )
            .await
            .is_err());

        CompanyMutator::new(&mut conn).delete(&created.handle).await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_update_and_delete_unknown_handle_are_not_found() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        let missing = format!("nope-{}", tag());

        assert!(CompanyMutator::new(&mut conn)
            .update(
                &missing,
                PatchCompanyInput {
                    name: Some("ghost".to_string()),
                    description: None,
                    num_employees: None,
                    logo_url: None,
                },
            )
            .await
            .is_err());
        assert!(CompanyMutator::new(&mut conn).delete(&missing).await.is_err());
        Ok(())
    }
}

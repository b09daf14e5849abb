use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, FromRow};

// equity stays NUMERIC end to end; serde renders BigDecimal as a decimal
// string, never a binary float
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCriteria {
    pub min_salary: Option<i32>,
    pub title: Option<String>,
    pub has_equity: Option<bool>,
}

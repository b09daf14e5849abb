use axum::http::StatusCode;
use sqlx::types::BigDecimal;
use standard_error::{StandardError, Status};

use crate::prelude::Result;

/// Value bound into a dynamically assembled statement. Covers every column
/// type the companies and jobs tables update through PATCH.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    Text(String),
    Decimal(BigDecimal),
}

#[derive(Debug)]
pub struct SetClause {
    pub cols: String,
    pub values: Vec<SqlValue>,
}

/// Turns a field -> value listing into a `"col"=$n` SET fragment plus the
/// values to bind, 1-indexed in listing order. `col_names` translates
/// payload field names to column names; fields without an entry pass
/// through verbatim. An empty listing is a bad request, there is nothing
/// to update.
pub fn partial_update(
    data: Vec<(&str, SqlValue)>,
    col_names: &[(&str, &str)],
) -> Result<SetClause> {
    if data.is_empty() {
        return Err(StandardError::new("ERR-SQL-001").code(StatusCode::BAD_REQUEST));
    }
    let mut cols = Vec::with_capacity(data.len());
    for (idx, (field, _)) in data.iter().enumerate() {
        let col = col_names
            .iter()
            .find(|(name, _)| name == field)
            .map_or(*field, |(_, col)| *col);
        cols.push(format!("\"{}\"=${}", col, idx + 1));
    }
    Ok(SetClause {
        cols: cols.join(", "),
        values: data.into_iter().map(|(_, value)| value).collect(),
    })
}

//! Interface to the remote relational table store.
//!
//! The store is addressed the way PostgREST-style backends are: a table name,
//! a projection with optional nested relation expansion, equality filters and
//! an ordering. Every call either yields rows or a [`StoreError`] whose
//! message is shown to the user as-is.

mod memory;

pub use memory::MemoryTableStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::error;

use crate::error::{ModelError, Result};

/// One row as returned by the store.
pub type Row = Value;

/// Tables the dashboards read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Bookings,
    Counselors,
    Schedules,
    Payments,
    Users,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Bookings => "bookings",
            Table::Counselors => "counselors",
            Table::Schedules => "schedules",
            Table::Payments => "payments",
            Table::Users => "users",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure reported by the store. Only the message is meaningful.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error for a non-success HTTP response. PostgREST bodies carry a
    /// `message` field; anything else falls back to the status code.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        Self::new(message)
    }
}

/// Rows of a successful response body. PostgREST answers with an array, or
/// with nothing at all for some mutations.
pub fn rows_from_body(body: &str) -> std::result::Result<Vec<Row>, StoreError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(Value::Object(row)) => Ok(vec![Value::Object(row)]),
        Ok(other) => Err(StoreError::new(format!("Unexpected response body: {}", other))),
        Err(e) => Err(StoreError::new(format!("Invalid response body: {}", e))),
    }
}

/// Equality filter. A dotted column (`alias.column`) addresses an embedded
/// relation rather than the queried table.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Embedded relation alias and column when the filter is dotted.
    pub fn embedded(&self) -> Option<(&str, &str)> {
        self.column.split_once('.')
    }

    /// Value as it appears in a query string, without JSON quoting.
    pub fn value_text(&self) -> String {
        scalar_text(&self.value)
    }
}

/// Nested relation expansion: `alias:table(*)`, joined on
/// `row[foreign_key] == table.id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub alias: String,
    pub table: Table,
    pub foreign_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// A select against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: Table,
    pub embeds: Vec<Embed>,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
}

impl Query {
    pub fn from(table: Table) -> Self {
        Self {
            table,
            embeds: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn embed(mut self, alias: impl Into<String>, table: Table, foreign_key: impl Into<String>) -> Self {
        self.embeds.push(Embed {
            alias: alias.into(),
            table,
            foreign_key: foreign_key.into(),
        });
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order.push(Order {
            column: column.into(),
            direction,
        });
        self
    }

    /// The `select` projection, e.g. `*,user:users(*)`.
    pub fn select_clause(&self) -> String {
        let mut clause = String::from("*");
        for embed in &self.embeds {
            clause.push_str(&format!(",{}:{}(*)", embed.alias, embed.table));
        }
        clause
    }

    /// Encodes the query as PostgREST query-string parameters.
    pub fn to_query_string(&self) -> String {
        let mut params = vec![format!("select={}", self.select_clause())];

        let filters = filters_to_query_string(&self.filters);
        if !filters.is_empty() {
            params.push(filters);
        }

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|o| {
                    let dir = match o.direction {
                        Direction::Ascending => "asc",
                        Direction::Descending => "desc",
                    };
                    format!("{}.{}", o.column, dir)
                })
                .collect::<Vec<_>>()
                .join(",");
            params.push(format!("order={}", order));
        }

        params.join("&")
    }
}

/// Encodes equality filters as `column=eq.value` pairs.
pub fn filters_to_query_string(filters: &[Filter]) -> String {
    filters
        .iter()
        .map(|f| format!("{}=eq.{}", f.column, urlencoding::encode(&f.value_text())))
        .collect::<Vec<_>>()
        .join("&")
}

pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Remote table store. Mutations return the affected rows so callers can
/// merge them into local state instead of re-fetching.
#[async_trait(?Send)]
pub trait TableStore {
    async fn select(&self, query: &Query) -> std::result::Result<Vec<Row>, StoreError>;

    async fn insert(&self, table: Table, row: Row) -> std::result::Result<Vec<Row>, StoreError>;

    async fn update(
        &self,
        table: Table,
        filters: &[Filter],
        patch: Row,
    ) -> std::result::Result<Vec<Row>, StoreError>;

    async fn delete(&self, table: Table, filters: &[Filter]) -> std::result::Result<Vec<Row>, StoreError>;
}

/// Validates store rows into typed records.
pub fn decode_rows<T: DeserializeOwned>(table: Table, rows: Vec<Row>) -> Result<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|source| {
                error!("Invalid {} row: {}", table, source);
                ModelError::Decode { table, source }
            })
        })
        .collect()
}

/// Validates the first row; an empty result is [`ModelError::MissingRow`].
pub fn decode_single<T: DeserializeOwned>(table: Table, rows: Vec<Row>) -> Result<T> {
    let row = rows
        .into_iter()
        .next()
        .ok_or(ModelError::MissingRow { table })?;
    serde_json::from_value(row).map_err(|source| {
        error!("Invalid {} row: {}", table, source);
        ModelError::Decode { table, source }
    })
}

/// Encodes a record or patch into a row.
pub fn encode_row<T: serde::Serialize>(table: Table, value: &T) -> Result<Row> {
    serde_json::to_value(value).map_err(|source| ModelError::Encode { table, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::User;
    use serde_json::json;

    #[test]
    fn test_select_clause_with_embeds() {
        let query = Query::from(Table::Bookings).embed("user", Table::Users, "user_id");
        assert_eq!(query.select_clause(), "*,user:users(*)");
    }

    #[test]
    fn test_query_string_encoding() {
        let query = Query::from(Table::Bookings)
            .embed("user", Table::Users, "user_id")
            .eq("counselor_id", "c 1")
            .order_by("scheduled_at", Direction::Descending);

        assert_eq!(
            query.to_query_string(),
            "select=*,user:users(*)&counselor_id=eq.c%201&order=scheduled_at.desc"
        );
    }

    #[test]
    fn test_query_string_multiple_orders_and_scalars() {
        let query = Query::from(Table::Schedules)
            .eq("is_available", true)
            .eq("day_of_week", 3)
            .order_by("day_of_week", Direction::Ascending)
            .order_by("start_time", Direction::Ascending);

        assert_eq!(
            query.to_query_string(),
            "select=*&is_available=eq.true&day_of_week=eq.3&order=day_of_week.asc,start_time.asc"
        );
    }

    #[test]
    fn test_dotted_filter() {
        let filter = Filter::eq("booking.counselor_id", "c1");
        assert_eq!(filter.embedded(), Some(("booking", "counselor_id")));
        assert_eq!(Filter::eq("status", "completed").embedded(), None);
    }

    #[test]
    fn test_store_error_displays_message_verbatim() {
        assert_eq!(StoreError::new("network error").to_string(), "network error");
    }

    #[test]
    fn test_error_from_response_body() {
        let err = StoreError::from_response(403, r#"{"code":"42501","message":"permission denied for table payments"}"#);
        assert_eq!(err.to_string(), "permission denied for table payments");

        let err = StoreError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn test_rows_from_body() {
        assert_eq!(rows_from_body("").unwrap(), Vec::<Row>::new());
        assert_eq!(rows_from_body(r#"[{"id":"b1"}]"#).unwrap(), vec![json!({"id": "b1"})]);
        assert_eq!(rows_from_body(r#"{"id":"b1"}"#).unwrap().len(), 1);
        assert!(rows_from_body("42").is_err());
    }

    #[test]
    fn test_decode_rows_reports_table() {
        let rows = vec![json!({"id": "u1", "email": "a@example.com"}), json!({"id": 7})];
        let err = decode_rows::<User>(Table::Users, rows).unwrap_err();
        assert!(err.to_string().starts_with("Invalid users row"));
    }

    #[test]
    fn test_decode_single_empty() {
        let err = decode_single::<User>(Table::Users, vec![]).unwrap_err();
        assert!(matches!(err, ModelError::MissingRow { table: Table::Users }));
    }
}

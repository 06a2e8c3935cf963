use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::{scalar_text, Direction, Filter, Query, Row, StoreError, Table, TableStore};

/// In-process table store.
///
/// Backs the web app's demo mode and the test suites. Semantics follow the
/// PostgREST conventions the real backend uses:
/// - inserted rows without an `id` get one assigned;
/// - a dotted filter on an embedded relation nulls the embedded object when
///   it does not match, but keeps the parent row;
/// - nulls sort last ascending and first descending.
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: RefCell<HashMap<Table, Vec<Row>>>,
    next_id: Cell<u64>,
    failure: RefCell<Option<String>>,
    mutations: Cell<usize>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding of a table.
    pub fn with_rows(self, table: Table, rows: Vec<Row>) -> Self {
        self.tables.borrow_mut().entry(table).or_default().extend(rows);
        self
    }

    /// Snapshot of a table's rows in storage order.
    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.tables.borrow().get(&table).cloned().unwrap_or_default()
    }

    /// Makes every following call fail with `message` until cleared.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.borrow_mut() = Some(message.into());
    }

    pub fn clear_failure(&self) {
        *self.failure.borrow_mut() = None;
    }

    /// Number of insert, update and delete calls received, failed ones included.
    pub fn mutation_count(&self) -> usize {
        self.mutations.get()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.borrow().as_ref() {
            Some(message) => {
                warn!("Memory store failing call: {}", message);
                Err(StoreError::new(message.clone()))
            }
            None => Ok(()),
        }
    }

    fn next_id(&self, table: Table) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("{}-{}", table, id)
    }
}

#[async_trait(?Send)]
impl TableStore for MemoryTableStore {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        self.check_failure()?;
        let tables = self.tables.borrow();
        let source = tables.get(&query.table).cloned().unwrap_or_default();

        let mut rows = Vec::with_capacity(source.len());
        for mut row in source {
            for embed in &query.embeds {
                let key = row.get(&embed.foreign_key).map(scalar_text);
                let related = key
                    .and_then(|key| {
                        tables.get(&embed.table).and_then(|candidates| {
                            candidates
                                .iter()
                                .find(|candidate| candidate.get("id").map(scalar_text).as_deref() == Some(key.as_str()))
                                .cloned()
                        })
                    })
                    .unwrap_or(Value::Null);
                if let Value::Object(map) = &mut row {
                    map.insert(embed.alias.clone(), related);
                }
            }

            let mut keep = true;
            for filter in &query.filters {
                match filter.embedded() {
                    Some((alias, column)) => {
                        let matched = row
                            .get(alias)
                            .and_then(|embedded| embedded.get(column))
                            .is_some_and(|value| value_matches(value, filter));
                        if !matched {
                            if let Value::Object(map) = &mut row {
                                if map.contains_key(alias) {
                                    map.insert(alias.to_string(), Value::Null);
                                }
                            }
                        }
                    }
                    None => {
                        if !row_matches(&row, std::slice::from_ref(filter)) {
                            keep = false;
                            break;
                        }
                    }
                }
            }

            if keep {
                rows.push(row);
            }
        }

        if !query.order.is_empty() {
            rows.sort_by(|a, b| {
                for order in &query.order {
                    let ordering = compare_values(a.get(&order.column), b.get(&order.column));
                    let ordering = match order.direction {
                        Direction::Ascending => ordering,
                        Direction::Descending => ordering.reverse(),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            });
        }

        debug!("Memory select on {} returned {} rows", query.table, rows.len());
        Ok(rows)
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Vec<Row>, StoreError> {
        self.mutations.set(self.mutations.get() + 1);
        self.check_failure()?;

        let mut map = match row {
            Value::Object(map) => map,
            other => return Err(StoreError::new(format!("Cannot insert non-object row: {}", other))),
        };
        if !map.contains_key("id") {
            map.insert("id".to_string(), Value::String(self.next_id(table)));
        }

        let row = Value::Object(map);
        self.tables.borrow_mut().entry(table).or_default().push(row.clone());
        debug!("Memory insert into {}", table);
        Ok(vec![row])
    }

    async fn update(&self, table: Table, filters: &[Filter], patch: Row) -> Result<Vec<Row>, StoreError> {
        self.mutations.set(self.mutations.get() + 1);
        self.check_failure()?;

        let patch: Map<String, Value> = match patch {
            Value::Object(map) => map,
            other => return Err(StoreError::new(format!("Cannot apply non-object patch: {}", other))),
        };

        let mut tables = self.tables.borrow_mut();
        let mut updated = Vec::new();
        for row in tables.entry(table).or_default().iter_mut() {
            if !row_matches(row, filters) {
                continue;
            }
            if let Value::Object(map) = row {
                for (key, value) in &patch {
                    map.insert(key.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }

        debug!("Memory update on {} touched {} rows", table, updated.len());
        Ok(updated)
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<Vec<Row>, StoreError> {
        self.mutations.set(self.mutations.get() + 1);
        self.check_failure()?;

        let mut tables = self.tables.borrow_mut();
        let rows = tables.entry(table).or_default();
        let (removed, kept): (Vec<Row>, Vec<Row>) =
            rows.drain(..).partition(|row| row_matches(row, filters));
        *rows = kept;

        debug!("Memory delete on {} removed {} rows", table, removed.len());
        Ok(removed)
    }
}

fn row_matches(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| {
        row.get(&filter.column)
            .is_some_and(|value| value_matches(value, filter))
    })
}

fn value_matches(value: &Value, filter: &Filter) -> bool {
    scalar_text(value) == filter.value_text()
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(x), Some(y)) => scalar_text(x).cmp(&scalar_text(y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded() -> MemoryTableStore {
        MemoryTableStore::new()
            .with_rows(
                Table::Users,
                vec![
                    json!({"id": "u1", "email": "a@example.com"}),
                    json!({"id": "u2", "email": "b@example.com"}),
                ],
            )
            .with_rows(
                Table::Bookings,
                vec![
                    json!({"id": "b1", "user_id": "u1", "counselor_id": "c1", "scheduled_at": "2024-01-01T10:00:00Z"}),
                    json!({"id": "b2", "user_id": "u2", "counselor_id": "c2", "scheduled_at": "2024-01-03T10:00:00Z"}),
                    json!({"id": "b3", "user_id": "u1", "counselor_id": "c1", "scheduled_at": "2024-01-02T10:00:00Z"}),
                ],
            )
    }

    fn ids(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| r["id"].as_str().unwrap().to_string()).collect()
    }

    #[tokio::test]
    async fn test_select_filters_orders_and_embeds() {
        let store = seeded();
        let query = Query::from(Table::Bookings)
            .embed("user", Table::Users, "user_id")
            .eq("counselor_id", "c1")
            .order_by("scheduled_at", Direction::Descending);

        let rows = store.select(&query).await.unwrap();
        assert_eq!(ids(&rows), vec!["b3", "b1"]);
        assert_eq!(rows[0]["user"]["email"], "a@example.com");
    }

    #[tokio::test]
    async fn test_dotted_filter_nulls_embed_but_keeps_parent() {
        let store = seeded().with_rows(
            Table::Payments,
            vec![
                json!({"id": "p1", "booking_id": "b1", "status": "completed"}),
                json!({"id": "p2", "booking_id": "b2", "status": "completed"}),
            ],
        );
        let query = Query::from(Table::Payments)
            .embed("booking", Table::Bookings, "booking_id")
            .eq("status", "completed")
            .eq("booking.counselor_id", "c1");

        let rows = store.select(&query).await.unwrap();
        assert_eq!(ids(&rows), vec!["p1", "p2"]);
        assert_eq!(rows[0]["booking"]["counselor_id"], "c1");
        assert!(rows[1]["booking"].is_null());
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_update_returns_rows() {
        let store = MemoryTableStore::new();
        let inserted = store
            .insert(Table::Schedules, json!({"counselor_id": "c1", "day_of_week": 1, "is_available": true}))
            .await
            .unwrap();
        let id = inserted[0]["id"].as_str().unwrap().to_string();
        assert_eq!(id, "schedules-1");

        let updated = store
            .update(Table::Schedules, &[Filter::eq("id", id.as_str())], json!({"is_available": false}))
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["is_available"], false);
        assert_eq!(updated[0]["day_of_week"], 1);
        assert_eq!(store.mutation_count(), 2);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_rows() {
        let store = seeded();
        let removed = store
            .delete(Table::Bookings, &[Filter::eq("user_id", "u1")])
            .await
            .unwrap();
        assert_eq!(ids(&removed), vec!["b1", "b3"]);
        assert_eq!(ids(&store.rows(Table::Bookings)), vec!["b2"]);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = seeded();
        store.fail_with("network error");

        let err = store.select(&Query::from(Table::Users)).await.unwrap_err();
        assert_eq!(err.message, "network error");

        store.clear_failure();
        assert_eq!(store.select(&Query::from(Table::Users)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_numeric_ordering_and_filters() {
        let store = MemoryTableStore::new().with_rows(
            Table::Schedules,
            vec![
                json!({"id": "s1", "day_of_week": 10}),
                json!({"id": "s2", "day_of_week": 2}),
                json!({"id": "s3", "day_of_week": null}),
            ],
        );
        let rows = store
            .select(&Query::from(Table::Schedules).order_by("day_of_week", Direction::Ascending))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec!["s2", "s1", "s3"]);

        let rows = store
            .select(&Query::from(Table::Schedules).eq("day_of_week", 2))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec!["s2"]);
    }
}

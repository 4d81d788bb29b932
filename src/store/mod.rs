pub mod models;

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

pub use models::{Artist, Category, Drink, Question, RecipePart, Show, Venue};

/// Errors from the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("write failed: {0}")]
    Write(String),
}

/// A stored record keyed by a small positive integer id
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    /// Entity kind for error messages
    fn kind() -> &'static str;
}

/// In-memory table: ordered by id, shared across handlers.
///
/// This replaces the ORM session of the original backends. Handlers get a
/// handle through `AppState` rather than any ambient global, and each call
/// takes the lock only for the duration of the operation.
#[derive(Debug)]
pub struct Table<T: Entity> {
    rows: Arc<RwLock<BTreeMap<i64, T>>>,
    next_id: Arc<RwLock<i64>>,
}

impl<T: Entity> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self { rows: self.rows.clone(), next_id: self.next_id.clone() }
    }
}

impl<T: Entity> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Table<T> {
    pub fn new() -> Self {
        Self { rows: Arc::new(RwLock::new(BTreeMap::new())), next_id: Arc::new(RwLock::new(1)) }
    }

    /// Insert a record, assigning the next free id. Returns the stored copy.
    pub async fn insert(&self, mut item: T) -> Result<T, StoreError> {
        let mut next = self.next_id.write().await;
        let mut rows = self.rows.write().await;
        item.set_id(*next);
        rows.insert(*next, item.clone());
        *next += 1;
        Ok(item)
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    /// Point lookup that maps absence to `StoreError::NotFound`
    pub async fn require(&self, id: i64) -> Result<T, StoreError> {
        self.get(id)
            .await
            .ok_or_else(|| StoreError::NotFound(format!("{} {}", T::kind(), id)))
    }

    /// Replace an existing record in full
    pub async fn update(&self, id: i64, mut item: T) -> Result<T, StoreError> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&id) {
            return Err(StoreError::NotFound(format!("{} {}", T::kind(), id)));
        }
        item.set_id(id);
        rows.insert(id, item.clone());
        Ok(item)
    }

    pub async fn remove(&self, id: i64) -> Result<T, StoreError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(format!("{} {}", T::kind(), id)))
    }

    /// Full scan in id order
    pub async fn scan(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    /// Filtered scan in id order
    pub async fn scan_where(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.read().await.values().filter(|t| pred(t)).cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    impl Entity for Row {
        fn id(&self) -> i64 {
            self.id
        }
        fn set_id(&mut self, id: i64) {
            self.id = id;
        }
        fn kind() -> &'static str {
            "row"
        }
    }

    fn row(name: &str) -> Row {
        Row { id: 0, name: name.to_string() }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let table = Table::new();
        let a = table.insert(row("a")).await.unwrap();
        let b = table.insert(row("b")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn scan_is_id_ordered_after_removal() {
        let table = Table::new();
        for name in ["a", "b", "c"] {
            table.insert(row(name)).await.unwrap();
        }
        table.remove(2).await.unwrap();
        let ids: Vec<i64> = table.scan().await.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        // removed ids are not reused
        let d = table.insert(row("d")).await.unwrap();
        assert_eq!(d.id, 4);
    }

    #[tokio::test]
    async fn require_and_remove_report_missing_rows() {
        let table: Table<Row> = Table::new();
        assert!(matches!(table.require(7).await, Err(StoreError::NotFound(_))));
        assert!(matches!(table.remove(7).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let table = Table::new();
        let a = table.insert(row("a")).await.unwrap();
        let updated = table.update(a.id, row("z")).await.unwrap();
        assert_eq!(updated.id, a.id);
        assert_eq!(table.get(a.id).await.unwrap().name, "z");
    }
}

use std::sync::Arc;

use crate::auth::KeyProvider;
use crate::config;
use crate::store::{Artist, Category, Drink, Question, Show, Table, Venue};

/// Everything the handlers depend on, passed explicitly via axum `State`.
/// No handler reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub questions: Table<Question>,
    pub categories: Table<Category>,
    pub drinks: Table<Drink>,
    pub venues: Table<Venue>,
    pub artists: Table<Artist>,
    pub shows: Table<Show>,
    pub keys: Arc<KeyProvider>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            questions: Table::new(),
            categories: Table::new(),
            drinks: Table::new(),
            venues: Table::new(),
            artists: Table::new(),
            shows: Table::new(),
            keys: Arc::new(KeyProvider::from_config(&config::config().auth)),
        }
    }

    /// The trivia frontend assumes the six classic categories exist
    pub async fn seed_categories(&self) -> Result<(), crate::store::StoreError> {
        for label in ["Science", "Art", "Geography", "History", "Entertainment", "Sports"] {
            self.categories.insert(Category { id: 0, label: label.to_string() }).await?;
        }
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

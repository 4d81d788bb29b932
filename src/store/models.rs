use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::Entity;

/// Trivia question. `category` references an existing `Category` id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: u8,
}

impl Question {
    /// Wire shape used by every trivia listing and the quiz response
    pub fn format(&self) -> Value {
        json!({
            "id": self.id,
            "question": self.question,
            "answer": self.answer,
            "category": self.category,
            "difficulty": self.difficulty,
        })
    }
}

impl Entity for Question {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn kind() -> &'static str {
        "question"
    }
}

/// Trivia category; the label is called `type` on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type")]
    pub label: String,
}

impl Entity for Category {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn kind() -> &'static str {
        "category"
    }
}

/// One ingredient line of a drink recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePart {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drink {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub recipe: Vec<RecipePart>,
}

impl Drink {
    /// Public shape: recipe without ingredient names
    pub fn short(&self) -> Value {
        let recipe: Vec<Value> = self
            .recipe
            .iter()
            .map(|p| json!({ "color": p.color, "parts": p.parts }))
            .collect();
        json!({ "id": self.id, "title": self.title, "recipe": recipe })
    }

    /// Barista shape: full recipe
    pub fn long(&self) -> Value {
        json!({ "id": self.id, "title": self.title, "recipe": self.recipe })
    }
}

impl Entity for Drink {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn kind() -> &'static str {
        "drink"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl Entity for Venue {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn kind() -> &'static str {
        "venue"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl Entity for Artist {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn kind() -> &'static str {
        "artist"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    #[serde(default)]
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_date: DateTime<Utc>,
}

impl Show {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_date > now
    }
}

impl Entity for Show {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn kind() -> &'static str {
        "show"
    }
}

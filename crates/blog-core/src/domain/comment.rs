use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visitor comment attached to a post.
///
/// `active` is the moderation switch: inactive comments stay stored but are
/// hidden from post detail views. `created_at` orders comments within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created: NaiveDate,
    pub updated: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl Comment {
    pub fn new(post_id: Uuid, name: String, email: String, body: String) -> Self {
        let now = Utc::now();
        let today = now.date_naive();
        Self {
            id: Uuid::new_v4(),
            post_id,
            name,
            email,
            body,
            created: today,
            updated: today,
            created_at: now,
            active: true,
        }
    }

    /// Flip the moderation flag.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated = Utc::now().date_naive();
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roster entry. Enrollment itself is owned by out-of-scope flows; this
/// service only reads students scoped by classroom.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    pub id: String,
    pub class_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn new(class_id: &str, first_name: &str, last_name: &str) -> Self {
        Student {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

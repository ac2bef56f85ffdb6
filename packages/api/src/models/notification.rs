use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parent notification. Read-only after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub school_id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub target_class: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /notifications`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub target_class: Option<String>,
}

/// A parent to reach for a notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub student_name: String,
    pub parent_contact: String,
    pub whatsapp_link: String,
}

/// `GET /notifications/{id}/contacts` response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContactList {
    pub contacts: Vec<Contact>,
}

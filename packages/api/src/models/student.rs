use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A student of the school.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: String,
    pub school_id: String,
    pub class_name: String,
    pub admission_number: String,
    pub name: String,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub parent_contact: String,
    #[serde(default)]
    pub parent_email: Option<String>,
    pub date_of_admission: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Body of `POST /students`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewStudent {
    pub class_name: String,
    pub admission_number: String,
    pub name: String,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub parent_contact: String,
    pub parent_email: Option<String>,
    pub date_of_admission: NaiveDate,
}

/// Body of `PUT /students/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Query of `GET /students`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentQuery {
    pub class_name: Option<String>,
    pub search: Option<String>,
}

impl StudentQuery {
    pub fn for_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            search: None,
        }
    }

    pub(crate) fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(class_name) = self.class_name.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("class_name".to_string(), class_name.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        pairs
    }
}

/// `GET /classes` response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassList {
    pub classes: Vec<String>,
}

/// Numeric part of a `"Class N"` label, used to order classes naturally.
/// Labels without a number sort first.
pub fn class_number(label: &str) -> u32 {
    label
        .trim()
        .trim_start_matches("Class")
        .trim()
        .parse()
        .unwrap_or(0)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /teachers`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub assigned_classes: Vec<String>,
}

/// A salary ledger entry. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalaryPayment {
    pub id: String,
    pub teacher_id: String,
    pub amount: f64,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub paid_by: Option<String>,
    pub paid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub teacher_name: Option<String>,
}

/// Body of `POST /teacher-salaries`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewSalaryPayment {
    pub teacher_id: String,
    pub amount: f64,
    pub remark: Option<String>,
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A fee definition. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeBill {
    pub id: String,
    pub school_id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` means every class.
    #[serde(default)]
    pub target_class: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl FeeBill {
    pub fn target_label(&self) -> &str {
        self.target_class.as_deref().unwrap_or("All Classes")
    }
}

/// Body of `POST /fee-bills`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewFeeBill {
    pub name: String,
    pub amount: f64,
    pub description: Option<String>,
    pub target_class: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Settlement status of a single obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Unpaid,
    Paid,
}

impl FeeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
        }
    }
}

/// One student's obligation generated from a [`FeeBill`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentFee {
    pub id: String,
    pub student_id: String,
    pub fee_bill_id: String,
    pub amount: f64,
    pub status: FeeStatus,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub marked_by: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_class: Option<String>,
    #[serde(default)]
    pub fee_bill_name: Option<String>,
}

impl StudentFee {
    pub fn is_paid(&self) -> bool {
        self.status == FeeStatus::Paid
    }
}

/// Body of `PUT /student-fees/{id}/mark-paid`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MarkPaidRequest {
    pub remarks: Option<String>,
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Presence status of one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

/// A stored attendance entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub marked_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_class: Option<String>,
}

/// One (student, status) pair of a submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceMark {
    pub student_id: String,
    pub status: AttendanceStatus,
}

/// Body of `POST /attendance`: a complete batch for one date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceBatch {
    pub date: NaiveDate,
    pub records: Vec<AttendanceMark>,
}

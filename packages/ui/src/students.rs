//! Student roster and profile helpers.

use std::collections::BTreeMap;

use api::{
    class_number, ApiClient, ApiError, AttendanceRecord, AttendanceStatus, Student, StudentFee,
    StudentQuery, Transport,
};
use store::KeyValueStore;

use crate::forms::{ContactEdit, StudentDraft};

/// Days of attendance history shown on a profile.
pub const HISTORY_DAYS: u32 = 60;

/// Presence over the history window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    /// Whole percent present, 0 with no records.
    pub rate: u32,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let present = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        let total = records.len();
        let rate = if total == 0 {
            0
        } else {
            ((present as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            total,
            present,
            absent: total - present,
            rate,
        }
    }
}

/// Fee obligations of one student.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeeSummary {
    pub total: usize,
    pub paid: usize,
    pub unpaid: usize,
    pub total_amount: f64,
    pub paid_amount: f64,
}

impl FeeSummary {
    pub fn from_fees(fees: &[StudentFee]) -> Self {
        let mut summary = Self {
            total: fees.len(),
            ..Self::default()
        };
        for fee in fees {
            summary.total_amount += fee.amount;
            if fee.is_paid() {
                summary.paid += 1;
                summary.paid_amount += fee.amount;
            } else {
                summary.unpaid += 1;
            }
        }
        summary
    }

    pub fn due_amount(&self) -> f64 {
        self.total_amount - self.paid_amount
    }
}

/// Everything the detail page shows about one student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub student: Student,
    pub fees: Vec<StudentFee>,
    pub attendance: Vec<AttendanceRecord>,
}

impl StudentProfile {
    pub fn attendance_summary(&self) -> AttendanceSummary {
        AttendanceSummary::from_records(&self.attendance)
    }

    pub fn fee_summary(&self) -> FeeSummary {
        FeeSummary::from_fees(&self.fees)
    }
}

/// Fetch a student with their fees and recent attendance.
pub async fn load_profile<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    id: &str,
) -> Result<StudentProfile, ApiError> {
    let (student, fees, attendance) = futures::future::try_join3(
        client.student(id),
        client.student_fees(id),
        client.student_attendance(id, HISTORY_DAYS),
    )
    .await?;
    Ok(StudentProfile {
        student,
        fees,
        attendance,
    })
}

/// Save contact edits and return the student as now stored.
pub async fn save_contact<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    student: &Student,
    edit: &ContactEdit,
) -> Result<Student, ApiError> {
    let update = edit.validate()?;
    client.update_student(&student.id, &update).await?;
    tracing::info!("updated contact details of {}", student.admission_number);
    Ok(edit.apply(student))
}

/// Validate and submit an admission.
pub async fn admit<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    draft: &StudentDraft,
) -> Result<Student, ApiError> {
    let student = draft.validate()?;
    let created = client.create_student(&student).await?;
    tracing::info!("admitted {} into {}", created.admission_number, created.class_name);
    Ok(created)
}

/// Roster search, with the search text trimmed.
pub fn roster_query(class_filter: &str, search: &str) -> StudentQuery {
    StudentQuery {
        class_name: (!class_filter.is_empty() && class_filter != "all")
            .then(|| class_filter.to_string()),
        search: Some(search.trim().to_string()).filter(|s| !s.is_empty()),
    }
}

/// Students grouped by class, classes in numeric order.
pub fn group_by_class(students: &[Student]) -> Vec<(String, Vec<Student>)> {
    let mut groups: BTreeMap<(u32, String), Vec<Student>> = BTreeMap::new();
    for student in students {
        groups
            .entry((class_number(&student.class_name), student.class_name.clone()))
            .or_default()
            .push(student.clone());
    }
    groups
        .into_iter()
        .map(|((_, class_name), members)| (class_name, members))
        .collect()
}

//! Daily attendance reconciliation for one class.
//!
//! A sheet pairs the class roster with the marks already stored for the day.
//! It can only be submitted once every roster member is marked, and then as
//! a single batch that overwrites whatever the backend held for that day.

use std::collections::HashMap;

use api::{
    ApiClient, ApiError, AttendanceBatch, AttendanceMark, AttendanceRecord, AttendanceStatus,
    Student, StudentQuery, Transport,
};
use chrono::NaiveDate;
use store::KeyValueStore;

/// Class and day to reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceQuery {
    pub class_name: String,
    pub date: NaiveDate,
}

impl AttendanceQuery {
    /// `today` is the latest day attendance may be taken for.
    pub fn new(class_name: &str, date: NaiveDate, today: NaiveDate) -> Result<Self, ApiError> {
        let class_name = class_name.trim();
        if class_name.is_empty() {
            return Err(ApiError::validation("Please select a class"));
        }
        if date > today {
            return Err(ApiError::validation("Attendance cannot be marked for a future date"));
        }
        Ok(Self {
            class_name: class_name.to_string(),
            date,
        })
    }
}

/// Counts shown above the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub marked: usize,
    pub present: usize,
    pub absent: usize,
}

/// Roster plus in-progress marks for one class and day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceSheet {
    roster: Vec<Student>,
    marks: HashMap<String, AttendanceStatus>,
}

impl AttendanceSheet {
    /// Seed marks from the day's stored records. Records for students not on
    /// the roster are ignored.
    pub fn new(roster: Vec<Student>, existing: &[AttendanceRecord]) -> Self {
        let mut sheet = Self {
            roster,
            marks: HashMap::new(),
        };
        for record in existing {
            sheet.mark(&record.student_id, record.status);
        }
        sheet
    }

    pub fn roster(&self) -> &[Student] {
        &self.roster
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn status_of(&self, student_id: &str) -> Option<AttendanceStatus> {
        self.marks.get(student_id).copied()
    }

    /// Set one student's status. Returns false if they are not on the roster.
    pub fn mark(&mut self, student_id: &str, status: AttendanceStatus) -> bool {
        if !self.roster.iter().any(|s| s.id == student_id) {
            tracing::debug!("ignoring mark for {student_id}: not on roster");
            return false;
        }
        self.marks.insert(student_id.to_string(), status);
        true
    }

    /// Mark every roster member with the same status.
    pub fn mark_all(&mut self, status: AttendanceStatus) {
        for student in &self.roster {
            self.marks.insert(student.id.clone(), status);
        }
    }

    pub fn tally(&self) -> Tally {
        let present = self
            .marks
            .values()
            .filter(|s| **s == AttendanceStatus::Present)
            .count();
        Tally {
            total: self.roster.len(),
            marked: self.marks.len(),
            present,
            absent: self.marks.len() - present,
        }
    }

    pub fn can_submit(&self) -> bool {
        let tally = self.tally();
        tally.total > 0 && tally.marked == tally.total
    }

    /// The full payload for `date`, in roster order.
    pub fn batch(&self, date: NaiveDate) -> Result<AttendanceBatch, ApiError> {
        if !self.can_submit() {
            return Err(ApiError::validation(
                "Please mark attendance for all students",
            ));
        }
        let records = self
            .roster
            .iter()
            .filter_map(|student| {
                self.status_of(&student.id).map(|status| AttendanceMark {
                    student_id: student.id.clone(),
                    status,
                })
            })
            .collect();
        Ok(AttendanceBatch { date, records })
    }
}

/// Fetch roster and stored marks together and build the sheet.
pub async fn load_sheet<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    query: &AttendanceQuery,
) -> Result<AttendanceSheet, ApiError> {
    let roster_query = StudentQuery::for_class(query.class_name.clone());
    let (roster, existing) = futures::future::try_join(
        client.students(&roster_query),
        client.attendance(query.date, &query.class_name),
    )
    .await?;
    tracing::debug!(
        "loaded {} students and {} records for {} on {}",
        roster.len(),
        existing.len(),
        query.class_name,
        query.date
    );
    Ok(AttendanceSheet::new(roster, &existing))
}

/// Submit a complete sheet.
pub async fn submit_sheet<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    sheet: &AttendanceSheet,
    date: NaiveDate,
) -> Result<usize, ApiError> {
    let batch = sheet.batch(date)?;
    let saved = client.submit_attendance(&batch).await?;
    tracing::info!("saved attendance for {} students on {date}", batch.records.len());
    Ok(saved.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::testing::{attendance_json, student_json, ScriptedTransport};
    use api::{Method, SessionStore};
    use serde_json::json;
    use store::{MemoryStore, TOKEN_KEY};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn roster() -> Vec<Student> {
        ["s1", "s2", "s3"]
            .iter()
            .map(|id| serde_json::from_value(student_json(id, &format!("Student {id}"), "Class 4")).unwrap())
            .collect()
    }

    fn record(student: &str, status: &str) -> AttendanceRecord {
        serde_json::from_value(attendance_json(student, "2024-06-03", status)).unwrap()
    }

    fn client(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport, MemoryStore> {
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        ApiClient::new(transport.clone(), SessionStore::new(storage))
    }

    #[test]
    fn test_query_requires_class_and_past_date() {
        assert!(AttendanceQuery::new("", day(3), day(3)).is_err());
        assert!(AttendanceQuery::new("Class 4", day(4), day(3)).is_err());
        let query = AttendanceQuery::new(" Class 4 ", day(3), day(3)).unwrap();
        assert_eq!(query.class_name, "Class 4");
    }

    #[test]
    fn test_submit_enabled_only_when_all_marked() {
        let mut sheet = AttendanceSheet::new(roster(), &[]);
        assert!(!sheet.can_submit());

        sheet.mark("s1", AttendanceStatus::Present);
        sheet.mark("s2", AttendanceStatus::Absent);
        let tally = sheet.tally();
        assert_eq!((tally.total, tally.marked), (3, 2));
        assert!(!sheet.can_submit());
        assert!(matches!(sheet.batch(day(3)), Err(ApiError::Validation(_))));

        sheet.mark("s3", AttendanceStatus::Present);
        assert!(sheet.can_submit());
        let tally = sheet.tally();
        assert_eq!((tally.present, tally.absent), (2, 1));
    }

    #[test]
    fn test_reopen_prefills_from_stored_records() {
        let existing = vec![record("s1", "present"), record("s3", "absent"), record("gone", "present")];
        let sheet = AttendanceSheet::new(roster(), &existing);

        assert_eq!(sheet.status_of("s1"), Some(AttendanceStatus::Present));
        assert_eq!(sheet.status_of("s2"), None);
        assert_eq!(sheet.status_of("s3"), Some(AttendanceStatus::Absent));
        assert_eq!(sheet.status_of("gone"), None);
        assert_eq!(sheet.tally().marked, 2);
    }

    #[test]
    fn test_last_mark_wins_and_strangers_are_ignored() {
        let mut sheet = AttendanceSheet::new(roster(), &[]);
        sheet.mark("s1", AttendanceStatus::Present);
        sheet.mark("s1", AttendanceStatus::Absent);
        assert!(!sheet.mark("nobody", AttendanceStatus::Present));

        assert_eq!(sheet.status_of("s1"), Some(AttendanceStatus::Absent));
        assert_eq!(sheet.tally().marked, 1);
    }

    #[test]
    fn test_empty_roster_never_submits() {
        let mut sheet = AttendanceSheet::new(Vec::new(), &[]);
        sheet.mark_all(AttendanceStatus::Present);
        assert!(sheet.is_empty());
        assert!(!sheet.can_submit());
    }

    #[test]
    fn test_batch_follows_roster_order() {
        let mut sheet = AttendanceSheet::new(roster(), &[]);
        sheet.mark_all(AttendanceStatus::Present);
        sheet.mark("s2", AttendanceStatus::Absent);

        let batch = sheet.batch(day(3)).unwrap();
        let ids: Vec<&str> = batch.records.iter().map(|r| r.student_id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3"]);
        assert_eq!(batch.records[1].status, AttendanceStatus::Absent);
    }

    #[tokio::test]
    async fn test_load_and_submit_sheet() {
        let transport = ScriptedTransport::new();
        transport
            .on(
                Method::Get,
                "/students",
                200,
                json!([
                    student_json("s1", "Aarav", "Class 4"),
                    student_json("s2", "Diya", "Class 4"),
                ]),
            )
            .on(
                Method::Get,
                "/attendance",
                200,
                json!([attendance_json("s2", "2024-06-03", "absent")]),
            )
            .on(
                Method::Post,
                "/attendance",
                200,
                json!([
                    attendance_json("s1", "2024-06-03", "present"),
                    attendance_json("s2", "2024-06-03", "absent"),
                ]),
            );
        let api = client(&transport);
        let query = AttendanceQuery::new("Class 4", day(3), day(10)).unwrap();

        let mut sheet = load_sheet(&api, &query).await.unwrap();
        assert_eq!(sheet.tally().marked, 1);
        assert!(submit_sheet(&api, &sheet, query.date).await.is_err());
        assert!(transport.requests_to(Method::Post, "/attendance").is_empty());

        sheet.mark("s1", AttendanceStatus::Present);
        assert_eq!(submit_sheet(&api, &sheet, query.date).await.unwrap(), 2);
        let posted = transport.requests_to(Method::Post, "/attendance");
        assert_eq!(posted.len(), 1);
        assert_eq!(
            posted[0].body,
            Some(json!({
                "date": "2024-06-03",
                "records": [
                    { "student_id": "s1", "status": "present" },
                    { "student_id": "s2", "status": "absent" },
                ]
            }))
        );
    }

    #[tokio::test]
    async fn test_load_fails_when_either_fetch_fails() {
        let transport = ScriptedTransport::new();
        transport
            .on(Method::Get, "/students", 200, json!([student_json("s1", "Aarav", "Class 4")]))
            .fail(Method::Get, "/attendance", "timeout");
        let api = client(&transport);
        let query = AttendanceQuery::new("Class 4", day(3), day(3)).unwrap();

        assert!(matches!(load_sheet(&api, &query).await, Err(ApiError::Network(_))));
    }
}

use chrono::NaiveDate;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AttendanceBatch, AttendanceRecord};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// Records already stored for `class_name` on `date`.
    pub async fn attendance(
        &self,
        date: NaiveDate,
        class_name: &str,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let query = vec![
            ("date".to_string(), date.format("%Y-%m-%d").to_string()),
            ("class_name".to_string(), class_name.to_string()),
        ];
        self.get("/attendance", query).await
    }

    /// Upsert a day's marks; existing records for the same student and date
    /// are overwritten by the backend.
    pub async fn submit_attendance(
        &self,
        batch: &AttendanceBatch,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.post("/attendance", batch).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY};

    use crate::testing::{attendance_json, ScriptedTransport};
    use crate::transport::Method;
    use crate::{ApiClient, AttendanceBatch, AttendanceMark, AttendanceStatus, SessionStore};

    #[tokio::test]
    async fn test_attendance_query_and_submit_body() {
        let transport = ScriptedTransport::new();
        transport
            .on(
                Method::Get,
                "/attendance",
                200,
                json!([attendance_json("s1", "2024-06-03", "absent")]),
            )
            .on(Method::Post, "/attendance", 200, json!([]));
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        let api = ApiClient::new(transport.clone(), SessionStore::new(storage));
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

        let records = api.attendance(date, "Class 4").await.unwrap();
        assert_eq!(records[0].status, AttendanceStatus::Absent);

        let batch = AttendanceBatch {
            date,
            records: vec![AttendanceMark {
                student_id: "s1".to_string(),
                status: AttendanceStatus::Present,
            }],
        };
        api.submit_attendance(&batch).await.unwrap();

        let get = transport.requests_to(Method::Get, "/attendance");
        assert_eq!(
            get[0].query,
            vec![
                ("date".to_string(), "2024-06-03".to_string()),
                ("class_name".to_string(), "Class 4".to_string()),
            ]
        );
        let post = transport.requests_to(Method::Post, "/attendance");
        assert_eq!(
            post[0].body,
            Some(json!({
                "date": "2024-06-03",
                "records": [{ "student_id": "s1", "status": "present" }]
            }))
        );
    }
}

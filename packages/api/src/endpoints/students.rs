use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AttendanceRecord, ClassList, NewStudent, Student, StudentFee, StudentQuery, StudentUpdate,
};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// `GET /classes`: the class labels every selector offers.
    pub async fn classes(&self) -> Result<Vec<String>, ApiError> {
        let list: ClassList = self.get("/classes", Vec::new()).await?;
        Ok(list.classes)
    }

    pub async fn students(&self, query: &StudentQuery) -> Result<Vec<Student>, ApiError> {
        self.get("/students", query.to_pairs()).await
    }

    pub async fn student(&self, id: &str) -> Result<Student, ApiError> {
        self.get(&format!("/students/{id}"), Vec::new()).await
    }

    pub async fn create_student(&self, student: &NewStudent) -> Result<Student, ApiError> {
        self.post("/students", student).await
    }

    pub async fn update_student(&self, id: &str, update: &StudentUpdate) -> Result<Student, ApiError> {
        self.put(&format!("/students/{id}"), update).await
    }

    pub async fn delete_student(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/students/{id}")).await
    }

    /// Every fee obligation of one student.
    pub async fn student_fees(&self, id: &str) -> Result<Vec<StudentFee>, ApiError> {
        self.get(&format!("/students/{id}/fees"), Vec::new()).await
    }

    /// Attendance of one student over the last `days` days.
    pub async fn student_attendance(
        &self,
        id: &str,
        days: u32,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.get(
            &format!("/students/{id}/attendance"),
            vec![("days".to_string(), days.to_string())],
        )
        .await
    }
}

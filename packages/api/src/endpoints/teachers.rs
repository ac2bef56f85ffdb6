use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{NewSalaryPayment, NewTeacher, SalaryPayment, UserInfo};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn teachers(&self) -> Result<Vec<UserInfo>, ApiError> {
        self.get("/teachers", Vec::new()).await
    }

    pub async fn create_teacher(&self, teacher: &NewTeacher) -> Result<UserInfo, ApiError> {
        self.post("/teachers", teacher).await
    }

    /// `DELETE /users/{id}`; the backend refuses to delete the caller.
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/users/{id}")).await
    }

    pub async fn pay_salary(&self, payment: &NewSalaryPayment) -> Result<SalaryPayment, ApiError> {
        self.post("/teacher-salaries", payment).await
    }

    pub async fn salary_history(&self, teacher_id: &str) -> Result<Vec<SalaryPayment>, ApiError> {
        self.get(&format!("/teachers/{teacher_id}/salaries"), Vec::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY};

    use crate::testing::{user_json, ScriptedTransport, STAMP};
    use crate::transport::Method;
    use crate::{ApiClient, ApiError, NewSalaryPayment, SessionStore};

    fn signed_in(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport, MemoryStore> {
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        ApiClient::new(transport.clone(), SessionStore::new(storage))
    }

    #[tokio::test]
    async fn test_teachers_and_salary() {
        let transport = ScriptedTransport::new();
        let mut teacher = user_json("t1", "teacher");
        teacher["assigned_classes"] = json!("Class 1,Class 2");
        transport
            .on(Method::Get, "/teachers", 200, json!([teacher]))
            .on(
                Method::Post,
                "/teacher-salaries",
                200,
                json!({
                    "id": "p1", "teacher_id": "t1", "amount": 25000.0,
                    "remark": "June", "paid_at": STAMP, "created_at": STAMP
                }),
            );
        let api = signed_in(&transport);

        let teachers = api.teachers().await.unwrap();
        assert_eq!(teachers[0].assigned_class_list(), vec!["Class 1", "Class 2"]);

        let payment = api
            .pay_salary(&NewSalaryPayment {
                teacher_id: "t1".to_string(),
                amount: 25000.0,
                remark: Some("June".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(payment.amount, 25000.0);
    }

    #[tokio::test]
    async fn test_delete_self_is_rejected() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Delete, "/users/u1", 400, json!({ "detail": "Cannot delete yourself" }));
        let api = signed_in(&transport);

        let err = api.delete_user("u1").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    }
}

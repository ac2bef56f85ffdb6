use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{FeeBill, FeeStatus, MarkPaidRequest, NewFeeBill, StudentFee};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn fee_bills(&self) -> Result<Vec<FeeBill>, ApiError> {
        self.get("/fee-bills", Vec::new()).await
    }

    /// `POST /fee-bills`. The backend creates one unpaid obligation for every
    /// active student in the target class, or in all classes.
    pub async fn create_fee_bill(&self, bill: &NewFeeBill) -> Result<FeeBill, ApiError> {
        self.post("/fee-bills", bill).await
    }

    /// Obligations generated by one bill, optionally narrowed to a status.
    pub async fn fee_bill_students(
        &self,
        bill_id: &str,
        status: Option<FeeStatus>,
    ) -> Result<Vec<StudentFee>, ApiError> {
        let query = status
            .map(|s| vec![("status".to_string(), s.as_str().to_string())])
            .unwrap_or_default();
        self.get(&format!("/fee-bills/{bill_id}/students"), query).await
    }

    /// `PUT /student-fees/{id}/mark-paid`. Rejected if already paid.
    pub async fn mark_fee_paid(
        &self,
        fee_id: &str,
        request: &MarkPaidRequest,
    ) -> Result<StudentFee, ApiError> {
        self.put(&format!("/student-fees/{fee_id}/mark-paid"), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY};

    use crate::testing::{fee_bill_json, student_fee_json, ScriptedTransport};
    use crate::transport::Method;
    use crate::{ApiClient, FeeStatus, MarkPaidRequest, NewFeeBill, SessionStore};

    fn signed_in(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport, MemoryStore> {
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        ApiClient::new(transport.clone(), SessionStore::new(storage))
    }

    #[tokio::test]
    async fn test_create_fee_bill_body() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Post, "/fee-bills", 200, fee_bill_json("b1", "Term 1", None));
        let api = signed_in(&transport);

        let bill = NewFeeBill {
            name: "Term 1".to_string(),
            amount: 1500.0,
            description: None,
            target_class: None,
            due_date: None,
        };
        let created = api.create_fee_bill(&bill).await.unwrap();
        assert_eq!(created.target_label(), "All Classes");

        let sent = transport.requests_to(Method::Post, "/fee-bills");
        let body = sent[0].body.clone().unwrap();
        assert_eq!(body["name"], json!("Term 1"));
        assert_eq!(body["amount"], json!(1500.0));
    }

    #[tokio::test]
    async fn test_fee_bill_students_status_filter() {
        let transport = ScriptedTransport::new();
        transport.on(
            Method::Get,
            "/fee-bills/b1/students",
            200,
            json!([student_fee_json("f1", "s1", "Class 3", "unpaid")]),
        );
        let api = signed_in(&transport);

        let fees = api.fee_bill_students("b1", Some(FeeStatus::Unpaid)).await.unwrap();
        assert!(!fees[0].is_paid());
        api.fee_bill_students("b1", None).await.unwrap();

        let sent = transport.requests_to(Method::Get, "/fee-bills/b1/students");
        assert_eq!(sent[0].query, vec![("status".to_string(), "unpaid".to_string())]);
        assert!(sent[1].query.is_empty());
    }

    #[tokio::test]
    async fn test_mark_paid_twice_is_rejected() {
        let transport = ScriptedTransport::new();
        transport
            .on(
                Method::Put,
                "/student-fees/f1/mark-paid",
                200,
                student_fee_json("f1", "s1", "Class 3", "paid"),
            )
            .on(
                Method::Put,
                "/student-fees/f1/mark-paid",
                400,
                json!({ "detail": "Fee is already marked as paid" }),
            );
        let api = signed_in(&transport);
        let request = MarkPaidRequest {
            remarks: Some("cash".to_string()),
        };

        let paid = api.mark_fee_paid("f1", &request).await.unwrap();
        assert!(paid.is_paid());

        let err = api.mark_fee_paid("f1", &request).await.unwrap_err();
        assert_eq!(err.user_message("Failed"), "Fee is already marked as paid");
    }
}

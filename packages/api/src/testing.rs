//! Scripted transport for tests.
//!
//! Responses are registered per `(method, path)`. Each call pops the next
//! scripted response for its route; the last one stays in place so repeated
//! fetches keep answering. Every request is recorded for assertions.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

#[derive(Debug, Clone)]
enum Scripted {
    Reply(HttpResponse),
    Fail(String),
}

/// In-memory [`Transport`] answering from a script.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    routes: Arc<Mutex<HashMap<(Method, String), VecDeque<Scripted>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn on(&self, method: Method, path: &str, status: u16, body: serde_json::Value) -> &Self {
        self.push(
            method,
            path,
            Scripted::Reply(HttpResponse {
                status,
                body: body.to_string(),
            }),
        )
    }

    /// Fail `method path` at the transport level.
    pub fn fail(&self, method: Method, path: &str, reason: &str) -> &Self {
        self.push(method, path, Scripted::Fail(reason.to_string()))
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
        self
    }

    /// All requests sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests sent to one route.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());

        let key = (request.method, request.path.clone());
        let scripted = {
            let mut routes = self.routes.lock().unwrap();
            let queue = routes.get_mut(&key);
            match queue {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match scripted {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(reason)) => Err(ApiError::Network(reason)),
            None => Ok(HttpResponse {
                status: 404,
                body: serde_json::json!({ "detail": format!("no script for {:?} {}", key.0, key.1) })
                    .to_string(),
            }),
        }
    }
}

/// Fixed timestamp used by the JSON fixtures below.
pub const STAMP: &str = "2024-06-01T08:00:00Z";

/// A `UserInfo` body.
pub fn user_json(id: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id, "school_id": "s1", "email": format!("{id}@school.test"),
        "name": format!("User {id}"), "role": role, "created_at": STAMP
    })
}

/// An `AuthResponse` body for `head@school.test`.
pub fn auth_json(role: &str, token: &str) -> serde_json::Value {
    let mut user = user_json("u1", role);
    user["email"] = serde_json::json!("head@school.test");
    serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "user": user,
        "school": { "id": "s1", "name": "Greenfield Public School", "created_at": STAMP }
    })
}

/// A `Student` body.
pub fn student_json(id: &str, name: &str, class_name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id, "school_id": "s1", "class_name": class_name,
        "admission_number": format!("ADM-{id}"), "name": name,
        "parent_contact": "9876543210", "date_of_admission": "2024-04-01",
        "is_active": true, "created_at": STAMP
    })
}

/// A `StudentFee` body for bill `b1`.
pub fn student_fee_json(id: &str, student: &str, class_name: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id, "student_id": student, "fee_bill_id": "b1", "amount": 1500.0,
        "status": status, "created_at": STAMP,
        "student_name": format!("Student {student}"), "student_class": class_name,
        "fee_bill_name": "Term 1"
    })
}

/// A `FeeBill` body.
pub fn fee_bill_json(id: &str, name: &str, target_class: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": id, "school_id": "s1", "name": name, "amount": 1500.0,
        "target_class": target_class, "due_date": "2024-07-15", "created_at": STAMP
    })
}

/// An `AttendanceRecord` body.
pub fn attendance_json(student: &str, date: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": format!("a-{student}-{date}"), "student_id": student, "date": date,
        "status": status, "created_at": STAMP
    })
}

//! # API crate: typed gateway to the school backend
//!
//! Everything the dashboard knows about the backend lives here: the wire
//! models, the session that authorises requests, and the gateway that sends
//! them. The `ui` crate never builds a URL or reads a token itself.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`client`] | — | [`ApiClient`]: bearer attachment, 401 handling, response classification |
//! | [`config`] | — | [`ClientConfig`]: backend base URL and timeout (`scholify.toml` / env) |
//! | [`error`] | — | [`ApiError`] and the user-facing message for each failure |
//! | [`models`] | — | Request and response bodies (`serde` + `chrono`) |
//! | [`session`] | — | [`SessionStore`]: current user, school and token, mirrored to storage |
//! | [`transport`] | — | [`Transport`] trait and the `reqwest` implementation |
//! | [`testing`] | `test-support` | [`testing::ScriptedTransport`] and JSON fixtures |
//!
//! ## Endpoints
//!
//! Typed methods on [`ApiClient`], grouped by resource:
//!
//! - **Auth**: `login`, `register_school`, `me`, `sign_in`, `register_and_sign_in`
//! - **Students**: `classes`, `students`, `student`, `create_student`, `update_student`,
//!   `delete_student`, `student_fees`, `student_attendance`
//! - **Attendance**: `attendance`, `submit_attendance`
//! - **Fees**: `fee_bills`, `create_fee_bill`, `fee_bill_students`, `mark_fee_paid`
//! - **Notifications**: `notifications`, `create_notification`, `notification_contacts`
//! - **Teachers**: `teachers`, `create_teacher`, `delete_user`, `pay_salary`, `salary_history`
//! - **Dashboard**: `dashboard_stats`

pub mod client;
pub mod config;
mod endpoints;
pub mod error;
pub mod models;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod transport;

pub use client::{redirect_to_login, ApiClient};
pub use config::{ApiConfig, ClientConfig};
pub use error::ApiError;
pub use models::*;
pub use session::{SessionSnapshot, SessionStore};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

//! Typed endpoint methods on [`crate::ApiClient`], one module per resource.

mod attendance;
mod auth;
mod dashboard;
mod fees;
mod notifications;
mod students;
mod teachers;

//! This crate contains all shared UI for the workspace.
//!
//! | Module        | Purpose                                                   |
//! |---------------|-----------------------------------------------------------|
//! | `access`      | Route access levels, the guard decision, navigation items |
//! | `auth`        | Client and session context, sign-in and sign-out          |
//! | `attendance`  | Daily attendance sheets for one class                     |
//! | `fees`        | Fee bills, the per-bill ledger and settlement             |
//! | `forms`       | Form drafts and their validation                          |
//! | `students`    | Roster grouping and student profiles                      |
//! | `toast`       | Transient success and error notifications                 |
//! | `views`       | One component per page, plus the navigation frame         |
//!
//! Views never hold a router type: they report navigation as plain paths
//! and the platform package maps those onto its routes.

pub mod access;
pub mod attendance;
pub mod components;
pub mod fees;
pub mod forms;
pub mod students;
pub mod views;

mod platform;
pub use platform::{make_client, make_storage, AppClient, PlatformStorage};

mod auth;
pub use auth::{use_auth, use_client, AuthProvider, AuthState, LogoutButton};

mod toast;
pub use toast::{use_feedback, use_toasts, Feedback, Toast, ToastKind, ToastProvider, ToastQueue};

pub use access::{Access, Destination, Gate};

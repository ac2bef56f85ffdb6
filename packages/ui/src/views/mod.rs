mod shell;
pub use shell::Shell;

mod login;
pub use login::LoginView;

mod register;
pub use register::RegisterView;

mod dashboard;
pub use dashboard::DashboardView;

mod students;
pub use students::StudentsView;

mod admission;
pub use admission::AdmissionView;

mod student_detail;
pub use student_detail::StudentDetailView;

mod teachers;
pub use teachers::TeachersView;

mod attendance;
pub use attendance::AttendanceView;

mod fees;
pub use fees::FeesView;

mod notifications;
pub use notifications::NotificationsView;

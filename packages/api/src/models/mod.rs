//! Wire models shared by the gateway client and the UI.

mod attendance;
mod dashboard;
mod fee;
mod notification;
mod student;
mod teacher;
mod user;

pub use attendance::{AttendanceBatch, AttendanceMark, AttendanceRecord, AttendanceStatus};
pub use dashboard::DashboardStats;
pub use fee::{FeeBill, FeeStatus, MarkPaidRequest, NewFeeBill, StudentFee};
pub use notification::{Contact, ContactList, NewNotification, Notification};
pub use student::{class_number, ClassList, NewStudent, Student, StudentQuery, StudentUpdate};
pub use teacher::{NewSalaryPayment, NewTeacher, SalaryPayment};
pub use user::{AuthResponse, LoginRequest, RegisterSchoolRequest, Role, SchoolInfo, UserInfo};

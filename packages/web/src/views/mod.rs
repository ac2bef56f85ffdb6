mod auth;
pub use auth::{Login, Register};

mod school;
pub use school::{
    Admission, Attendance, Dashboard, Fees, NotFound, Notifications, StudentDetail, Students,
    Teachers,
};

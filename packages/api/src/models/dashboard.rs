use serde::{Deserialize, Serialize};

/// Summary figures for the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub total_students: u32,
    pub total_classes: u32,
    pub pending_fees: u32,
    /// Percentage of today's records marked present, one decimal.
    pub today_attendance_rate: f64,
    /// Admissions in the last 30 days.
    pub recent_admissions: u32,
}

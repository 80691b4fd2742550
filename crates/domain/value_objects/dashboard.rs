use serde::Serialize;

/// Alert buckets. A member lands in at most one of `expired`/`expiring_soon`.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DashboardAlertsDto {
    pub expired: i64,
    pub expiring_soon: i64,
    pub pending_payments: i64,
    pub pending_total: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DashboardSummaryDto {
    pub total_members: i64,
    pub active_members: i64,
    pub checked_in_now: i64,
    pub monthly_revenue: i64,
    pub alerts: DashboardAlertsDto,
}

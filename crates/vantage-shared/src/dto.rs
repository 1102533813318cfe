//! Data transfer objects for gateway responses.

use serde::{Deserialize, Serialize};

/// Who the gateway resolved for this request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: String,
}

/// Aggregate figures shown on the public dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub title: String,
    pub viewer_role: String,
    pub report_count: u64,
}

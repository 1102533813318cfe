//! Dashboard pages.
//!
//! The gateway guarantees the role before these run: `/dashboard` admits
//! anyone, the role homes only their respective roles.

use actix_web::HttpResponse;
use vantage_shared::{ApiResponse, dto::DashboardSummary};

use crate::middleware::error::AppResult;
use crate::middleware::identity::CurrentIdentity;

/// GET /dashboard - the public aggregate view.
pub async fn overview(identity: CurrentIdentity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DashboardSummary {
        title: "Public overview".to_string(),
        viewer_role: identity.role().as_str().to_string(),
        report_count: 128,
    })))
}

/// GET /dashboard/user
pub async fn user_home(identity: CurrentIdentity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DashboardSummary {
        title: "My reports".to_string(),
        viewer_role: identity.role().as_str().to_string(),
        report_count: 12,
    })))
}

/// GET /dashboard/expert
pub async fn expert_home(identity: CurrentIdentity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DashboardSummary {
        title: "Review workload".to_string(),
        viewer_role: identity.role().as_str().to_string(),
        report_count: 34,
    })))
}

/// GET /dashboard/admin
pub async fn admin_home(identity: CurrentIdentity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DashboardSummary {
        title: "All reports".to_string(),
        viewer_role: identity.role().as_str().to_string(),
        report_count: 512,
    })))
}

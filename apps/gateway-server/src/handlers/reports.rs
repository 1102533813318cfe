//! Report and survey endpoints guarded by rate-limited rules.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use vantage_shared::ApiResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::identity::CurrentIdentity;

#[derive(Debug, Serialize)]
pub struct ReportMeta {
    pub id: u64,
    pub title: String,
}

/// GET /api/reports
pub async fn list_reports(identity: CurrentIdentity) -> AppResult<HttpResponse> {
    tracing::debug!(role = identity.role().as_str(), "listing reports");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(vec![
        ReportMeta {
            id: 1,
            title: "Weekly engagement".to_string(),
        },
        ReportMeta {
            id: 2,
            title: "Quarterly rollup".to_string(),
        },
    ])))
}

#[derive(Debug, Deserialize)]
pub struct SurveySubmission {
    pub answers: Vec<String>,
}

/// POST /survey
pub async fn submit_survey(body: web::Json<SurveySubmission>) -> AppResult<HttpResponse> {
    let submission = body.into_inner();
    if submission.answers.is_empty() {
        return Err(AppError::BadRequest("Survey has no answers".to_string()));
    }
    Ok(HttpResponse::Created().json(ApiResponse::ok(submission.answers.len())))
}

/// GET /expert/review
pub async fn review_queue(identity: CurrentIdentity) -> AppResult<HttpResponse> {
    tracing::debug!(role = identity.role().as_str(), "loading review queue");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(vec![
        ReportMeta {
            id: 7,
            title: "Pending expert review".to_string(),
        },
    ])))
}

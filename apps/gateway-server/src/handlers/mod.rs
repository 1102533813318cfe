//! HTTP handlers and route configuration.
//!
//! The interesting work happens in the gateway middleware before any of
//! these run; the handlers here are the thin pages and endpoints it guards.

mod dashboard;
mod health;
mod pages;
mod reports;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/dashboard")
                .route("", web::get().to(dashboard::overview))
                .route("/user", web::get().to(dashboard::user_home))
                .route("/expert", web::get().to(dashboard::expert_home))
                .route("/admin", web::get().to(dashboard::admin_home)),
        )
        .route("/expert/review", web::get().to(reports::review_queue))
        .route("/survey", web::post().to(reports::submit_survey))
        .route("/api/reports", web::get().to(reports::list_reports))
        .route("/api/session", web::get().to(pages::session_info))
        .route("/auth/login", web::get().to(pages::login))
        .route("/unauthorized", web::get().to(pages::unauthorized));
}

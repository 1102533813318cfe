//! Identity extractor - reads what the gateway middleware attached.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use vantage_core::domain::{Identity, Role};

/// Resolved caller for the current request.
///
/// The gateway middleware resolves the identity once per request and
/// attaches it to the request; handlers use this instead of re-resolving:
/// ```ignore
/// async fn my_reports(identity: CurrentIdentity) -> impl Responder {
///     format!("reports for {}", identity.role().as_str())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl CurrentIdentity {
    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl FromRequest for CurrentIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Absent only when a route is served without the gateway wrapped
        // around it; treat that caller as anonymous.
        let identity = req
            .extensions()
            .get::<Identity>()
            .cloned()
            .unwrap_or_else(Identity::anonymous);
        ready(Ok(CurrentIdentity(identity)))
    }
}

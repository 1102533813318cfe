//! Gateway middleware - runs the decision engine on every request.
//!
//! Exactly one outcome per request: pass-through (with the resolved
//! identity attached), a redirect, or a 429. Handlers behind it never
//! re-implement authorization for prefixes the route table covers.

use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use vantage_core::gateway::{Decision, GatewayDecisionEngine, GatewayRequest};
use vantage_shared::ErrorResponse;

/// Name of the session cookie issued by the identity platform. The gateway
/// only reads it; issuance and refresh stay upstream.
pub const SESSION_COOKIE: &str = "vantage_session";

/// Where to send callers the gateway turns away.
#[derive(Debug, Clone)]
pub struct RedirectPaths {
    pub login: String,
    pub unauthorized: String,
}

/// Gateway middleware factory.
pub struct GatewayMiddleware {
    engine: Arc<GatewayDecisionEngine>,
    redirects: Arc<RedirectPaths>,
}

impl GatewayMiddleware {
    pub fn new(engine: Arc<GatewayDecisionEngine>, redirects: RedirectPaths) -> Self {
        Self {
            engine,
            redirects: Arc::new(redirects),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for GatewayMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = GatewayMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GatewayMiddlewareService {
            service: Rc::new(service),
            engine: self.engine.clone(),
            redirects: self.redirects.clone(),
        }))
    }
}

pub struct GatewayMiddlewareService<S> {
    service: Rc<S>,
    engine: Arc<GatewayDecisionEngine>,
    redirects: Arc<RedirectPaths>,
}

impl<S, B> Service<ServiceRequest> for GatewayMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let engine = self.engine.clone();
        let redirects = self.redirects.clone();

        Box::pin(async move {
            let session_token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
            let peer_addr = req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("unknown")
                .to_string();

            let decision = engine
                .decide(GatewayRequest {
                    path: req.path(),
                    peer_addr: &peer_addr,
                    session_token: session_token.as_deref(),
                })
                .await;

            match decision {
                Decision::Continue { identity } => {
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Decision::RedirectToLogin { return_to } => {
                    let query =
                        serde_urlencoded::to_string([("return_to", return_to.as_str())])
                            .unwrap_or_default();
                    let target = format!("{}?{}", redirects.login, query);
                    Ok(short_circuit(req, see_other(&target)))
                }
                Decision::RedirectToRoleHome { target } => {
                    Ok(short_circuit(req, see_other(&target)))
                }
                Decision::RedirectToUnauthorized => {
                    Ok(short_circuit(req, see_other(&redirects.unauthorized)))
                }
                Decision::RateLimited { retry_after } => {
                    let secs = retry_after.as_secs().max(1);
                    let error = ErrorResponse::too_many_requests(format!(
                        "Rate limit exceeded. Try again in {} seconds.",
                        secs
                    ));
                    let response = HttpResponse::TooManyRequests()
                        .insert_header(("X-RateLimit-Remaining", "0"))
                        .insert_header(("Retry-After", secs.to_string()))
                        .json(error);
                    Ok(short_circuit(req, response))
                }
            }
        })
    }
}

fn see_other(target: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, target))
        .finish()
}

fn short_circuit<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    let (http_req, _payload) = req.into_parts();
    ServiceResponse::new(http_req, response).map_into_right_body()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::{App, test, web};
    use jsonwebtoken::{EncodingKey, Header};
    use serde::Serialize;
    use std::time::Duration;

    use vantage_core::domain::{RateLimitPolicy, Role, RouteRule, RouteTable};
    use vantage_core::gateway::IdentityResolver;
    use vantage_infra::{
        FixedWindowLimiter, InMemoryProfileStore, JwtSessionProvider, SessionConfig,
    };

    const SECRET: &str = "gateway-test-secret";
    const ISSUER: &str = "test-issuer";

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        email: String,
        exp: i64,
        iss: String,
    }

    fn mint(sub: &str, email: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
            iss: ISSUER.to_string(),
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn engine() -> Arc<GatewayDecisionEngine> {
        let config = SessionConfig {
            secret: SECRET.to_string(),
            issuer: ISSUER.to_string(),
        };
        let sessions = Arc::new(JwtSessionProvider::new(&config));

        let profiles = InMemoryProfileStore::new();
        profiles
            .insert("admin-1", "admin@example.com", Role::Admin)
            .await;
        profiles
            .insert("expert-1", "expert@example.com", Role::Expert)
            .await;

        let routes = RouteTable::new(vec![
            RouteRule::new("/dashboard/admin", &[Role::Admin]),
            RouteRule::new("/dashboard", &[Role::User, Role::Expert, Role::Admin]),
            RouteRule::new("/expert", &[Role::Expert, Role::Admin])
                .with_limit(RateLimitPolicy::new(1, Duration::from_secs(60))),
        ]);

        let resolver = IdentityResolver::new(sessions, Arc::new(profiles));
        Arc::new(GatewayDecisionEngine::new(
            resolver,
            routes,
            Arc::new(FixedWindowLimiter::new()),
        ))
    }

    fn redirects() -> RedirectPaths {
        RedirectPaths {
            login: "/auth/login".to_string(),
            unauthorized: "/unauthorized".to_string(),
        }
    }

    macro_rules! test_app {
        ($engine:expr) => {
            test::init_service(
                App::new()
                    .wrap(GatewayMiddleware::new($engine, redirects()))
                    .route("/public", web::get().to(HttpResponse::Ok))
                    .route("/dashboard", web::get().to(HttpResponse::Ok))
                    .route("/dashboard/user", web::get().to(HttpResponse::Ok))
                    .route("/dashboard/admin", web::get().to(HttpResponse::Ok))
                    .route("/expert/review", web::get().to(HttpResponse::Ok)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn public_route_passes_without_session() {
        let app = test_app!(engine().await);
        let res = test::call_service(&app, test::TestRequest::get().uri("/public").to_request())
            .await;
        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn anonymous_restricted_request_redirects_to_login_with_return_to() {
        let app = test_app!(engine().await);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/dashboard/user").to_request(),
        )
        .await;

        assert_eq!(res.status(), 303);
        let location = res.headers().get(header::LOCATION).unwrap();
        assert_eq!(location, "/auth/login?return_to=%2Fdashboard%2Fuser");
    }

    #[actix_web::test]
    async fn bare_dashboard_redirects_admin_to_role_home() {
        let app = test_app!(engine().await);
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/dashboard")
                .cookie(Cookie::new(SESSION_COOKIE, mint("admin-1", "admin@example.com")))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 303);
        let location = res.headers().get(header::LOCATION).unwrap();
        assert_eq!(location, "/dashboard/admin");
    }

    #[actix_web::test]
    async fn bare_dashboard_serves_anonymous_callers() {
        let app = test_app!(engine().await);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/dashboard").to_request(),
        )
        .await;
        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn insufficient_role_redirects_to_unauthorized() {
        let app = test_app!(engine().await);
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/dashboard/admin")
                .cookie(Cookie::new(
                    SESSION_COOKIE,
                    mint("expert-1", "expert@example.com"),
                ))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), 303);
        let location = res.headers().get(header::LOCATION).unwrap();
        assert_eq!(location, "/unauthorized");
    }

    #[actix_web::test]
    async fn exhausted_quota_returns_429_with_retry_hint() {
        let app = test_app!(engine().await);
        let cookie = Cookie::new(SESSION_COOKIE, mint("expert-1", "expert@example.com"));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/expert/review")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/expert/review")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), 429);
        assert!(res.headers().contains_key(header::RETRY_AFTER));
    }
}

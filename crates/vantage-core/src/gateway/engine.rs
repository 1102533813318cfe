//! The per-request decision engine.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Identity, RouteTable, normalize_path};
use crate::ports::RateLimiter;

use super::resolver::IdentityResolver;

/// Everything the engine needs to know about an inbound request.
#[derive(Debug, Clone)]
pub struct GatewayRequest<'a> {
    pub path: &'a str,
    pub peer_addr: &'a str,
    pub session_token: Option<&'a str>,
}

/// Terminal outcome of the gateway for one request. Exactly one is emitted
/// per request; none of the underlying failures propagate past it.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Request proceeds; the resolved identity travels with it so handlers
    /// never re-resolve.
    Continue { identity: Identity },
    /// No identity on a restricted route. `return_to` carries the
    /// originally requested path.
    RedirectToLogin { return_to: String },
    /// Bare dashboard request from an authenticated caller.
    RedirectToRoleHome { target: String },
    /// Identity present but the role is not allowed, or a collaborator
    /// failed on a restricted route (deny-by-default).
    RedirectToUnauthorized,
    /// Quota exhausted; retry after the window resets.
    RateLimited { retry_after: Duration },
}

/// The public aggregate view; resolved before generic rule matching.
const DASHBOARD_HOME: &str = "/dashboard";

/// Orchestrates identity resolution, route classification, and quota
/// enforcement for each request.
pub struct GatewayDecisionEngine {
    resolver: IdentityResolver,
    routes: RouteTable,
    limiter: Arc<dyn RateLimiter>,
}

impl GatewayDecisionEngine {
    pub fn new(
        resolver: IdentityResolver,
        routes: RouteTable,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            resolver,
            routes,
            limiter,
        }
    }

    pub async fn decide(&self, req: GatewayRequest<'_>) -> Decision {
        let path = normalize_path(req.path);

        // Bare /dashboard diverges from every other protected prefix:
        // anonymous callers get the public aggregate view, authenticated
        // callers are sent to their role home.
        if path == DASHBOARD_HOME {
            return match self.resolver.resolve(req.session_token).await {
                Ok(identity) if identity.is_anonymous() => Decision::Continue { identity },
                Ok(identity) => Decision::RedirectToRoleHome {
                    target: identity.role.home_path().to_string(),
                },
                // The bare dashboard admits anonymous callers, so a failed
                // resolution degrades to anonymous instead of denying.
                Err(err) => {
                    tracing::warn!(%err, "identity resolution failed on public dashboard");
                    Decision::Continue {
                        identity: Identity::anonymous(),
                    }
                }
            };
        }

        let Some(rule) = self.routes.classify(path) else {
            // Unrestricted: still resolve best-effort so downstream handlers
            // can personalize, but never block on a collaborator failure.
            let identity = match self.resolver.resolve(req.session_token).await {
                Ok(identity) => identity,
                Err(err) => {
                    tracing::warn!(%err, path, "degrading to anonymous on unrestricted route");
                    Identity::anonymous()
                }
            };
            return Decision::Continue { identity };
        };

        let identity = match self.resolver.resolve(req.session_token).await {
            Ok(identity) => identity,
            Err(err) => {
                // Deny by default: an undetermined role never grants access.
                tracing::warn!(%err, path, "identity resolution failed on restricted route");
                return Decision::RedirectToUnauthorized;
            }
        };

        if !rule.allows(identity.role) {
            if identity.is_anonymous() {
                return Decision::RedirectToLogin {
                    return_to: path.to_string(),
                };
            }
            tracing::debug!(path, role = ?identity.role, "role not permitted for route");
            return Decision::RedirectToUnauthorized;
        }

        if let Some(policy) = &rule.limit {
            let key = identity.rate_limit_key(req.peer_addr);
            let check = self.limiter.allow(&key, policy).await;
            if !check.allowed {
                tracing::warn!(%key, path, "request quota exceeded");
                return Decision::RateLimited {
                    retry_after: check.reset_after,
                };
            }
        }

        Decision::Continue { identity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RateLimitPolicy, Role, RouteRule};
    use crate::error::CollaboratorError;
    use crate::ports::{ProfileStore, RateLimitDecision, SessionProvider, Subject};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Sessions(Result<Option<Subject>, ()>);

    #[async_trait]
    impl SessionProvider for Sessions {
        async fn current_subject(
            &self,
            _token: Option<&str>,
        ) -> Result<Option<Subject>, CollaboratorError> {
            match &self.0 {
                Ok(subject) => Ok(subject.clone()),
                Err(()) => Err(CollaboratorError::Unavailable("identity provider".into())),
            }
        }
    }

    struct Profiles(Result<Option<Role>, ()>);

    #[async_trait]
    impl ProfileStore for Profiles {
        async fn find_role(
            &self,
            _id: &str,
            _email: &str,
        ) -> Result<Option<Role>, CollaboratorError> {
            match &self.0 {
                Ok(role) => Ok(*role),
                Err(()) => Err(CollaboratorError::Unavailable("profile store".into())),
            }
        }
    }

    /// Admits the first `max` calls, then denies.
    struct CountingLimiter {
        calls: AtomicU32,
    }

    impl CountingLimiter {
        fn new() -> Self {
            Self {
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl RateLimiter for CountingLimiter {
        async fn allow(&self, _key: &str, policy: &RateLimitPolicy) -> RateLimitDecision {
            let used = self.calls.fetch_add(1, Ordering::SeqCst);
            let allowed = used < policy.max_requests;
            RateLimitDecision {
                allowed,
                remaining: policy.max_requests.saturating_sub(used + 1),
                reset_after: policy.window,
            }
        }
    }

    fn routes() -> RouteTable {
        RouteTable::new(vec![
            RouteRule::new("/dashboard/admin", &[Role::Admin]),
            RouteRule::new("/dashboard/expert", &[Role::Expert, Role::Admin]),
            RouteRule::new("/dashboard", &[Role::User, Role::Expert, Role::Admin]),
            RouteRule::new("/expert", &[Role::Expert]).with_limit(RateLimitPolicy::EXPERT),
            RouteRule::new(
                "/auth",
                &[Role::Anonymous, Role::User, Role::Expert, Role::Admin],
            )
            .with_limit(RateLimitPolicy::AUTH),
        ])
    }

    fn engine(
        session: Result<Option<Subject>, ()>,
        profile: Result<Option<Role>, ()>,
    ) -> GatewayDecisionEngine {
        let resolver =
            IdentityResolver::new(Arc::new(Sessions(session)), Arc::new(Profiles(profile)));
        GatewayDecisionEngine::new(resolver, routes(), Arc::new(CountingLimiter::new()))
    }

    fn subject() -> Subject {
        Subject {
            id: "u-7".into(),
            email: "seven@example.com".into(),
        }
    }

    fn request(path: &str) -> GatewayRequest<'_> {
        GatewayRequest {
            path,
            peer_addr: "10.0.0.9",
            session_token: Some("token"),
        }
    }

    #[tokio::test]
    async fn unrestricted_path_continues_without_identity() {
        let engine = engine(Ok(None), Ok(None));
        let decision = engine.decide(request("/about")).await;
        assert_eq!(
            decision,
            Decision::Continue {
                identity: Identity::anonymous()
            }
        );
    }

    #[tokio::test]
    async fn anonymous_on_restricted_path_redirects_to_login() {
        let engine = engine(Ok(None), Ok(None));
        let decision = engine.decide(request("/dashboard/user?tab=1")).await;
        assert_eq!(
            decision,
            Decision::RedirectToLogin {
                return_to: "/dashboard/user".into()
            }
        );
    }

    #[tokio::test]
    async fn insufficient_role_redirects_to_unauthorized() {
        let engine = engine(Ok(Some(subject())), Ok(Some(Role::Expert)));
        let decision = engine.decide(request("/dashboard/admin")).await;
        assert_eq!(decision, Decision::RedirectToUnauthorized);
    }

    #[tokio::test]
    async fn bare_dashboard_is_public_for_anonymous() {
        let engine = engine(Ok(None), Ok(None));
        let decision = engine.decide(request("/dashboard")).await;
        assert_eq!(
            decision,
            Decision::Continue {
                identity: Identity::anonymous()
            }
        );
    }

    #[tokio::test]
    async fn bare_dashboard_redirects_admin_to_role_home() {
        let engine = engine(Ok(Some(subject())), Ok(Some(Role::Admin)));
        let decision = engine.decide(request("/dashboard")).await;
        assert_eq!(
            decision,
            Decision::RedirectToRoleHome {
                target: "/dashboard/admin".into()
            }
        );
    }

    #[tokio::test]
    async fn bare_dashboard_redirects_default_role_to_user_home() {
        let engine = engine(Ok(Some(subject())), Ok(None));
        let decision = engine.decide(request("/dashboard")).await;
        assert_eq!(
            decision,
            Decision::RedirectToRoleHome {
                target: "/dashboard/user".into()
            }
        );
    }

    #[tokio::test]
    async fn collaborator_failure_on_bare_dashboard_serves_public_view() {
        let engine = engine(Err(()), Ok(None));
        let decision = engine.decide(request("/dashboard")).await;
        assert_eq!(
            decision,
            Decision::Continue {
                identity: Identity::anonymous()
            }
        );
    }

    #[tokio::test]
    async fn collaborator_failure_on_restricted_route_denies() {
        let engine = engine(Ok(Some(subject())), Err(()));
        let decision = engine.decide(request("/expert/review")).await;
        assert_eq!(decision, Decision::RedirectToUnauthorized);
    }

    #[tokio::test]
    async fn collaborator_failure_on_unrestricted_route_continues() {
        let engine = engine(Err(()), Ok(None));
        let decision = engine.decide(request("/about")).await;
        assert_eq!(
            decision,
            Decision::Continue {
                identity: Identity::anonymous()
            }
        );
    }

    #[tokio::test]
    async fn matching_role_passes_and_quota_eventually_denies() {
        let engine = engine(Ok(Some(subject())), Ok(Some(Role::Expert)));
        for _ in 0..RateLimitPolicy::EXPERT.max_requests {
            let decision = engine.decide(request("/expert/review")).await;
            assert!(matches!(decision, Decision::Continue { .. }));
        }
        let decision = engine.decide(request("/expert/review")).await;
        assert_eq!(
            decision,
            Decision::RateLimited {
                retry_after: RateLimitPolicy::EXPERT.window
            }
        );
    }

    #[tokio::test]
    async fn anonymous_rule_admits_unauthenticated_callers() {
        let engine = engine(Ok(None), Ok(None));
        let decision = engine.decide(request("/auth/login")).await;
        assert!(matches!(decision, Decision::Continue { .. }));
    }
}

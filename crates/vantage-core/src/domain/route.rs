//! Route rules and the ordered classification table.

use super::identity::Role;
use super::rate_limit::RateLimitPolicy;

/// A path-prefix-to-allowed-roles binding, optionally carrying the rate
/// limit policy applied once the role check passes.
///
/// Prefixes are matched literally against the normalized request path, not
/// as glob patterns.
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub prefix: String,
    pub allowed_roles: Vec<Role>,
    pub limit: Option<RateLimitPolicy>,
}

impl RouteRule {
    pub fn new(prefix: impl Into<String>, allowed_roles: &[Role]) -> Self {
        Self {
            prefix: prefix.into(),
            allowed_roles: allowed_roles.to_vec(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.limit = Some(policy);
        self
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

/// Ordered, first-match-wins route table.
///
/// Insertion order is priority: a more specific prefix (`/dashboard/admin`)
/// must be listed before a general one that would shadow it (`/dashboard`).
/// Loaded once at startup, immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        // Surface rules made unreachable by an earlier, broader prefix.
        for (i, rule) in rules.iter().enumerate() {
            if let Some(earlier) = rules[..i].iter().find(|e| rule.prefix.starts_with(&e.prefix)) {
                tracing::warn!(
                    shadowed = %rule.prefix,
                    by = %earlier.prefix,
                    "route rule is unreachable; list more specific prefixes first"
                );
            }
        }
        Self { rules }
    }

    /// First rule whose prefix is a literal prefix of the normalized path.
    /// `None` means the route is unrestricted. Pure function of the path
    /// and the table.
    pub fn classify(&self, path: &str) -> Option<&RouteRule> {
        let path = normalize_path(path);
        self.rules
            .iter()
            .find(|rule| path.starts_with(rule.prefix.as_str()))
    }
}

/// Drop any query string and trim trailing slashes, keeping the root.
pub fn normalize_path(path: &str) -> &str {
    let path = path.split('?').next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use vantage_core::domain::{RateLimitPolicy, Role, RouteRule, RouteTable};
use vantage_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub login_path: String,
    pub unauthorized_path: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env_parse("DB_MAX_CONNECTIONS", 100),
            min_connections: env_parse("DB_MIN_CONNECTIONS", 10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_parse("PORT", 8080),
            database,
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/auth/login".to_string()),
            unauthorized_path: env::var("UNAUTHORIZED_PATH")
                .unwrap_or_else(|_| "/unauthorized".to_string()),
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// The gateway's route rules.
///
/// First prefix match wins, so more specific prefixes come first. Built
/// once at startup and immutable thereafter. Bare `/dashboard` is handled
/// by the engine before this table is consulted.
pub fn route_table() -> RouteTable {
    use Role::{Admin, Anonymous, Expert, User};

    RouteTable::new(vec![
        RouteRule::new("/dashboard/admin", &[Admin]),
        RouteRule::new("/dashboard/expert", &[Expert, Admin]),
        RouteRule::new("/dashboard", &[User, Expert, Admin]),
        RouteRule::new("/expert", &[Expert, Admin]).with_limit(RateLimitPolicy::EXPERT),
        RouteRule::new("/survey", &[User, Expert, Admin]).with_limit(RateLimitPolicy::SURVEY),
        RouteRule::new("/auth", &[Anonymous, User, Expert, Admin])
            .with_limit(RateLimitPolicy::AUTH),
        RouteRule::new("/api/reports", &[User, Expert, Admin]).with_limit(RateLimitPolicy::API),
    ])
}

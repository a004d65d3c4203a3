use anyhow::Context;
use serde::Deserialize;

/// Longest accepted token lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Allowed browser origin; `None` means permissive CORS.
    pub cors_origin: Option<String>,
    /// Create the default admin/user accounts and sample items on startup.
    pub seed_defaults: bool,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET must be set")?;

        let ttl_minutes = match lookup("JWT_TTL_MINUTES") {
            Some(v) => v
                .parse::<i64>()
                .with_context(|| format!("invalid JWT_TTL_MINUTES: {v}"))?,
            None => 60 * 24,
        };
        anyhow::ensure!(
            (1..=MAX_TTL_MINUTES).contains(&ttl_minutes),
            "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}"
        );

        let port = match lookup("APP_PORT").or_else(|| lookup("PORT")) {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("invalid APP_PORT: {v}"))?,
            None => 3001,
        };

        let seed_defaults = match lookup("SEED_DEFAULTS").as_deref() {
            None => true,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => anyhow::bail!("invalid SEED_DEFAULTS: {other}"),
        };

        Ok(Self {
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            cors_origin: lookup("CORS_ORIGIN").filter(|s| !s.is_empty()),
            seed_defaults,
            jwt: JwtConfig {
                secret,
                ttl_minutes,
            },
        })
    }
}

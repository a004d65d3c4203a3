use std::sync::Arc;

use anyhow::Context;

use crate::auth::{
    jwt::JwtKeys,
    repo::{InMemoryUserStore, UserStore},
    services::seed_default_users,
};
use crate::config::AppConfig;
use crate::items::repo::{InMemoryItemStore, ItemStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
    pub users: Arc<dyn UserStore>,
    pub items: Arc<dyn ItemStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Self::from_config(config).await
    }

    /// Builds in-memory stores and, when enabled, seeds the default accounts
    /// and sample items. A seeding failure aborts startup.
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let users = Arc::new(InMemoryUserStore::new());
        let items = if config.seed_defaults {
            seed_default_users(users.as_ref())
                .await
                .context("seed default users")?;
            InMemoryItemStore::with_samples()
        } else {
            InMemoryItemStore::new()
        };

        Ok(Self::from_parts(
            Arc::new(config),
            users,
            Arc::new(items),
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        items: Arc<dyn ItemStore>,
    ) -> Self {
        let jwt = JwtKeys::from_config(&config.jwt);
        Self {
            config,
            jwt,
            users,
            items,
        }
    }

    #[cfg(test)]
    pub async fn for_tests() -> Self {
        use crate::config::JwtConfig;

        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origin: None,
            seed_defaults: true,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                ttl_minutes: 60 * 24,
            },
        };
        Self::from_config(config)
            .await
            .expect("seeded test state")
    }
}

mod app;
mod auth;
mod config;
mod error;
mod items;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "itemdesk=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = match state::AppState::init().await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "startup failed");
            return Err(e);
        }
    };
    let (host, port) = (app_state.config.host.clone(), app_state.config.port);
    if app_state.config.seed_defaults {
        tracing::info!("default accounts: admin@example.com, user@example.com");
    }

    let app = app::build_app(app_state)?;
    app::serve(app, &host, port).await
}

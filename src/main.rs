mod app;
mod coach;
mod config;
mod drive;
mod error;
#[cfg(test)]
mod http_stub;
mod llm;
mod records;
mod state;
mod sync;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "ketovital=debug,axum=info,tower_http=info".to_string());
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

    let app_state = state::AppState::init()?;
    tracing::info!(
        folder = %app_state.config.drive.folder_name,
        file = %app_state.config.drive.file_name,
        "KetoVital backend starting"
    );

    let host = app_state.config.host.clone();
    let port = app_state.config.port;
    let app = app::build_app(app_state);

    app::serve(app, &host, port).await
}

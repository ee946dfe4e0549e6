use increase_round_up::app_state::AppState;
use increase_round_up::config::{ConfigLoader, Settings};
use increase_round_up::handlers::{app, request_timeout};
use increase_round_up::increase::IncreaseApi;
use tokio::signal;
use tracing::{error, info, warn, Level};

#[tokio::main]
async fn main() {
    let settings = Settings::from_env();

    // initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(settings.as_ref().map(|s| s.log_level).unwrap_or(Level::INFO))
        .init();

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!("Error reading settings: {:#?}", e);
            return;
        }
    };

    // init Increase APIs caller
    let increase_api = IncreaseApi::new(&settings.increase_base_url, settings.http_timeout);
    let increase_api = match increase_api {
        Ok(api) => api,
        Err(e) => {
            error!("Error creating IncreaseApi: {:#?}", e);
            return;
        }
    };

    let secrets_client = match reqwest::Client::builder()
        .timeout(settings.http_timeout)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!("Error creating secrets client: {:#?}", e);
            return;
        }
    };

    info!("Increase API at {}.", increase_api.base_url());

    // App State
    let app_state = AppState {
        config: ConfigLoader::new(settings.secret_source.clone(), secrets_client),
        increase_api,
    };

    // load the secret once up front, requests retry if this fails
    if let Err(e) = app_state.config.get().await {
        warn!("Configuration not loaded at startup: {}", e);
    }

    let app = app(app_state, request_timeout(settings.http_timeout));

    let address = format!("{}:{}", settings.bind_address, settings.port);
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Error binding {}: {:#?}", address, e);
            return;
        }
    };
    info!("Listening on {}.", address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {:#?}", e);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down.");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down.");
        },
    }
}

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use constat_backend::config::{DatabaseConfig, EnvironmentConfig};
use constat_backend::events::{log_payload, spawn_consumer, EventBus, Queue};
use constat_backend::middleware::cors_layer;
use constat_backend::routes::{
    self, ACCIDENT_SERVICE_PREFIX, AUTH_SERVICE_PREFIX, INSURANCE_SERVICE_PREFIX,
    VEHICLE_SERVICE_PREFIX,
};
use constat_backend::services::JwtConfig;
use constat_backend::{database, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;
    info!("Constat service starting ({})", config.environment);

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_environment(&config);
    let pool = match database::connect(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Error connecting to the database: {}", e);
            return Err(anyhow::anyhow!("database error: {}", e));
        }
    };
    database::run_migrations(&pool)
        .await
        .context("failed to apply migrations")?;

    // Colas de eventos y sus consumidores
    let mut bus = EventBus::new();
    for queue in Queue::ALL {
        if let Some(receiver) = bus.take_receiver(queue) {
            spawn_consumer(queue, receiver, log_payload(queue));
        }
    }

    let jwt = JwtConfig::new(config.jwt_secret.clone(), config.jwt_refresh_secret.clone());
    let app_state = AppState::new(pool, jwt, config.bcrypt_cost, bus.publisher());

    let app = routes::create_router(app_state).layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_url()))?;

    info!("Constat service running on {}", addr);
    info!("Health check available at http://{}/health", addr);
    for prefix in [
        VEHICLE_SERVICE_PREFIX,
        INSURANCE_SERVICE_PREFIX,
        ACCIDENT_SERVICE_PREFIX,
        AUTH_SERVICE_PREFIX,
    ] {
        info!("Service available at {}/", prefix);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {}", e);
            e
        })?;

    info!("Server shutdown complete");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("Termination signal received, shutting down...");
        },
    }
}

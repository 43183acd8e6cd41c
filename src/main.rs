use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use courier_route_planner::config::EnvironmentConfig;
use courier_route_planner::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configuración obligatoria: sin GOOGLE_MAPS_KEY no arrancamos
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let max_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(max_level).init();

    info!("🚀 MM Courier Route Planner API");
    info!("================================");
    if config.cors_origins.is_empty() {
        warn!("⚠️ CLIENT_ORIGIN no configurado: solo se aceptan requests sin origin");
    } else {
        info!("🌍 CLIENT_ORIGIN = {}", config.cors_origins.join(", "));
    }
    info!("🔑 GOOGLE_MAPS_KEY = ✔ SET");
    info!("⏱️ Timeout del proveedor: {}s", config.upstream_timeout_secs);

    let addr: SocketAddr = config.server_url().parse()?;

    let app_state = AppState::from_config(config)
        .map_err(|e| anyhow::anyhow!("Error inicializando el estado: {}", e))?;
    let app = create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /               - Health check");
    info!("   GET  /health         - Health check del servicio");
    info!("   POST /optimize       - Optimizar ruta (Directions API)");
    info!("   POST /geocode        - Geocodificar dirección");
    info!("   POST /mark-delivered - Marcar parada entregada");
    info!("   GET  /delivered      - Listar paradas entregadas");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
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
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}

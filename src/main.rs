use std::path::Path;
use std::sync::Arc;

use tower_http::cors::CorsLayer;

use torino_desk::auth::{AuthRouteState, AuthService, StaffAuth, auth_routes};
use torino_desk::catalog::{CatalogRouteState, catalog_routes};
use torino_desk::clients::{ClientRepository, ClientRouteState, ClientStore, client_routes};
use torino_desk::config::AppConfig;
use torino_desk::intake::{
    IntakeRouteState, IntakeService, MemorySessionStore, SessionStore, intake_routes,
};
use torino_desk::labels::{LabelRouteState, label_routes};
use torino_desk::projects::{ProjectRouteState, project_routes};
use torino_desk::store::{Database, LibSqlBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();

    eprintln!("Torino Desk v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path);
    eprintln!("   API: http://0.0.0.0:{}", config.port);
    eprintln!(
        "   Voice intake: {} start\n",
        if config.intake.require_trigger {
            "explicit"
        } else {
            "implicit"
        }
    );

    // ── Database ────────────────────────────────────────────────────────
    let db: Arc<dyn Database> =
        Arc::new(LibSqlBackend::new_local(Path::new(&config.db_path)).await?);

    // ── Auth ────────────────────────────────────────────────────────────
    let auth = Arc::new(AuthService::new(Arc::clone(&db)));
    auth.seed_admin(&config.admin_password).await?;

    // ── Intake ──────────────────────────────────────────────────────────
    let client_store = Arc::new(ClientStore::new(Arc::clone(&db)));
    let sessions = Arc::new(MemorySessionStore::new());
    let intake_service = Arc::new(IntakeService::new(
        sessions as Arc<dyn SessionStore>,
        Arc::clone(&client_store) as Arc<dyn ClientRepository>,
        Arc::clone(&auth) as Arc<dyn StaffAuth>,
        config.intake.clone(),
    ));

    // ── Routes ──────────────────────────────────────────────────────────
    let app = auth_routes(AuthRouteState {
        auth: Arc::clone(&auth),
    })
    .merge(intake_routes(IntakeRouteState {
        service: intake_service,
    }))
    .merge(client_routes(ClientRouteState {
        store: client_store,
        auth: Arc::clone(&auth) as Arc<dyn StaffAuth>,
    }))
    .merge(catalog_routes(CatalogRouteState {
        db: Arc::clone(&db),
        auth: Arc::clone(&auth) as Arc<dyn StaffAuth>,
    }))
    .merge(project_routes(ProjectRouteState {
        db: Arc::clone(&db),
        auth: Arc::clone(&auth) as Arc<dyn StaffAuth>,
    }))
    .merge(label_routes(LabelRouteState {
        db: Arc::clone(&db),
        auth: Arc::clone(&auth) as Arc<dyn StaffAuth>,
    }))
    .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "HTTP server started");
    axum::serve(listener, app).await?;

    Ok(())
}

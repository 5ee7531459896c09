mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth;
use crate::features::cart::routes as cart_routes;
use crate::features::checkout::{routes as checkout_routes, CheckoutService};
use crate::features::couriers::{routes as courier_routes, CourierService};
use crate::features::freight::services::RateSource;
use crate::features::freight::{routes as freight_routes, FreightService, RateTableService};
use crate::features::payments::{PaymentGateway, SimulatedGateway};
use crate::features::shipments::{routes as shipment_routes, ShipmentService};
use crate::modules::sheets::SheetsClient;
use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Initialize auth
    let jwt_validator = Arc::new(auth::JwtValidator::new(
        &config.auth.jwt_secret,
        config.auth.jwt_leeway,
    ));
    tracing::info!("Auth configuration initialized");

    // Initialize settings sheet client (optional)
    let sheets_client = match config.sheets.base_url.as_deref() {
        Some(base_url) => match SheetsClient::new(base_url, config.sheets.timeout) {
            Ok(client) => {
                tracing::info!("Settings sheet client initialized: {}", client.base_url());
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::warn!(
                    "Settings sheet client not available: {}. Using built-in freight rates.",
                    e
                );
                None
            }
        },
        None => {
            tracing::info!("SHEETS_API_URL not set, remote freight settings disabled");
            None
        }
    };

    // Initialize rate table and load remote overrides before serving quotes
    let rate_table = Arc::new(RateTableService::new(sheets_client.clone()));
    match rate_table.load_from_remote().await {
        RateSource::Remote(count) => {
            tracing::info!("Freight rate table loaded ({} remote zones)", count)
        }
        RateSource::Local => tracing::info!("Freight rate table using built-in rates"),
    }

    // Initialize freight and checkout services
    let freight_service = Arc::new(FreightService::new(
        Arc::clone(&rate_table),
        config.store.clone(),
    ));
    let payment_gateway: Arc<dyn PaymentGateway> = Arc::new(SimulatedGateway::new());
    let checkout_service = Arc::new(CheckoutService::new(
        Arc::clone(&freight_service),
        payment_gateway,
        sheets_client.clone(),
    ));
    let courier_service = Arc::new(CourierService::new(config.store.clone()));
    let shipment_service = Arc::new(ShipmentService::new(
        Arc::clone(&freight_service),
        Arc::clone(&courier_service),
        sheets_client,
    ));
    tracing::info!(
        "Freight, courier and checkout services initialized (origin: {}, currency: {})",
        config.store.origin_country,
        config.store.currency
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::basic_auth_middleware,
            ))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Admin routes (require JWT authentication; handlers check the admin role)
    let protected_routes = Router::new()
        .merge(freight_routes::admin_routes(Arc::clone(&rate_table)))
        .merge(courier_routes::admin_routes(Arc::clone(&courier_service)))
        .merge(shipment_routes::admin_routes(Arc::clone(&shipment_service)))
        .route_layer(from_fn_with_state(
            jwt_validator.clone(),
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(freight_routes::routes(Arc::clone(&freight_service)))
        .merge(cart_routes::routes(freight_service))
        .merge(checkout_routes::routes(checkout_service))
        .merge(courier_routes::routes(courier_service))
        .merge(shipment_routes::routes(shipment_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

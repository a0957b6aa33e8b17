use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use agentgps::config::Config;
use agentgps::middleware::{json_error_handler, RequestId, REQUEST_ID_HEADER};
use agentgps::{configure_app, CommissionCalculator};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Largest accepted request body; a full market center's yearly deals fit comfortably
const JSON_PAYLOAD_LIMIT: usize = 4 * 1024 * 1024;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting AgentGPS commission service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());
    tracing::info!("HST rate on GCI: {}", config.commission.hst_rate);

    let calculator = web::Data::new(CommissionCalculator::new(config.commission.hst_rate));
    let cors_origin = config.server.cors_allowed_origin.clone();

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(cors_origin.as_deref()))
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .app_data(calculator.clone())
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_PAYLOAD_LIMIT)
                    .error_handler(json_error_handler),
            )
            .configure(configure_app)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("agentgps={},actix_web=info", config.app.log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if config.app.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Browser access is closed unless a dashboard origin is configured
fn cors(origin: Option<&str>) -> Cors {
    match origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::HeaderName::from_static(REQUEST_ID_HEADER),
            ])
            .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
            .max_age(3600),
        None => Cors::default(),
    }
}

use std::io;

use actix_web::{middleware, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use insight_gateway::gemini::GeminiClient;
use insight_gateway::{api, GatewayConfig, InsightGateway};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GATEWAY_LOG")
        .unwrap_or_else(|_| EnvFilter::new("insight_gateway=info,actix_web=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn start_api(gateway: InsightGateway) -> io::Result<()> {
    let bind = (gateway.config().host.clone(), gateway.config().port);
    let gateway = web::Data::new(gateway);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(gateway.clone())
            .configure(api::configure::<GeminiClient>)
    })
    .bind(bind)?
    .run()
    .await
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let config = GatewayConfig::from_env().map_err(|err| {
        error!(error = %err, "invalid configuration");
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    info!(
        configured = config.is_configured(),
        model = %config.text_model,
        image_model = %config.image_model,
        "AI Insight Gateway configured"
    );
    info!(
        "Starting Lumina AI Insight Gateway on http://{}:{}",
        config.host, config.port
    );

    start_api(InsightGateway::from_config(config)).await
}

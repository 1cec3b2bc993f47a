//! Boutique JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    catcher::Catcher,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Cors, CorsHandler},
    http::header::HeaderValue,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info, warn};

use boutique_app::{context::AppContext, seeding};

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carts;
mod config;
mod extensions;
mod healthcheck;
mod messages;
mod observability;
mod orders;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod users;

/// Boutique JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(init_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "subscriber failed to install, nothing else can report this"
            )]
            {
                eprintln!("Observability error: {init_error}");
            }

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::new(&config.app_settings()).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    if config.server.seed_on_startup
        && let Err(seed_error) =
            seeding::seed(app.products.as_ref(), &config.server.assets_dir).await
    {
        error!("failed to seed catalog: {seed_error}");
    }

    let state = State::from_app_context(app, config.server.upload_dir.clone());

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(state))
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::api_router());

    let doc = OpenApi::new("Boutique API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    // CORS runs before routing so preflight requests never hit a 404
    let service = Service::new(router)
        .catcher(Catcher::default().hoop(messages::error_body))
        .hoop(cors(&config.server.cors_allowed_origins));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    let drain = config.server.shutdown_timeout();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, drain).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(service).await;

    observability.shutdown();
}

fn cors(allowed_origins: &[String]) -> CorsHandler {
    let origin = if allowed_origins.iter().any(|origin| origin.trim() == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin.trim())
                .inspect_err(|_| warn!("ignoring invalid CORS origin {origin:?}"))
                .ok()
        }))
    };

    Cors::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any())
        .into_handler()
}

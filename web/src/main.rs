use anyhow::{Context, Result};
use axum::{
    Router,
    response::{IntoResponse, Redirect},
    routing::get,
};
use axum_template::engine::Engine;
use clap::Parser;
use minijinja::Environment;
use state::{AppState, SharedState};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::EnvFilter;

mod api;
mod config;
mod error;
mod html;
mod state;
mod util;

const API_PREFIX: &str = "/api/v1";
const APP_PREFIX: &str = "/app";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The name of the environment in the config file to use
    #[arg(short, long, default_value = "prod")]
    pub env: String,
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory containing the `templates` and `static` directories
    #[arg(long)]
    pub datadir: Option<PathBuf>,
    /// Use this database instead of the one from the configuration
    #[arg(short, long)]
    pub database: Option<String>,
    /// Listen on this port instead of the one from the configuration
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub(crate) fn template_engine<P: AsRef<Path>>(
    envname: &str,
    template_dir: P,
) -> Engine<Environment<'static>> {
    let mut jinja = Environment::new();
    jinja.set_loader(minijinja::path_loader(template_dir));
    jinja.add_global("environment", envname.to_string());
    jinja.add_filter("app_url", util::app_url);
    jinja.add_filter("api_url", util::api_url);
    jinja.add_filter("append_query_param", util::append_query_param);
    jinja.add_filter("coord", util::format_coordinate);
    Engine::from(jinja)
}

fn app(state: AppState) -> Router {
    let cors = state.config.cors;
    let static_dir = state.datadir.join("static");
    let router = Router::new()
        .route("/", get(root))
        .nest_service("/static", ServeDir::new(static_dir))
        .nest(APP_PREFIX, html::router())
        .nest(API_PREFIX, api::router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        );
    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("WAYPOINT_LOG"))
        .init();
    let args = Cli::parse();
    let mut env = config::load(args.config.as_deref(), &args.env)?;
    if let Some(database) = args.database {
        env.database = database;
    }
    if let Some(port) = args.port {
        env.listen.port = port;
    }
    let datadir = args
        .datadir
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")));
    debug!(?env, ?datadir, "using environment '{}'", args.env);

    let addr = format!("{}:{}", env.listen.host, env.listen.port);
    let shared_state = Arc::new(SharedState::new(&args.env, env, datadir).await?);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Unable to listen on {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(shared_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Unable to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Unable to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down");
}

async fn root() -> impl IntoResponse {
    Redirect::permanent(APP_PREFIX)
}

#[cfg(test)]
fn test_app(store: Arc<dyn libwaypoint::store::LocationStore>) -> (Router, AppState) {
    let state = Arc::new(SharedState::test(store));
    (app(state.clone()), state)
}

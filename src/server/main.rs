//! Inverse geocoding HTTP server.
//!
//! Thin routing layer over the resolution engine: parses request
//! parameters leniently, runs the cascade, and serializes the answer
//! at the requested detail level.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use larch::index::EsGeoIndex;
use larch::models::{parse_bool_lenient, Detail, LargestLevel, ResolveRequest};
use larch::resolve::{project, Projected};
use larch::{GeoResolver, ResolveError, ResolverConfig};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Inverse geocoding server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Elasticsearch URL
    #[arg(long, default_value = "http://localhost:9200")]
    es_url: String,

    /// Elasticsearch index name
    #[arg(long, default_value = "features")]
    index: String,

    /// Resolver policy file (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Application state shared across handlers
struct AppState {
    resolver: GeoResolver<EsGeoIndex>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ResolverConfig::load_from_file(path)?,
        None => ResolverConfig::default(),
    };

    info!("Larch inverse geocoder");
    info!("Connecting to Elasticsearch at {}", args.es_url);

    let index = EsGeoIndex::connect(&args.es_url, &args.index, config.resend_on_fail)?;

    if !index.health_check().await? {
        anyhow::bail!("Elasticsearch cluster is not healthy");
    }

    let doc_count = index.doc_count().await?;
    info!(
        "Connected to index '{}' with {} documents",
        args.index, doc_count
    );

    let state = Arc::new(AppState {
        resolver: GeoResolver::new(index, config),
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/inverse", get(inverse_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let healthy = state
        .resolver
        .index()
        .health_check()
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        elasticsearch: healthy,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    elasticsearch: bool,
}

/// Inverse geocoding endpoint
async fn inverse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InverseQueryParams>,
) -> Result<Json<Projected>, (StatusCode, String)> {
    let mut request = ResolveRequest::new(params.lon, params.lat);
    request.set_max_neighbours(
        params
            .max_neighbours
            .unwrap_or(state.resolver.config().default_max_neighbours as i64),
    );
    request.largest_level = LargestLevel::parse_lenient(params.largest_level.as_deref());
    request.detail = Detail::parse_lenient(params.detail.as_deref());
    request.related = parse_bool_lenient(params.related.as_deref(), false);
    request.full_geometry = parse_bool_lenient(params.full_geometry.as_deref(), false);

    let detail = request.detail;
    match state.resolver.resolve(&request).await {
        Ok(answer) => Ok(Json(project(answer, detail))),
        Err(ResolveError::InvalidInput(message)) => Err((StatusCode::BAD_REQUEST, message)),
        Err(err) => {
            error!("Resolution failed: {:#}", err);
            Err((StatusCode::BAD_GATEWAY, err.to_string()))
        }
    }
}

#[derive(Deserialize)]
struct InverseQueryParams {
    /// Point longitude; missing or unparseable values reject the request
    lon: f64,
    /// Point latitude
    lat: f64,
    /// Also return related objects (lenient, defaults to false)
    related: Option<String>,
    /// Neighbour cap, clamped to [0, 100]; 0 turns neighbours off
    max_neighbours: Option<i64>,
    /// objects | highways | all | places (lenient, defaults to highways)
    largest_level: Option<String>,
    /// Keep full geometry on returned features (lenient, defaults to
    /// false)
    full_geometry: Option<String>,
    /// full | short (lenient, defaults to full)
    detail: Option<String>,
}

use crate::{
    api::handlers::{health, teams, users},
    directory::Directories,
};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use std::{
    future::Future,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;

pub mod auth;
pub(crate) mod handlers;
mod openapi;

pub use openapi::openapi;

/// Build the API router around the shared directories.
///
/// Every route except `PUT /api/user` and `/health` sits behind the Basic
/// auth gate.
pub fn router(directories: Arc<Directories>) -> Router {
    let gate = || middleware::from_fn(auth::require_basic_auth);

    Router::new()
        .route(
            "/api/user",
            get(users::get_user)
                .post(users::update_user)
                .route_layer(gate())
                .put(users::create_user),
        )
        .route(
            "/api/team",
            get(teams::list_teams)
                .put(teams::create_team)
                .route_layer(gate()),
        )
        .route("/api/team/:name", get(teams::get_team).route_layer(gate()))
        .route(
            "/api/team/:name/subscribe",
            post(teams::subscribe).route_layer(gate()),
        )
        .route(
            "/api/team/:name/unsubscribe",
            post(teams::unsubscribe).route_layer(gate()),
        )
        .route("/health", get(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(directories)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to bind or serve
pub async fn new(listen: IpAddr, port: u16, directories: Arc<Directories>) -> Result<()> {
    let address = SocketAddr::new(listen, port);
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("Listening on {}", address);

    serve(listener, directories, shutdown_signal()).await
}

/// Serve the API on an already bound listener until `shutdown` resolves.
/// # Errors
/// Return error if the server fails
pub async fn serve<F>(listener: TcpListener, directories: Arc<Directories>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(directories);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, gracefully shutdown"),
        () = terminate => info!("Received SIGTERM, gracefully shutdown"),
    }
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use anyhow::Result;
use axum::routing::{delete, get, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, decompression::DecompressionLayer, trace::TraceLayer,
};

use state::AppState;

use crate::controllers::{calendar, history, images, shows};

pub mod controllers;
pub mod errors;
pub mod grouping;
pub mod models;
pub mod posters;
pub mod request_cache;
pub mod state;
pub mod upnext;

const ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 8000);

pub async fn serve(app_state: AppState) -> Result<()> {
    // our router
    let app = Router::new()
        .route("/upnext", get(calendar::up_next))
        .route("/upcoming", get(calendar::upcoming))
        .route("/calendar", get(calendar::window))
        .route("/history", get(history::get))
        .route("/history/:id", delete(history::remove))
        .route("/search", get(shows::search))
        .route("/shows/:id/progress", get(shows::progress))
        .route("/shows/:id/seasons", get(shows::seasons))
        .route("/shows/:id/seasons/:season", get(shows::season_episodes))
        .route(
            "/watchlist/:id",
            put(shows::add_to_watchlist).delete(shows::remove_from_watchlist),
        )
        .route("/watchlist", get(shows::watchlist))
        .route("/user", get(shows::user))
        .route("/posters/:tmdb_id", get(images::poster))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(DecompressionLayer::new()),
        );

    tracing::debug!("listening on {}", ADDRESS);
    let listener = tokio::net::TcpListener::bind(ADDRESS).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

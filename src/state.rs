use anyhow::Result;
use axum::extract::FromRef;
use chrono::Duration;
use serde::Deserialize;

use crate::models::EpisodeGroup;
use crate::posters::PosterService;
use crate::request_cache::RequestCache;

pub type UpNextCache = RequestCache<&'static str, Vec<EpisodeGroup>>;

#[derive(Debug, Clone)]
pub struct AppState {
    pub trakt: trakt::Client,
    pub posters: PosterService,
    pub up_next_cache: UpNextCache,
}

impl AppState {
    /// Build the shared state from `TRAKT_*` and `TMDB_*` environment
    /// variables.
    ///
    /// # Errors
    /// Fails when a required credential is missing from the environment.
    pub fn from_env() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            trakt: create_trakt_client(client.clone())?,
            posters: PosterService::new(create_tmdb_client(client)?),
            up_next_cache: RequestCache::new(Duration::minutes(5)),
        })
    }
}

impl FromRef<AppState> for trakt::Client {
    fn from_ref(input: &AppState) -> Self {
        input.trakt.clone()
    }
}

impl FromRef<AppState> for PosterService {
    fn from_ref(input: &AppState) -> Self {
        input.posters.clone()
    }
}

impl FromRef<AppState> for UpNextCache {
    fn from_ref(input: &AppState) -> Self {
        input.up_next_cache.clone()
    }
}

#[derive(Debug, Deserialize)]
struct TraktConfig {
    client_id: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TmdbConfig {
    api_key: String,
}

fn create_trakt_client(client: reqwest::Client) -> Result<trakt::Client> {
    let config: TraktConfig = envy::prefixed("TRAKT_").from_env()?;
    Ok(trakt::Client::new(
        config.client_id,
        config.access_token,
        client,
    ))
}

fn create_tmdb_client(client: reqwest::Client) -> Result<tmdb::Client> {
    let config: TmdbConfig = envy::prefixed("TMDB_").from_env()?;
    Ok(tmdb::Client::new(
        tmdb::Authorization::Bearer(config.api_key),
        client,
    ))
}

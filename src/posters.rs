use std::sync::Arc;

use chrono::Duration;
use tracing::debug;
use url::Url;

use crate::request_cache::RequestCache;

pub const DEFAULT_POSTER_SIZE: &str = "w154";

/// Poster and backdrop lookup against the metadata service. Show details
/// are cached per metadata id so repeated rows on screen don't refetch.
#[derive(Debug, Clone)]
pub struct PosterService {
    client: tmdb::Client,
    cache: RequestCache<u32, tmdb::tv::Details>,
}

impl PosterService {
    #[must_use]
    pub fn new(client: tmdb::Client) -> Self {
        Self {
            client,
            cache: RequestCache::new(Duration::hours(12)),
        }
    }

    pub async fn poster_url(&self, tmdb_id: u32, size: &str) -> Option<Url> {
        let details = self.details(tmdb_id).await?;
        let path = details.poster_path.as_deref()?;
        tmdb::image_url(path, size).ok()
    }

    pub async fn backdrop_url(&self, tmdb_id: u32, size: &str) -> Option<Url> {
        let details = self.details(tmdb_id).await?;
        let path = details.backdrop_path.as_deref()?;
        tmdb::image_url(path, size).ok()
    }

    pub async fn overview(&self, tmdb_id: u32) -> Option<String> {
        self.details(tmdb_id).await?.overview.clone()
    }

    async fn details(&self, tmdb_id: u32) -> Option<Arc<tmdb::tv::Details>> {
        if let Some(details) = self.cache.get(&tmdb_id) {
            return Some(details);
        }
        match tmdb::tv::details(&self.client, tmdb_id).await {
            Ok(details) => {
                self.cache.insert_with_default_timeout(tmdb_id, details);
                self.cache.get(&tmdb_id)
            }
            Err(err) => {
                // Missing artwork is never worth an error to the caller.
                debug!("metadata lookup for {tmdb_id} failed: {err}");
                None
            }
        }
    }
}

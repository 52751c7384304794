pub mod models;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error as ThisError;
use url::Url;

const BASE_URL: &str = "https://api.trakt.tv";
const API_VERSION: &str = "2";
const API_VERSION_HEADER: &str = "trakt-api-version";
const API_KEY_HEADER: &str = "trakt-api-key";
const CONTENT_TYPE_HEADER: &str = "Content-Type";
const JSON_TYPE: &str = "application/json";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("missing or rejected credentials")]
    NotAuthenticated,
    #[error("resource not found")]
    NotFound,
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error("request failed with status code: {0}")]
    Status(StatusCode),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Authenticated client for the Trakt API.
///
/// Holds the application's client id and the user's access token; both are
/// attached to every request together with the API version header.
#[derive(Debug, Clone)]
pub struct Client {
    client_id: String,
    access_token: String,
    reqwest: reqwest::Client,
}

impl Client {
    #[must_use]
    pub fn new(client_id: String, access_token: String, reqwest: reqwest::Client) -> Self {
        Self {
            client_id,
            access_token,
            reqwest,
        }
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.decorate(self.reqwest.get(url))
    }

    fn post(&self, url: Url) -> RequestBuilder {
        self.decorate(self.reqwest.post(url))
    }

    fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(CONTENT_TYPE_HEADER, JSON_TYPE)
            .header(API_VERSION_HEADER, API_VERSION)
            .header(API_KEY_HEADER, &self.client_id)
            .bearer_auth(&self.access_token)
    }
}

async fn get_document<T>(client: &Client, url: Url) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = client.get(url).send().await?;
    handle_response(response).await
}

async fn post_document<B, T>(client: &Client, url: Url, body: &B) -> Result<T>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = client.post(url).json(body).send().await?;
    handle_response(response).await
}

async fn handle_response<T>(response: reqwest::Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED => return Err(Error::NotAuthenticated),
        StatusCode::NOT_FOUND => return Err(Error::NotFound),
        s if !s.is_success() => return Err(Error::Status(s)),
        _ => {}
    }
    let body = response.text().await?;
    match serde_json::from_str(&body) {
        Ok(document) => Ok(document),
        Err(e) => {
            tracing::trace!(body = body, "error deserializing response: {}", e);
            Err(Error::Serde(e))
        }
    }
}

pub mod calendar {
    use chrono::NaiveDate;

    use crate::{get_document, models, Client, Result, BASE_URL};

    /// Episodes airing on the user's personal calendar, starting at `start`
    /// and spanning `days` days.
    pub async fn my_shows(
        client: &Client,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<models::CalendarEntry>> {
        let url = format!(
            "{BASE_URL}/calendars/my/shows/{}/{days}",
            start.format("%Y-%m-%d")
        )
        .parse()?;
        get_document(client, url).await
    }
}

pub mod shows {
    use crate::{get_document, models, Client, Result, BASE_URL};

    /// Watched progress for one show, including the pointer to the next
    /// unwatched episode.
    pub async fn progress(client: &Client, show_id: u32) -> Result<models::ShowProgress> {
        let url = format!("{BASE_URL}/shows/{show_id}/progress/watched").parse()?;
        get_document(client, url).await
    }

    pub async fn seasons(client: &Client, show_id: u32) -> Result<Vec<models::Season>> {
        let url = format!("{BASE_URL}/shows/{show_id}/seasons?extended=full").parse()?;
        get_document(client, url).await
    }

    pub async fn season_episodes(
        client: &Client,
        show_id: u32,
        season: u32,
    ) -> Result<Vec<models::EpisodeDetail>> {
        let url = format!("{BASE_URL}/shows/{show_id}/seasons/{season}?extended=full").parse()?;
        get_document(client, url).await
    }
}

pub mod search {
    use url::Url;

    use crate::{get_document, models, Client, Result, BASE_URL};

    pub async fn shows(
        client: &Client,
        query: &str,
        limit: u32,
    ) -> Result<Vec<models::SearchResult>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let url = Url::parse_with_params(
            &format!("{BASE_URL}/search/show"),
            [("query", query.to_owned()), ("limit", limit.to_string())],
        )?;
        get_document(client, url).await
    }
}

pub mod users {
    use url::Url;

    use crate::{get_document, models, Client, Result, BASE_URL};

    /// Watch history of the authenticated user, newest first.
    pub async fn history(
        client: &Client,
        page: u32,
        limit: u32,
    ) -> Result<Vec<models::HistoryEntry>> {
        let url = Url::parse_with_params(
            &format!("{BASE_URL}/users/me/history/episodes"),
            [("page", page.to_string()), ("limit", limit.to_string())],
        )?;
        get_document(client, url).await
    }

    pub async fn settings(client: &Client) -> Result<models::UserSettings> {
        let url = format!("{BASE_URL}/users/settings").parse()?;
        get_document(client, url).await
    }
}

pub mod sync {
    use crate::{get_document, models, post_document, Client, Result, BASE_URL};

    pub async fn watchlist(client: &Client) -> Result<Vec<models::WatchlistItem>> {
        let url = format!("{BASE_URL}/sync/watchlist/shows").parse()?;
        get_document(client, url).await
    }

    pub async fn add_to_watchlist(client: &Client, show_id: u32) -> Result<models::SyncResponse> {
        let url = format!("{BASE_URL}/sync/watchlist").parse()?;
        let body = models::SyncShows::single(show_id);
        post_document(client, url, &body).await
    }

    pub async fn remove_from_watchlist(
        client: &Client,
        show_id: u32,
    ) -> Result<models::SyncResponse> {
        let url = format!("{BASE_URL}/sync/watchlist/remove").parse()?;
        let body = models::SyncShows::single(show_id);
        post_document(client, url, &body).await
    }

    /// Remove a single watch event by its history id.
    pub async fn remove_history(
        client: &Client,
        history_id: u64,
    ) -> Result<models::HistoryRemoveResponse> {
        let url = format!("{BASE_URL}/sync/history/remove").parse()?;
        let body = models::HistoryIds {
            ids: vec![history_id],
        };
        post_document(client, url, &body).await
    }
}

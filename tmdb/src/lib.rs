use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone)]
pub enum Authorization {
    Bearer(String),
    ApiKey(String),
}

impl Authorization {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Authorization::Bearer(token) => token,
            Authorization::ApiKey(key) => key,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    auth: Authorization,
    reqwest: reqwest::Client,
}

impl Client {
    #[must_use]
    pub fn new(auth: Authorization, reqwest: reqwest::Client) -> Self {
        Client { auth, reqwest }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The provided authorization token is invalid")]
    Unauthorized,
    #[error("The requested resource could not be found")]
    NotFound,
    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    DeserializationError(#[from] serde_json::Error),
}

/// Build the CDN URL for an image path returned by the API.
///
/// # Errors
/// [`url::ParseError`]: if the path produces an invalid URL.
pub fn image_url(path: &str, size: &str) -> Result<Url, url::ParseError> {
    format!("{IMAGE_BASE_URL}/{size}{path}").parse()
}

async fn handle_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, Error> {
    match res.status() {
        StatusCode::UNAUTHORIZED => return Err(Error::Unauthorized),
        StatusCode::NOT_FOUND => return Err(Error::NotFound),
        _ => {}
    }
    let response = res.error_for_status()?;
    let body = response.text().await?;
    match serde_json::from_str(&body) {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::trace!(body = body, "error deserializing response: {}", e);
            Err(Error::DeserializationError(e))
        }
    }
}

pub mod tv {
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};
    use url::Url;

    use crate::{Client, Error, BASE_URL};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Details {
        pub id: u32,
        pub name: String,
        pub original_name: Option<String>,
        pub overview: Option<String>,
        pub poster_path: Option<String>,
        pub backdrop_path: Option<String>,
        pub first_air_date: Option<String>,
        pub last_air_date: Option<NaiveDate>,
        pub in_production: Option<bool>,
        pub number_of_episodes: Option<u32>,
        pub number_of_seasons: Option<u32>,
        pub status: Option<String>,
        pub vote_average: Option<f64>,
    }

    /// Fetch the details of a TV show.
    ///
    /// # Errors
    /// [`Error::Unauthorized`]: If the client is not authorized to make the request.
    /// [`Error::NotFound`]: If the resource requested does not exist.
    pub async fn details(client: &Client, id: u32) -> Result<Details, Error> {
        let url: Url = format!("{BASE_URL}/tv/{id}").parse()?;
        let response = client
            .reqwest
            .get(url)
            .bearer_auth(client.auth.as_str())
            .send()
            .await?;

        crate::handle_response(response).await
    }
}

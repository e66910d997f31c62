//! Provides a client for interacting with the OpenWeatherMap API.
//!
//! This module defines the `Client` struct, which builds authenticated requests
//! and executes them, decoding successful responses and turning failed ones into
//! [`ErrorResponse`] values.

use crate::api::destination::{Destination, Json};
use crate::api::options::{ClientBuilder, Units};
use crate::api::CurrentService;
use crate::error::{Error, ErrorResponse, Result};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

const MEDIA_TYPE_JSON: &str = "application/json";

const PARAM_API_KEY: &str = "appid";
const PARAM_UNITS: &str = "units";

/// Body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

/// Pass as the body of [`Client::new_request`] when the request has none.
pub const NO_BODY: Option<&()> = None;

/// An asynchronous client for the OpenWeatherMap API.
///
/// Read-only once built; clone it freely to share it between tasks.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    user_agent: HeaderValue,
    api_key: String,
    units: Units,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("api_key", &"<redacted>")
            .field("units", &self.units)
            .finish()
    }
}

impl Client {
    /// Creates a client with the default base URL and user agent.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().build(api_key)
    }

    /// Creates a client with the API key taken from `OPEN_WEATHER_API_KEY`.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::new().build_from_env()
    }

    /// Starts configuring a client; see [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        base_url: Url,
        user_agent: HeaderValue,
        api_key: String,
        units: Units,
    ) -> Self {
        Self {
            http,
            base_url,
            user_agent,
            api_key,
            units,
        }
    }

    /// Base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// User-Agent header sent with every request.
    pub fn user_agent(&self) -> &str {
        self.user_agent.to_str().unwrap_or_default()
    }

    /// Unit system requested from the API.
    pub fn units(&self) -> Units {
        self.units
    }

    /// Current weather data. See <https://openweathermap.org/current>.
    pub fn current(&self) -> CurrentService<'_> {
        CurrentService::new(self)
    }

    /// Creates an API request.
    ///
    /// `path` is resolved against the base URL and must not start with `/`. A
    /// body, if given, is JSON encoded. The API key and the configured unit
    /// system are appended as query parameters, after any already in `path`.
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        if path.starts_with('/') {
            return Err(Error::AbsolutePath(path.to_string()));
        }
        let mut url = self.base_url.join(path)?;

        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| Error::Encode(Arc::new(e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair(PARAM_API_KEY, &self.api_key);
            if let Some(units) = self.units.as_param() {
                query.append_pair(PARAM_UNITS, units);
            }
        }

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_JSON));
        if let Some(payload) = payload {
            *request.body_mut() = Some(payload.into());
        }

        debug!("Built request {} {}", request.method(), request.url().path());
        Ok(request)
    }

    /// Sends an API request and streams a successful body into `dest`.
    ///
    /// Non-2xx responses are returned as [`Error::Api`]. Cancellation is up to
    /// the caller: drop the future or wrap it in `tokio::time::timeout`.
    pub async fn execute<D>(&self, request: Request, dest: &mut D) -> Result<reqwest::StatusCode>
    where
        D: Destination + ?Sized,
    {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("Sending {} {}", method, url.path());

        let mut response = self.http.execute(request).await.map_err(|e| {
            error!("Error sending {} {}: {}", method, url.path(), e);
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            // A truncated error body must not hide the status.
            let body = response.bytes().await.map(|b| b.to_vec()).unwrap_or_else(|e| {
                warn!("Error reading error body from {}: {}", url.path(), e);
                Vec::new()
            });
            let err = error_response(method, url, status, &body);
            error!(
                "API request to {} failed with status {}: {}",
                err.url.path(),
                status,
                err.message
            );
            return Err(Error::Api(err));
        }

        while let Some(chunk) = response.chunk().await? {
            dest.write_chunk(&chunk)?;
        }
        dest.finish()?;

        Ok(status)
    }

    /// Sends an API request and decodes the JSON body into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let mut dest = Json::<T>::new();
        self.execute(request, &mut dest).await?;
        dest.into_inner()
            .ok_or_else(|| Error::Decode(Arc::new(serde::de::Error::custom("no body decoded"))))
    }
}

/// Turns a non-2xx body into an `ErrorResponse`, keeping the raw text as the message when it is not JSON.
fn error_response(method: Method, url: Url, status: reqwest::StatusCode, body: &[u8]) -> ErrorResponse {
    let message = if body.is_empty() {
        String::new()
    } else {
        match serde_json::from_slice::<ApiMessage>(body) {
            Ok(parsed) => parsed.message,
            Err(e) => {
                warn!("Error body from {} is not JSON: {}", url.path(), e);
                String::from_utf8_lossy(body).into_owned()
            },
        }
    };

    ErrorResponse {
        method,
        url,
        status,
        message,
    }
}

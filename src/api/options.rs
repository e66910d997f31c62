//! Configuration options applied when constructing a [`Client`].
//!
//! Options are recorded in the order they are set. The first one that fails is
//! kept and returned from [`ClientBuilder::build`]; later options are ignored.

use crate::api::Client;
use crate::error::{Error, Result};
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::env::{self, VarError};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/";
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Environment variable read by [`ClientBuilder::build_from_env`].
pub const API_KEY_ENV: &str = "OPEN_WEATHER_API_KEY";

/// Unit system the API reports measurements in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    /// No `units` parameter is sent; the API answers in Kelvin and m/s.
    #[default]
    Standard,
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter, if one is sent at all.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Units::Standard => None,
            Units::Metric => Some("metric"),
            Units::Imperial => Some("imperial"),
        }
    }

    /// Symbol temperatures are reported in.
    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Standard => "K",
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    /// Symbol wind speeds are reported in.
    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Standard | Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param().unwrap_or("standard"))
    }
}

impl FromStr for Units {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(Error::Units(s.to_string())),
        }
    }
}

/// Builds a [`Client`] from a sequence of options.
///
/// ```no_run
/// # async fn run() -> openweather::Result<()> {
/// use openweather::{Client, Units};
///
/// let client = Client::builder()
///     .units(Units::Metric)
///     .user_agent("my-app/1.0")
///     .build("my-api-key")?;
/// let montreal = client.current().by_city("Montreal").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    http: Option<reqwest::Client>,
    base_url: Option<Url>,
    user_agent: Option<HeaderValue>,
    units: Units,
    error: Option<Error>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Starts from the defaults: public API base URL, crate user agent, no unit system.
    pub fn new() -> Self {
        Self {
            http: None,
            base_url: None,
            user_agent: None,
            units: Units::Standard,
            error: None,
        }
    }

    /// Sets the HTTP client used to make requests.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        if self.error.is_none() {
            self.http = Some(http);
        }
        self
    }

    /// Sets the User-Agent header sent with every request.
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        if self.error.is_none() {
            match HeaderValue::from_str(user_agent) {
                Ok(value) => self.user_agent = Some(value),
                Err(_) => self.error = Some(Error::UserAgent(user_agent.to_string())),
            }
        }
        self
    }

    /// Sets the base URL requests are resolved against.
    pub fn base_url(mut self, base_url: &str) -> Self {
        if self.error.is_none() {
            match parse_base_url(base_url) {
                Ok(url) => self.base_url = Some(url),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Selects the unit system; every request will carry the matching `units` parameter.
    pub fn units(mut self, units: Units) -> Self {
        if self.error.is_none() {
            self.units = units;
        }
        self
    }

    /// Finishes construction, returning the first option error if there was one.
    pub fn build(self, api_key: impl Into<String>) -> Result<Client> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let base_url = match self.base_url {
            Some(url) => url,
            None => parse_base_url(DEFAULT_BASE_URL)?,
        };
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_USER_AGENT));

        debug!(
            "Building OpenWeather client for {} (units: {})",
            base_url, self.units
        );

        Ok(Client::from_parts(
            self.http.unwrap_or_default(),
            base_url,
            user_agent,
            api_key.into(),
            self.units,
        ))
    }

    /// Like [`build`](Self::build), reading the API key from `OPEN_WEATHER_API_KEY`.
    pub fn build_from_env(self) -> Result<Client> {
        let api_key = env::var(API_KEY_ENV).map_err(|e| match e {
            VarError::NotPresent => Error::MissingApiKey(API_KEY_ENV),
            VarError::NotUnicode(_) => Error::InvalidApiKey(API_KEY_ENV),
        })?;
        self.build(api_key)
    }
}

/// Parses a base URL, making sure relative paths resolve below it rather than replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(Error::BaseUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

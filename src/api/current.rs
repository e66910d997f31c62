//! Current weather data endpoint.
//!
//! API docs: <https://openweathermap.org/current>

use crate::api::{Client, NO_BODY};
use crate::error::Result;
use crate::models::Location;
use reqwest::{Method, Request};
use tracing::info;

const CURRENT_WEATHER_PATH: &str = "data/2.5/weather";

/// Communicates with the current weather methods of the API.
#[derive(Debug, Clone, Copy)]
pub struct CurrentService<'a> {
    client: &'a Client,
}

impl<'a> CurrentService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Builds the request [`by_city`](Self::by_city) sends, for callers that
    /// want the body in a different [`Destination`](crate::api::Destination).
    pub fn by_city_request(&self, name: &str) -> Result<Request> {
        let mut request = self
            .client
            .new_request(Method::GET, CURRENT_WEATHER_PATH, NO_BODY)?;
        // Re-encode so `q` comes first, ahead of the client's own parameters.
        let existing: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
        request
            .url_mut()
            .query_pairs_mut()
            .clear()
            .append_pair("q", name)
            .extend_pairs(existing);
        Ok(request)
    }

    /// Gets the current weather for a city by name, e.g. `"Montreal"` or `"London,uk"`.
    pub async fn by_city(&self, name: &str) -> Result<Location> {
        let request = self.by_city_request(name)?;
        let location: Location = self.client.fetch(request).await?;

        info!(
            "Fetched current weather for {} (id {})",
            location.name, location.id
        );
        Ok(location)
    }
}

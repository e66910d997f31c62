//! Data structures for the OpenWeatherMap current weather endpoint.
//!
//! Field names follow Rust conventions; `serde` renames map them onto the
//! short keys used by the API (`coord`, `main`, `deg`, `1h`, ...).

use serde::{Deserialize, Serialize};

/// Current weather for a single place, as returned by `data/2.5/weather`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub id: i64,
    pub name: String,

    /// Shift in seconds from UTC.
    #[serde(rename = "timezone", default)]
    pub utc_offset: i32,

    #[serde(rename = "coord", default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// The `main` block of the response.
    #[serde(rename = "main", default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,

    /// Visibility in metres.
    #[serde(default)]
    pub visibility: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clouds: Option<Clouds>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Precipitation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow: Option<Precipitation>,

    /// Weather conditions, most relevant first. The API calls this `weather`.
    #[serde(rename = "weather", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// Geographical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

/// Temperature, pressure and humidity readings.
///
/// Temperatures are in the configured unit system (Kelvin when none is set).
/// Pressures are in hPa.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Weather {
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub feels_like: f64,
    #[serde(rename = "temp_min")]
    pub min: f64,
    #[serde(rename = "temp_max")]
    pub max: f64,
    pub pressure: u32,
    pub humidity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<u32>,
    #[serde(rename = "grnd_level", default, skip_serializing_if = "Option::is_none")]
    pub ground_level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Wind {
    pub speed: f64,
    /// Meteorological degrees.
    #[serde(rename = "deg")]
    pub direction: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Clouds {
    /// Percentage of sky covered.
    #[serde(rename = "all")]
    pub cloudiness: u8,
}

/// Rain or snow volume in millimetres.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Precipitation {
    #[serde(rename = "1h", default, skip_serializing_if = "Option::is_none")]
    pub last_hour: Option<f64>,
    #[serde(rename = "3h", default, skip_serializing_if = "Option::is_none")]
    pub last_three_hours: Option<f64>,
}

/// A weather condition code with its human readable description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Condition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_blocks_default_when_absent() {
        let location: Location = serde_json::from_value(json!({
            "id": 1,
            "name": "Nowhere",
            "timezone": 3600
        }))
        .unwrap();

        assert_eq!(location.utc_offset, 3600);
        assert_eq!(location.visibility, 0);
        assert!(location.coordinates.is_none());
        assert!(location.weather.is_none());
        assert!(location.wind.is_none());
        assert!(location.rain.is_none());
        assert!(location.conditions.is_empty());
    }

    #[test]
    fn precipitation_keys_start_with_digits() {
        let rain: Precipitation = serde_json::from_value(json!({ "1h": 0.25 })).unwrap();
        assert_eq!(rain.last_hour, Some(0.25));
        assert_eq!(rain.last_three_hours, None);
    }
}

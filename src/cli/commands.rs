use clap::Parser;
use colored::*;
use comfy_table::{presets, Cell, ContentArrangement, Table};
use openweather::{Client, Error, Location, Raw, Result, Units};
use std::io::{self, IsTerminal, Write};
use tracing::{debug, info};

/// Look up the current weather for a city on OpenWeatherMap.
///
/// The API key is read from the OPEN_WEATHER_API_KEY environment variable
/// (a `.env` file in the working directory is honoured).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// City name, optionally with a country code (e.g. "London,uk")
    pub city: String,

    /// Unit system: standard, metric or imperial
    #[arg(short, long, default_value = "standard")]
    pub units: Units,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the User-Agent header
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Print the JSON response body unchanged instead of a summary
    #[arg(long)]
    pub raw: bool,
}

/// CLI application
pub struct App {
    client: Client,
}

impl App {
    /// Builds the API client from the command line options and the environment.
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut builder = Client::builder().units(cli.units);
        if let Some(base_url) = &cli.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(user_agent) = &cli.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build_from_env()?;
        debug!("Client ready: {:?}", client);
        Ok(Self { client })
    }

    /// Wraps an already configured client (e.g. one pointed at a mock server).
    #[cfg(test)]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Run the CLI application
    pub async fn run(&self, cli: &Cli) -> Result<()> {
        if cli.raw {
            let stdout = io::stdout();
            let is_terminal = stdout.is_terminal();
            self.write_raw(&cli.city, stdout.lock()).await?;
            // Piped output is the body byte-for-byte.
            if is_terminal {
                println!();
            }
            return Ok(());
        }

        let location = self.client.current().by_city(&cli.city).await?;
        println!("{}", headline(&location, self.client.units()));
        println!("{}", readings_table(&location, self.client.units()));
        Ok(())
    }

    /// Copies the response body for `city` into `out` unchanged, returning the byte count.
    pub async fn write_raw<W: Write>(&self, city: &str, out: W) -> Result<u64> {
        let request = self.client.current().by_city_request(city)?;
        let mut sink = Raw::new(out);
        self.client.execute(request, &mut sink).await?;
        info!("Wrote {} raw bytes for {}", sink.written(), city);
        Ok(sink.written())
    }
}

/// Wraps a failed lookup with the city it was for.
pub fn lookup_error(city: &str, err: Error) -> anyhow::Error {
    anyhow::Error::new(err).context(format!("Failed to fetch weather for {}", city))
}

/// One-line summary, e.g. "It is currently 5.7 °C in Montreal (few clouds)."
pub fn headline(location: &Location, units: Units) -> String {
    let temperature = match &location.weather {
        Some(w) => format!("{:.1} {}", w.temperature, units.temperature_symbol()),
        None => "unknown".to_string(),
    };
    let mut line = format!(
        "It is currently {} in {}",
        temperature.yellow().bold(),
        location.name.cyan().bold()
    );
    if let Some(condition) = location.conditions.first() {
        line.push_str(&format!(" ({})", condition.description));
    }
    line.push('.');
    line
}

/// Table of every reading present in the response.
pub fn readings_table(location: &Location, units: Units) -> Table {
    let temp = units.temperature_symbol();
    let mut rows: Vec<(&str, String)> = Vec::new();

    if let Some(c) = &location.coordinates {
        rows.push(("Coordinates", format!("{:.2}, {:.2}", c.latitude, c.longitude)));
    }
    rows.push(("UTC offset", format_offset(location.utc_offset)));
    if let Some(w) = &location.weather {
        rows.push(("Temperature", format!("{:.1} {}", w.temperature, temp)));
        rows.push(("Feels like", format!("{:.1} {}", w.feels_like, temp)));
        rows.push(("Min / Max", format!("{:.1} / {:.1} {}", w.min, w.max, temp)));
        rows.push(("Pressure", format!("{} hPa", w.pressure)));
        rows.push(("Humidity", format!("{}%", w.humidity)));
        if let Some(sea) = w.sea_level {
            rows.push(("Sea level pressure", format!("{} hPa", sea)));
        }
        if let Some(ground) = w.ground_level {
            rows.push(("Ground level pressure", format!("{} hPa", ground)));
        }
    }
    rows.push(("Visibility", format!("{} m", location.visibility)));
    if let Some(wind) = &location.wind {
        let mut value = format!(
            "{:.1} {} from {}°",
            wind.speed,
            units.speed_symbol(),
            wind.direction
        );
        if let Some(gust) = wind.gust {
            value.push_str(&format!(" (gusts {:.1})", gust));
        }
        rows.push(("Wind", value));
    }
    if let Some(clouds) = &location.clouds {
        rows.push(("Cloudiness", format!("{}%", clouds.cloudiness)));
    }
    for (label, precipitation) in [("Rain", &location.rain), ("Snow", &location.snow)] {
        if let Some(p) = precipitation {
            if let Some(mm) = p.last_hour {
                rows.push((label, format!("{:.1} mm (1h)", mm)));
            } else if let Some(mm) = p.last_three_hours {
                rows.push((label, format!("{:.1} mm (3h)", mm)));
            }
        }
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Reading"), Cell::new("Value")]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    format!("UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

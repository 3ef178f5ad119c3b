use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::error::Error as _;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::FetchError,
    model::{CityQuery, WeatherReport},
};

use super::WeatherFetcher;

/// Public OpenWeather host.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// Current-weather lookups against an OpenWeather-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherFetcher {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Target another host, e.g. a local stub server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;
        Ok(Self::with_base_url(api_key.to_owned(), config.base_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One GET; the body is read here so that a connection dropped mid-body
    /// still counts as a transport failure. reqwest reports such a drop as a
    /// decode error, and nothing here asks reqwest to decode.
    async fn send(&self, city: &CityQuery) -> Result<RawResponse, reqwest::Error> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn fetch(&self, city: &CityQuery) -> Result<WeatherReport, FetchError> {
        debug!(%city, base_url = %self.base_url, "requesting current weather");

        let result = classify(self.send(city).await);

        match &result {
            Ok(report) => debug!(
                location = %report.location_name,
                country = %report.country,
                "current weather received"
            ),
            Err(err) if err.is_input_error() => info!(%city, "provider does not know this city"),
            Err(err) => warn!(%city, error = %err, "weather fetch failed"),
        }

        result
    }
}

#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    body: String,
}

/// The only place where transport outcomes turn into reports or [`FetchError`]s.
fn classify(outcome: Result<RawResponse, reqwest::Error>) -> Result<WeatherReport, FetchError> {
    match outcome {
        Ok(raw) if raw.status.is_success() => parse_report(&raw.body),
        Ok(raw) if raw.status == StatusCode::NOT_FOUND => Err(FetchError::NotFound),
        Ok(raw) => Err(FetchError::Provider(provider_message(&raw))),
        Err(err) if err.is_builder() || err.is_redirect() => {
            Err(FetchError::Unknown(describe(err)))
        }
        Err(err) => {
            debug!(error = %describe(err), "no response from weather provider");
            Err(FetchError::Network)
        }
    }
}

fn parse_report(body: &str) -> Result<WeatherReport, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Unknown(format!("Malformed weather response: {e}")))?;

    parsed.into_report().map_err(FetchError::Unknown)
}

/// `message` from the error body, or the status line when the body has none.
fn provider_message(raw: &RawResponse) -> String {
    serde_json::from_str::<OwErrorBody>(&raw.body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| raw.status.to_string())
}

/// Error text with its source chain. The URL is stripped since it carries the credential.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_report(self) -> Result<WeatherReport, String> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| "Weather response contained no conditions".to_string())?;

        if !self.main.temp.is_finite() {
            return Err(format!("Invalid temperature in weather response: {}", self.main.temp));
        }

        let humidity = self.main.humidity;
        if !(0.0..=100.0).contains(&humidity) {
            return Err(format!("Humidity out of range in weather response: {humidity}"));
        }

        let wind = self.wind.speed;
        if !wind.is_finite() || wind < 0.0 {
            return Err(format!("Invalid wind speed in weather response: {wind}"));
        }

        Ok(WeatherReport {
            location_name: self.name,
            country: self.sys.country,
            temperature_c: self.main.temp,
            condition,
            humidity_pct: humidity.round() as u8,
            wind_speed_mps: wind,
        })
    }
}

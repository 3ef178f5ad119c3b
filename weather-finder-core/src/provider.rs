use crate::{
    CityQuery, Config, FetchError, WeatherReport, provider::openweather::OpenWeatherFetcher,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Turns a city name into current conditions with exactly one provider request.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, city: &CityQuery) -> Result<WeatherReport, FetchError>;
}

/// Construct the fetcher described by `config`.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherFetcher>> {
    Ok(Box::new(OpenWeatherFetcher::from_config(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = fetcher_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn fetcher_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(fetcher_from_config(&cfg).is_ok());
    }

    #[test]
    fn fetcher_uses_configured_base_url() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.set_base_url(Some("http://127.0.0.1:4000".to_string()));

        let fetcher = OpenWeatherFetcher::from_config(&cfg).expect("fetcher");
        assert_eq!(fetcher.base_url(), "http://127.0.0.1:4000");
    }
}

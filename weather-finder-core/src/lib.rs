//! Core library for the `weather-finder` CLI.
//!
//! This crate defines:
//! - The city → current-weather lookup and its failure taxonomy
//! - The single in-flight request slot used by front ends
//! - Configuration & credentials handling
//!
//! It is used by `weather-finder-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod state;

pub use config::Config;
pub use error::FetchError;
pub use model::{CityQuery, WeatherReport};
pub use provider::{WeatherFetcher, fetcher_from_config, openweather::OpenWeatherFetcher};
pub use state::{RequestSlot, RequestState, SlotGuard};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use std::process::ExitCode;
use weather_finder_core::{
    CityQuery, Config, RequestSlot, RequestState, WeatherFetcher, fetcher_from_config,
    provider::openweather::DEFAULT_BASE_URL,
};

use crate::render;

/// City shown in the prompt when nothing has been searched yet.
const DEFAULT_CITY: &str = "Pune";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-finder", version, about = "Current weather for a city")]
pub struct Cli {
    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and, optionally, a different API host.
    Configure,

    /// Show current weather for one city.
    Show {
        /// City name, e.g. "Pune" or "London,GB".
        city: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Keep asking for cities until the prompt is cancelled (Esc / Ctrl-C).
    Search {
        /// City suggested in the first prompt.
        #[arg(long, default_value = DEFAULT_CITY)]
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => {
                let fetcher = load_fetcher()?;
                show(fetcher.as_ref(), CityQuery::from(city), json).await
            }
            Command::Search { city } => {
                let fetcher = load_fetcher()?;
                search(fetcher.as_ref(), city).await
            }
        }
    }
}

fn load_fetcher() -> anyhow::Result<Box<dyn WeatherFetcher>> {
    let config = Config::load()?.with_env_overrides();
    fetcher_from_config(&config)
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("API host:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read API host")?;

    config.set_api_key(api_key);
    let base_url = base_url.trim().trim_end_matches('/');
    config.set_base_url((base_url != DEFAULT_BASE_URL).then(|| base_url.to_string()));

    // `api_key()` rejects blank keys; fail before writing them.
    config.api_key()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(ExitCode::SUCCESS)
}

async fn show(
    fetcher: &dyn WeatherFetcher,
    city: CityQuery,
    json: bool,
) -> anyhow::Result<ExitCode> {
    match fetcher.fetch(&city).await {
        Ok(report) if json => {
            let out =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        Ok(report) => {
            println!("{}", render::report(&report, Local::now()));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", render::failure(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn search(fetcher: &dyn WeatherFetcher, first_city: String) -> anyhow::Result<ExitCode> {
    let slot = RequestSlot::new();
    let mut last_city = first_city;

    loop {
        let input = match Text::new("City:").with_default(&last_city).prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        let city = CityQuery::from(input.clone());
        println!("Fetching weather for {city}...");

        if slot.run(fetcher, &city).await.is_none() {
            continue;
        }

        match slot.state() {
            RequestState::Succeeded(report) => {
                println!("{}\n", render::report(&report, Local::now()));
                last_city = input;
            }
            RequestState::Failed(err) => eprintln!("{}\n", render::failure(&err)),
            RequestState::Idle | RequestState::Loading => {}
        }

        slot.dismiss();
    }

    Ok(ExitCode::SUCCESS)
}

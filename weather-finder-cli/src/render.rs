//! Human-friendly output for reports and failures.

use chrono::{DateTime, Local};
use weather_finder_core::{FetchError, WeatherReport};

pub fn report(report: &WeatherReport, fetched_at: DateTime<Local>) -> String {
    format!(
        "Weather Report\n\
         {name}, {country}\n\
         {temp}°C\n\
         {condition}\n\
         Humidity: {humidity}%\n\
         Wind Speed: {wind} m/s\n\
         (fetched at {time})",
        name = report.location_name,
        country = report.country,
        temp = report.temperature_c,
        condition = report.condition,
        humidity = report.humidity_pct,
        wind = report.wind_speed_mps,
        time = fetched_at.format("%H:%M"),
    )
}

pub fn failure(err: &FetchError) -> String {
    let hint = if err.is_input_error() {
        "Check the city name and try again."
    } else {
        "Try again later."
    };
    format!("{}\n{hint}", err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pune() -> WeatherReport {
        WeatherReport {
            location_name: "Pune".into(),
            country: "IN".into(),
            temperature_c: 28.5,
            condition: "clear sky".into(),
            humidity_pct: 40,
            wind_speed_mps: 3.2,
        }
    }

    #[test]
    fn report_lists_every_field() {
        let at = Local
            .with_ymd_and_hms(2026, 10, 17, 9, 30, 0)
            .single()
            .expect("unambiguous local time");
        let out = report(&pune(), at);

        assert!(out.starts_with("Weather Report"));
        assert!(out.contains("Pune, IN"));
        assert!(out.contains("28.5°C"));
        assert!(out.contains("clear sky"));
        assert!(out.contains("Humidity: 40%"));
        assert!(out.contains("Wind Speed: 3.2 m/s"));
        assert!(out.contains("09:30"));
    }

    #[test]
    fn whole_degrees_print_without_fraction() {
        let mut r = pune();
        r.temperature_c = 28.0;
        assert!(report(&r, Local::now()).contains("\n28°C\n"));
    }

    #[test]
    fn failure_hints_match_category() {
        assert!(failure(&FetchError::NotFound).contains("Check the city name"));
        assert!(failure(&FetchError::Network).contains("Try again later"));
        assert!(
            failure(&FetchError::Provider("server error".into()))
                .starts_with("Error: server error")
        );
    }
}

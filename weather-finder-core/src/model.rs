use serde::{Deserialize, Serialize};
use std::fmt;

/// City name as typed by the user.
///
/// Nothing is validated here: an empty query is sent to the provider as-is
/// and comes back as "not found".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self(city.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CityQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CityQuery {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for one location, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    /// ISO 3166 country code as reported by the provider, e.g. "IN".
    pub country: String,
    pub temperature_c: f64,
    pub condition: String,
    /// 0..=100
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_keeps_input_verbatim() {
        let q = CityQuery::from("  New York ");
        assert_eq!(q.as_str(), "  New York ");
        assert!(!q.is_empty());
        assert!(CityQuery::default().is_empty());
    }

    #[test]
    fn report_serializes_all_fields() {
        let report = WeatherReport {
            location_name: "Pune".into(),
            country: "IN".into(),
            temperature_c: 28.5,
            condition: "clear sky".into(),
            humidity_pct: 40,
            wind_speed_mps: 3.2,
        };

        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["location_name"], "Pune");
        assert_eq!(json["country"], "IN");
        assert_eq!(json["humidity_pct"], 40);
    }
}

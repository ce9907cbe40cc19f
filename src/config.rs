use std::env;

use crate::error::AppError;
use crate::ledger::DEFAULT_BASE_POINTS;
use crate::models::location::LocationCatalog;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub base_points_per_ride: u32,
    pub seed_pullers: Vec<String>,
    pub static_dir: String,
    pub locations: LocationCatalog,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let locations = match env::var("LOCATIONS_FILE") {
            Ok(path) => load_locations(&path)?,
            Err(_) => LocationCatalog::default(),
        };

        let config = Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            base_points_per_ride: parse_or_default("BASE_POINTS_PER_RIDE", DEFAULT_BASE_POINTS)?,
            seed_pullers: parse_list(
                &env::var("SEED_PULLERS").unwrap_or_else(|_| "puller_001".to_string()),
            ),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            locations,
        };

        config.validate()?;
        Ok(config)
    }

    /// Completed rides must carry nonzero points, so a zero award is refused.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.base_points_per_ride == 0 {
            return Err(AppError::Internal(
                "BASE_POINTS_PER_RIDE must be > 0".to_string(),
            ));
        }
        if self.event_buffer_size == 0 {
            return Err(AppError::Internal(
                "EVENT_BUFFER_SIZE must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            log_level: "info".to_string(),
            event_buffer_size: 1024,
            base_points_per_ride: DEFAULT_BASE_POINTS,
            seed_pullers: vec!["puller_001".to_string()],
            static_dir: "static".to_string(),
            locations: LocationCatalog::default(),
        }
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn load_locations(path: &str) -> Result<LocationCatalog, AppError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| AppError::Internal(format!("failed to read {path}: {err}")))?;
    serde_json::from_str(&raw)
        .map_err(|err| AppError::Internal(format!("invalid locations in {path}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::{Config, load_locations, parse_list};

    #[test]
    fn parse_list_skips_blank_entries() {
        assert_eq!(
            parse_list(" puller_001, ,puller_002,"),
            vec!["puller_001".to_string(), "puller_002".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn default_config_seeds_demo_puller() {
        let config = Config::default();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.base_points_per_ride, 10);
        assert_eq!(config.seed_pullers, vec!["puller_001".to_string()]);
        assert_eq!(config.locations.len(), 4);
    }

    #[test]
    fn zero_base_points_is_rejected() {
        let config = Config {
            base_points_per_ride: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn load_locations_reads_json_file() {
        let path = std::env::temp_dir().join(format!("locations-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"Depot": {"lat": 22.1, "lon": 91.8}}"#).unwrap();

        let catalog = load_locations(path.to_str().unwrap()).unwrap();
        assert!(catalog.contains("Depot"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_locations_fails_for_missing_file() {
        assert!(load_locations("/nonexistent/locations.json").is_err());
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::haversine_km;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Named pickup and drop-off points known to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCatalog(BTreeMap<String, GeoPoint>);

impl LocationCatalog {
    pub fn get(&self, name: &str) -> Option<&GeoPoint> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Great-circle distance between two catalog entries, `None` if either is unknown.
    pub fn distance_km(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.get(from)?;
        let to = self.get(to)?;
        Some(haversine_km(from, to))
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        let entries = [
            ("CUET Campus", 22.4633, 91.9714),
            ("Pahartoli", 22.4725, 91.9845),
            ("Noapara", 22.4580, 91.9920),
            ("Raojan", 22.4520, 91.9650),
        ]
        .into_iter()
        .map(|(name, lat, lon)| (name.to_string(), GeoPoint { lat, lon }))
        .collect();

        Self(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::LocationCatalog;

    #[test]
    fn default_catalog_has_campus_area_points() {
        let catalog = LocationCatalog::default();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.contains("CUET Campus"));
        assert!(catalog.contains("Raojan"));
        assert!(!catalog.contains("Dhaka"));
    }

    #[test]
    fn distance_is_none_for_unknown_location() {
        let catalog = LocationCatalog::default();
        assert!(catalog.distance_km("CUET Campus", "Dhaka").is_none());
        assert!(catalog.distance_km("Dhaka", "Pahartoli").is_none());
    }

    #[test]
    fn parses_from_json_object() {
        let catalog: LocationCatalog =
            serde_json::from_str(r#"{"Depot": {"lat": 22.0, "lon": 91.0}}"#).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Depot").unwrap().lon, 91.0);
    }
}

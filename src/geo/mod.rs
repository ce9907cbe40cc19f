use crate::models::location::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance on a spherical earth.
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let (phi_from, phi_to) = (from.lat.to_radians(), to.lat.to_radians());
    let half_dphi = (phi_to - phi_from) / 2.0;
    let half_dlambda = (to.lon - from.lon).to_radians() / 2.0;

    let h = half_dphi.sin().powi(2)
        + phi_from.cos() * phi_to.cos() * half_dlambda.sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).max(0.0).sqrt())
}

#[cfg(test)]
mod tests {
    use super::haversine_km;
    use crate::models::location::GeoPoint;

    #[test]
    fn zero_distance_for_same_point() {
        let campus = GeoPoint {
            lat: 22.4633,
            lon: 91.9714,
        };
        assert!(haversine_km(&campus, &campus) < 1e-9);
    }

    #[test]
    fn campus_to_pahartoli_is_under_two_km() {
        let campus = GeoPoint {
            lat: 22.4633,
            lon: 91.9714,
        };
        let pahartoli = GeoPoint {
            lat: 22.4725,
            lon: 91.9845,
        };
        let distance = haversine_km(&campus, &pahartoli);
        assert!((distance - 1.7).abs() < 0.2, "got {distance}");
    }

    #[test]
    fn distance_is_symmetric() {
        let noapara = GeoPoint {
            lat: 22.4580,
            lon: 91.9920,
        };
        let raojan = GeoPoint {
            lat: 22.4520,
            lon: 91.9650,
        };
        let there = haversine_km(&noapara, &raojan);
        let back = haversine_km(&raojan, &noapara);
        assert!((there - back).abs() < 1e-9);
    }
}

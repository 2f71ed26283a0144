use crate::prelude::EARTH_RADIUS_KM;

/// Great-circle distance in kilometres between two coordinates given in degrees.
///
/// Uses the haversine formula on a sphere of radius `EARTH_RADIUS_KM + altitude_km`.
/// Non-finite inputs propagate into the result.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, altitude_km: f64) -> f64 {
    let radius = EARTH_RADIUS_KM + altitude_km;
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

/// Surface distance, altitude zero.
pub fn surface_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance(lat1, lon1, lat2, lon2, 0.0)
}

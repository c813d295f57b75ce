//! Great-circle distance primitives over signed lat/lon degrees.
//!
//! Assumes a spherical Earth; accuracy is well within the GPS fix
//! error for colony-scale distances.

/// Mean Earth radius in kilometres (IUGG R1).
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Haversine great-circle distance in kilometres between two points
/// given as (latitude, longitude) in signed degrees. Symmetric in its
/// arguments.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Distance of every point to the trajectory origin: the first index
/// where both coordinates are present. Points with a missing
/// coordinate, and all points when no origin exists, map to `None`.
pub fn distances_from_origin(
    latitudes: &[Option<f64>],
    longitudes: &[Option<f64>],
) -> Vec<Option<f64>> {
    debug_assert_eq!(latitudes.len(), longitudes.len());

    let origin = latitudes
        .iter()
        .zip(longitudes.iter())
        .find_map(|(lat, lon)| Some(((*lat)?, (*lon)?)));

    let Some((origin_lat, origin_lon)) = origin else {
        return vec![None; latitudes.len()];
    };

    latitudes
        .iter()
        .zip(longitudes.iter())
        .map(|(lat, lon)| {
            let (lat, lon) = ((*lat)?, (*lon)?);
            Some(haversine_km(origin_lat, origin_lon, lat, lon))
        })
        .collect()
}

/// Along-path mode: distance between each pair of consecutive points.
/// Output length is `len - 1` (empty for zero or one point); a step
/// with a missing endpoint is `None`.
pub fn step_distances_km(
    latitudes: &[Option<f64>],
    longitudes: &[Option<f64>],
) -> Vec<Option<f64>> {
    debug_assert_eq!(latitudes.len(), longitudes.len());

    if latitudes.len() < 2 {
        return Vec::new();
    }

    (1..latitudes.len())
        .map(|idx| {
            let (lat1, lon1) = (latitudes[idx - 1]?, longitudes[idx - 1]?);
            let (lat2, lon2) = (latitudes[idx]?, longitudes[idx]?);
            Some(haversine_km(lat1, lon1, lat2, lon2))
        })
        .collect()
}

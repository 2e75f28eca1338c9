use crate::model::Coordinates;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres (haversine)
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Keep items within `radius_km` of `origin`, nearest first.
pub fn nearest_within<T>(
    items: Vec<T>,
    origin: Coordinates,
    radius_km: f64,
    position: impl Fn(&T) -> Coordinates,
) -> Vec<T> {
    let mut ranked: Vec<(f64, T)> = items
        .into_iter()
        .map(|item| (distance_km(origin, position(&item)), item))
        .filter(|(distance, _)| *distance <= radius_km)
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().map(|(_, item)| item).collect()
}

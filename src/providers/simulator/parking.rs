use crate::model::{Location, ParkingType, ParkingZone};
use rand::Rng;

const DISTRICTS: [(f64, f64, &str); 8] = [
    (25.2048, 55.2708, "Downtown Dubai"),
    (25.0761, 55.1704, "Dubai Marina"),
    (25.0331, 55.1716, "Business Bay"),
    (25.1972, 55.2744, "Deira"),
    (25.276, 55.3631, "Jumeirah"),
    (25.2003, 55.1577, "JBR"),
    (25.148, 55.2066, "Arabian Ranches"),
    (25.0754, 55.3061, "Al Barsha"),
];

const TYPES: [ParkingType; 3] = [ParkingType::Street, ParkingType::Garage, ParkingType::Lot];

const NEARBY_POIS: [&str; 6] = [
    "Shopping Mall",
    "Restaurant",
    "Hotel",
    "Office",
    "Residential",
    "Beach",
];

pub(super) fn generate_parking_zones(rng: &mut impl Rng, count: usize) -> Vec<ParkingZone> {
    (0..count).map(|id| generate_parking_zone(rng, id)).collect()
}

fn generate_parking_zone(rng: &mut impl Rng, id: usize) -> ParkingZone {
    let (lat, lng, district) = DISTRICTS[rng.gen_range(0..DISTRICTS.len())];
    let capacity: u32 = rng.gen_range(50..250);
    // 10-100% occupied
    let occupancy = rng.gen::<f64>() * 0.9 + 0.1;
    let occupied = (capacity as f64 * occupancy).floor() as u32;
    let parking_type = TYPES[rng.gen_range(0..TYPES.len())];

    let latitude = lat + (rng.gen::<f64>() - 0.5) * 0.02;
    let longitude = lng + (rng.gen::<f64>() - 0.5) * 0.02;
    let poi_count = rng.gen_range(1..=3);

    ParkingZone {
        location: Location {
            id: format!("parking-{}", id),
            latitude,
            longitude,
            address: format!("{}, Dubai", district),
            district: district.to_string(),
            zone: None,
        },
        capacity,
        occupied: occupied.min(capacity),
        hourly_rate: parking_type.hourly_rate(),
        nearby_pois: NEARBY_POIS[..poi_count]
            .iter()
            .map(|p| p.to_string())
            .collect(),
        walking_distance: rng.gen_range(50..850),
        parking_type,
    }
}

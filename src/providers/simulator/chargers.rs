use crate::model::{ChargerType, EvCharger, Location};
use rand::Rng;

const DISTRICTS: [(f64, f64, &str); 10] = [
    (25.2048, 55.2708, "Downtown Dubai"),
    (25.0761, 55.1704, "Business Bay"),
    (25.0331, 55.1716, "Dubai Marina"),
    (25.1972, 55.2744, "Deira"),
    (25.276, 55.3631, "Jumeirah"),
    (25.2003, 55.1577, "JBR"),
    (25.148, 55.2066, "Arabian Ranches"),
    (25.0754, 55.3061, "Al Barsha"),
    (25.1811, 55.2659, "Al Karama"),
    (25.1245, 55.1959, "Dubai Hills Estate"),
];

const OPERATORS: [&str; 5] = [
    "DEWA",
    "Charge Spot UAE",
    "GreenPower",
    "EV Connect",
    "Smart Charge",
];

/// (class, kW)
const CLASSES: [(ChargerType, f64); 3] = [
    (ChargerType::Slow, 7.0),
    (ChargerType::Fast, 22.0),
    (ChargerType::UltraFast, 150.0),
];

const AMENITIES: [&str; 7] = [
    "WiFi",
    "Coffee Shop",
    "Restroom",
    "Shaded Parking",
    "EV Display",
    "Fast Food",
    "Shopping",
];

pub(super) fn generate_chargers(rng: &mut impl Rng, count: usize) -> Vec<EvCharger> {
    (0..count).map(|id| generate_charger(rng, id)).collect()
}

fn generate_charger(rng: &mut impl Rng, id: usize) -> EvCharger {
    let (lat, lng, district) = DISTRICTS[rng.gen_range(0..DISTRICTS.len())];
    let (charger_type, power) = CLASSES[rng.gen_range(0..CLASSES.len())];
    let total_sockets = rng.gen_range(2..10);
    let available_sockets = rng.gen_range(0..=total_sockets);

    let latitude = lat + (rng.gen::<f64>() - 0.5) * 0.01;
    let longitude = lng + (rng.gen::<f64>() - 0.5) * 0.01;
    let price = charger_type.base_price() + (rng.gen::<f64>() - 0.5) * 0.4;
    let operator = OPERATORS[rng.gen_range(0..OPERATORS.len())];
    let amenity_count = rng.gen_range(1..=4);

    let predicted_free_time = (available_sockets == 0)
        .then(|| format!("{:02}:{:02}", rng.gen_range(0..24), rng.gen_range(0..60)));

    EvCharger {
        location: Location {
            id: format!("charger-{}", id),
            latitude,
            longitude,
            address: format!("{}, Dubai", district),
            district: district.to_string(),
            zone: None,
        },
        charger_type,
        total_sockets,
        available_sockets,
        power_output: power,
        price: (price * 100.0).round() / 100.0,
        operator: operator.to_string(),
        amenities: AMENITIES[..amenity_count]
            .iter()
            .map(|a| a.to_string())
            .collect(),
        predicted_free_time,
        reliability: rng.gen_range(70..100),
    }
}

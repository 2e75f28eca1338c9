use crate::model::{Event, ImpactZone, Location, MobilityImpact};
use chrono::{DateTime, Duration, FixedOffset};
use rand::Rng;

/// (name, lat, lng, default crowd)
const VENUES: [(&str, f64, f64, u32); 6] = [
    ("Global Village", 25.1153, 55.1521, 50_000),
    ("Expo City Dubai", 25.0969, 55.1689, 30_000),
    ("Downtown Dubai", 25.1965, 55.2684, 100_000),
    ("Dubai Mall", 25.1972, 55.2744, 75_000),
    ("Emirates Stadium", 25.1103, 55.1377, 60_000),
    ("Hatta Dam Area", 25.0697, 55.5219, 5_000),
];

const EVENT_TYPES: [&str; 6] = [
    "Concert",
    "Sports Event",
    "Festival",
    "Conference",
    "Market",
    "Exhibition",
];

const DISTRICTS: [&str; 5] = [
    "Downtown Dubai",
    "Business Bay",
    "Marina",
    "Deira",
    "Al Karama",
];

const GENERATED_EVENTS: usize = 8;

fn parking_closures(district: &str) -> &'static [&'static str] {
    match district {
        "Downtown Dubai" => &["P1-Downtown", "P2-Downtown"],
        "Business Bay" => &["P1-Bay", "P3-Bay"],
        "Marina" => &["Marina-North", "Marina-South"],
        "Deira" => &["Deira-A", "Deira-B", "Deira-C"],
        "Al Karama" => &["Karama-Main"],
        _ => &[],
    }
}

fn route_diversions(district: &str) -> &'static [&'static str] {
    match district {
        "Downtown Dubai" => &["E11 towards Marina", "Emaar Boulevard"],
        "Business Bay" => &["Sheikh Zayed Road alternate"],
        "Marina" => &["JBR Corniche", "Marina Promenade"],
        "Deira" => &["Al Khaleej Road", "Port Saeed"],
        "Al Karama" => &["Al Fahidi Street"],
        _ => &[],
    }
}

fn collect_for(districts: &[String], table: fn(&str) -> &'static [&'static str]) -> Vec<String> {
    districts
        .iter()
        .flat_map(|d| table(d).iter().map(|s| s.to_string()))
        .collect()
}

fn generate_event(
    rng: &mut impl Rng,
    id: usize,
    now: DateTime<FixedOffset>,
) -> (DateTime<FixedOffset>, Event) {
    let (venue, lat, lng, default_crowd) = VENUES[id % VENUES.len()];
    let event_type = EVENT_TYPES[rng.gen_range(0..EVENT_TYPES.len())];

    let start = now + Duration::days(rng.gen_range(0..30));
    let end = start + Duration::hours(if rng.gen_bool(0.5) { 3 } else { 6 });

    let radius_km = if event_type == "Sports Event" { 2.0 } else { 1.5 };
    let affected_areas: Vec<String> = DISTRICTS[..rng.gen_range(1..=3)]
        .iter()
        .map(|d| d.to_string())
        .collect();
    let crowd = (default_crowd as f64 * (0.5 + rng.gen::<f64>() * 0.5)).floor() as u32;

    let event = Event {
        id: format!("event-{}", id),
        name: format!("{} at {}", event_type, venue),
        location: Location {
            id: format!("venue-{}", id),
            latitude: lat,
            longitude: lng,
            address: format!("{}, Dubai", venue),
            district: venue.to_string(),
            zone: None,
        },
        start_time: start.to_rfc3339(),
        end_time: end.to_rfc3339(),
        expected_crowd: crowd,
        impact_zone: ImpactZone {
            latitude: lat,
            longitude: lng,
            radius_km,
        },
        mobility_impact: MobilityImpact {
            parking_closures: collect_for(&affected_areas, parking_closures),
            transit_delays: rng.gen_range(5..35),
            route_diversions: collect_for(&affected_areas, route_diversions),
        },
        affected_areas,
    };
    (start, event)
}

/// Events that start within `[now, now + days_ahead]`, in generation order
pub(super) fn upcoming(
    rng: &mut impl Rng,
    now: DateTime<FixedOffset>,
    days_ahead: u32,
) -> Vec<Event> {
    let horizon = now + Duration::days(i64::from(days_ahead));

    (0..GENERATED_EVENTS)
        .filter_map(|id| {
            let (start, event) = generate_event(rng, id, now);
            (start >= now && start <= horizon).then_some(event)
        })
        .collect()
}

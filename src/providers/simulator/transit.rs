use crate::geo;
use crate::model::{
    Arrival, Coordinates, Location, TransitKind, TransitRoute, TransitSchedule, TransitStop,
};
use rand::Rng;

fn stop(id: &str, latitude: f64, longitude: f64, address: &str, district: &str) -> Location {
    Location {
        id: id.to_string(),
        latitude,
        longitude,
        address: address.to_string(),
        district: district.to_string(),
        zone: None,
    }
}

fn downtown() -> Location {
    stop("stop-downtown", 25.2048, 55.2708, "Downtown Dubai", "Downtown")
}

fn marina() -> Location {
    stop("stop-marina", 25.0761, 55.1704, "Dubai Marina", "Marina")
}

fn deira() -> Location {
    stop("stop-deira", 25.276, 55.3631, "Deira", "Deira")
}

fn jbr() -> Location {
    stop("stop-jbr", 25.2003, 55.1577, "Jumeirah Beach Residence", "JBR")
}

fn emirates() -> Location {
    stop("stop-emirates", 25.1811, 55.2659, "Emirates", "Emirates")
}

fn route(
    id: &str,
    name: &str,
    kind: TransitKind,
    stops: Vec<Location>,
    (start_time, end_time, frequency): (&str, &str, u32),
    current_load: f64,
) -> TransitRoute {
    TransitRoute {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        stops,
        schedule: TransitSchedule {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            frequency,
        },
        current_load,
    }
}

/// Metro lines first, then bus routes
pub(super) fn routes() -> Vec<TransitRoute> {
    vec![
        route(
            "metro-red",
            "Red Line",
            TransitKind::Metro,
            vec![downtown(), deira(), emirates()],
            ("06:00", "00:00", 4),
            65.0,
        ),
        route(
            "metro-green",
            "Green Line",
            TransitKind::Metro,
            vec![marina(), downtown(), emirates()],
            ("06:00", "00:00", 5),
            55.0,
        ),
        route(
            "bus-f1",
            "F1 - Downtown to Marina",
            TransitKind::Bus,
            vec![downtown(), marina()],
            ("05:30", "23:30", 10),
            72.0,
        ),
        route(
            "bus-x91",
            "X91 - Deira Express",
            TransitKind::Bus,
            vec![deira(), emirates()],
            ("06:00", "23:00", 15),
            48.0,
        ),
        route(
            "bus-8",
            "8 - JBR Loop",
            TransitKind::Bus,
            vec![jbr(), marina()],
            ("05:00", "00:30", 8),
            85.0,
        ),
    ]
}

pub(super) fn stops_near(
    rng: &mut impl Rng,
    at: Coordinates,
    radius_km: f64,
) -> Vec<TransitStop> {
    let mut stops: Vec<TransitStop> = Vec::new();

    for route in routes() {
        for location in route.stops {
            if geo::distance_km(at, location.coordinates()) > radius_km {
                continue;
            }

            let arrival = Arrival {
                route_id: route.id.clone(),
                arrival_time: rng.gen_range(2..17),
                load: route.current_load + (rng.gen::<f64>() - 0.5) * 20.0,
            };

            match stops.iter_mut().find(|s| s.location.id == location.id) {
                Some(existing) => {
                    existing.routes.push(route.id.clone());
                    existing.next_arrivals.push(arrival);
                }
                None => stops.push(TransitStop {
                    location,
                    routes: vec![route.id.clone()],
                    next_arrivals: vec![arrival],
                }),
            }
        }
    }

    geo::nearest_within(stops, at, radius_km, |s| s.location.coordinates())
}

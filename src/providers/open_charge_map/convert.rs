use crate::model::{ChargerType, EvCharger, Location};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Raw POI record as returned by `GET /poi` (compact mode)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmPoi {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(default)]
    pub address_info: Option<OcmAddress>,
    #[serde(default)]
    pub connections: Vec<OcmConnection>,
    #[serde(default)]
    pub operator_info: Option<OcmOperator>,
    #[serde(default)]
    pub usage_type: Option<OcmUsageType>,
    #[serde(default)]
    pub status_type: Option<OcmStatusType>,
    #[serde(default)]
    pub number_of_points: Option<u32>,
    #[serde(default)]
    pub general_comments: Option<String>,
    #[serde(default)]
    pub date_last_verified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_last_status_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmAddress {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub state_or_province: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmConnection {
    #[serde(rename = "PowerKW", default)]
    pub power_kw: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmOperator {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmUsageType {
    #[serde(default)]
    pub is_pay_at_location: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmStatusType {
    #[serde(default)]
    pub is_operational: Option<bool>,
}

const DEFAULT_POWER_KW: f64 = 7.0;
const AVAILABILITY_ESTIMATE: f64 = 0.7;
const PREMIUM_OPERATORS: [&str; 4] = ["tesla", "porsche", "ionity", "fastned"];
const PREMIUM_MULTIPLIER: f64 = 1.3;

/// Convert a POI into the internal charger shape.
///
/// Returns None for records without usable coordinates.
pub fn to_charger(poi: &OcmPoi, now: DateTime<Utc>) -> Option<EvCharger> {
    let address = poi.address_info.as_ref()?;
    let latitude = address.latitude.filter(|v| *v != 0.0)?;
    let longitude = address.longitude.filter(|v| *v != 0.0)?;

    let charger_type = charger_type(&poi.connections);
    let total_sockets = total_points(poi);

    Some(EvCharger {
        location: Location {
            id: format!("ocm-{}", poi.id),
            latitude,
            longitude,
            address: first_non_empty(&[&address.address_line1, &address.title])
                .unwrap_or_default(),
            district: first_non_empty(&[&address.town, &address.state_or_province])
                .unwrap_or_else(|| "Dubai".to_string()),
            zone: None,
        },
        charger_type,
        total_sockets,
        available_sockets: estimated_available(poi, total_sockets),
        power_output: max_power_kw(&poi.connections),
        price: estimated_price(charger_type, operator_title(poi)),
        operator: operator_title(poi)
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown Operator".to_string()),
        amenities: amenities(poi),
        predicted_free_time: None,
        reliability: reliability(poi, now),
    })
}

fn first_non_empty(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn operator_title(poi: &OcmPoi) -> Option<&str> {
    poi.operator_info
        .as_ref()
        .and_then(|o| o.title.as_deref())
        .filter(|t| !t.is_empty())
}

fn total_points(poi: &OcmPoi) -> u32 {
    poi.number_of_points
        .filter(|n| *n > 0)
        .or_else(|| u32::try_from(poi.connections.len()).ok().filter(|n| *n > 0))
        .unwrap_or(1)
}

/// Highest connector power; connectors without a rating count as 7 kW.
pub fn max_power_kw(connections: &[OcmConnection]) -> f64 {
    connections
        .iter()
        .map(|c| c.power_kw.filter(|p| *p > 0.0).unwrap_or(DEFAULT_POWER_KW))
        .fold(None, |max: Option<f64>, p| Some(max.map_or(p, |m| m.max(p))))
        .unwrap_or(DEFAULT_POWER_KW)
}

/// Class from the highest rated connector; unrated connectors count as 0 kW here.
pub fn charger_type(connections: &[OcmConnection]) -> ChargerType {
    let max_rated = connections
        .iter()
        .map(|c| c.power_kw.unwrap_or(0.0))
        .fold(0.0_f64, f64::max);
    ChargerType::from_max_power(max_rated)
}

/// The directory has no live occupancy; assume 70% of points are free unless the
/// station is explicitly marked non-operational.
fn estimated_available(poi: &OcmPoi, total: u32) -> u32 {
    let operational = poi
        .status_type
        .as_ref()
        .and_then(|s| s.is_operational)
        != Some(false);
    if operational {
        (f64::from(total) * AVAILABILITY_ESTIMATE).ceil() as u32
    } else {
        0
    }
}

pub fn estimated_price(charger_type: ChargerType, operator: Option<&str>) -> f64 {
    let operator = operator.unwrap_or_default().to_lowercase();
    let multiplier = if PREMIUM_OPERATORS.iter().any(|p| operator.contains(p)) {
        PREMIUM_MULTIPLIER
    } else {
        1.0
    };
    (charger_type.base_price() * multiplier * 100.0).round() / 100.0
}

fn amenities(poi: &OcmPoi) -> Vec<String> {
    let mut amenities = Vec::new();

    if poi
        .usage_type
        .as_ref()
        .and_then(|u| u.is_pay_at_location)
        .unwrap_or(false)
    {
        amenities.push("Pay at Location".to_string());
    }

    let comments = poi
        .general_comments
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    for (keyword, amenity) in [
        ("wifi", "WiFi"),
        ("coffee", "Coffee Shop"),
        ("restroom", "Restroom"),
        ("shade", "Shaded Parking"),
    ] {
        if comments.contains(keyword) {
            amenities.push(amenity.to_string());
        }
    }

    amenities
}

fn reliability(poi: &OcmPoi, now: DateTime<Utc>) -> u32 {
    let mut score = 70;

    if let Some(verified) = poi.date_last_verified {
        let days = (now - verified).num_days();
        if days < 30 {
            score += 15;
        } else if days < 90 {
            score += 10;
        }
    }

    if poi
        .status_type
        .as_ref()
        .and_then(|s| s.is_operational)
        .unwrap_or(false)
    {
        score += 10;
    }

    if let Some(updated) = poi.date_last_status_update {
        if (now - updated).num_days() < 7 {
            score += 5;
        }
    }

    score.min(95)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-10-15T12:00:00Z".parse().unwrap()
    }

    fn poi(json: serde_json::Value) -> OcmPoi {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_full_record_conversion() {
        let record = poi(serde_json::json!({
            "ID": 1234,
            "AddressInfo": {
                "Title": "Dubai Mall P2",
                "AddressLine1": "Financial Centre Rd",
                "Town": "Downtown",
                "Latitude": 25.1972,
                "Longitude": 55.2796
            },
            "Connections": [{"PowerKW": 50.0}, {"PowerKW": 150.0}],
            "OperatorInfo": {"Title": "Tesla Supercharger"},
            "UsageType": {"IsPayAtLocation": true},
            "StatusType": {"IsOperational": true},
            "NumberOfPoints": 4,
            "GeneralComments": "Free WiFi and coffee nearby",
            "DateLastVerified": "2026-10-01T00:00:00Z",
            "DateLastStatusUpdate": "2026-10-14T00:00:00Z"
        }));

        let charger = to_charger(&record, now()).unwrap();
        assert_eq!(charger.location.id, "ocm-1234");
        assert_eq!(charger.location.address, "Financial Centre Rd");
        assert_eq!(charger.location.district, "Downtown");
        assert_eq!(charger.charger_type, ChargerType::UltraFast);
        assert_eq!(charger.power_output, 150.0);
        assert_eq!(charger.total_sockets, 4);
        // ceil(4 * 0.7)
        assert_eq!(charger.available_sockets, 3);
        // 2.5 * 1.3
        assert_eq!(charger.price, 3.25);
        assert_eq!(charger.operator, "Tesla Supercharger");
        assert_eq!(
            charger.amenities,
            vec!["Pay at Location", "WiFi", "Coffee Shop"]
        );
        // 70 + 15 + 10 + 5, capped
        assert_eq!(charger.reliability, 95);
        assert!(charger.predicted_free_time.is_none());
    }

    #[test]
    fn test_sparse_record_uses_fallbacks() {
        let record = poi(serde_json::json!({
            "ID": 7,
            "AddressInfo": {"Title": "Some Station", "Latitude": 25.1, "Longitude": 55.2},
            "Connections": [{"PowerKW": null}, {"PowerKW": 22.0}]
        }));

        let charger = to_charger(&record, now()).unwrap();
        assert_eq!(charger.location.address, "Some Station");
        assert_eq!(charger.location.district, "Dubai");
        assert_eq!(charger.operator, "Unknown Operator");
        assert_eq!(charger.charger_type, ChargerType::Fast);
        assert_eq!(charger.power_output, 22.0);
        // No point count: fall back to connection count
        assert_eq!(charger.total_sockets, 2);
        assert_eq!(charger.available_sockets, 2);
        assert_eq!(charger.price, 1.2);
        assert_eq!(charger.reliability, 70);
    }

    #[test]
    fn test_non_operational_has_no_available_sockets() {
        let record = poi(serde_json::json!({
            "ID": 8,
            "AddressInfo": {"Latitude": 25.1, "Longitude": 55.2},
            "StatusType": {"IsOperational": false},
            "NumberOfPoints": 3
        }));

        let charger = to_charger(&record, now()).unwrap();
        assert_eq!(charger.available_sockets, 0);
        assert_eq!(charger.total_sockets, 3);
        assert_eq!(charger.charger_type, ChargerType::Slow);
        assert_eq!(charger.power_output, 7.0);
    }

    #[test]
    fn test_missing_coordinates_are_dropped() {
        let no_address = poi(serde_json::json!({"ID": 1}));
        assert!(to_charger(&no_address, now()).is_none());

        let no_longitude = poi(serde_json::json!({
            "ID": 2,
            "AddressInfo": {"Latitude": 25.1}
        }));
        assert!(to_charger(&no_longitude, now()).is_none());
    }

    #[test]
    fn test_price_estimate() {
        assert_eq!(estimated_price(ChargerType::Slow, None), 0.8);
        assert_eq!(estimated_price(ChargerType::Fast, Some("IONITY GmbH")), 1.56);
        assert_eq!(estimated_price(ChargerType::UltraFast, Some("DEWA")), 2.5);
    }
}

use serde::{Deserialize, Serialize};

/// A point supplied by the client (WGS84 degrees)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Common location envelope flattened into every place-like record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub district: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChargerType {
    Slow,
    Fast,
    UltraFast,
}

impl ChargerType {
    /// Classify by the highest connector power (kW).
    pub fn from_max_power(power_kw: f64) -> Self {
        if power_kw >= 100.0 {
            ChargerType::UltraFast
        } else if power_kw >= 22.0 {
            ChargerType::Fast
        } else {
            ChargerType::Slow
        }
    }

    /// Average AED per kWh for this class
    pub fn base_price(self) -> f64 {
        match self {
            ChargerType::Slow => 0.8,
            ChargerType::Fast => 1.2,
            ChargerType::UltraFast => 2.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvCharger {
    #[serde(flatten)]
    pub location: Location,
    #[serde(rename = "type")]
    pub charger_type: ChargerType,
    pub total_sockets: u32,
    pub available_sockets: u32,
    /// kW
    pub power_output: f64,
    /// AED per kWh
    pub price: f64,
    pub operator: String,
    pub amenities: Vec<String>,
    /// "HH:MM", only when no socket is free
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_free_time: Option<String>,
    /// 0-100
    pub reliability: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParkingType {
    Street,
    Garage,
    Lot,
}

impl ParkingType {
    /// AED per hour
    pub fn hourly_rate(self) -> f64 {
        match self {
            ParkingType::Garage => 5.0,
            ParkingType::Lot => 3.0,
            ParkingType::Street => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParkingType::Street => "street",
            ParkingType::Garage => "garage",
            ParkingType::Lot => "lot",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingZone {
    #[serde(flatten)]
    pub location: Location,
    pub capacity: u32,
    pub occupied: u32,
    pub hourly_rate: f64,
    #[serde(rename = "nearbyPOIs")]
    pub nearby_pois: Vec<String>,
    /// Metres to the district centre
    pub walking_distance: u32,
    #[serde(rename = "type")]
    pub parking_type: ParkingType,
}

impl ParkingZone {
    pub fn has_space(&self) -> bool {
        self.occupied < self.capacity
    }

    pub fn free_spaces(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitKind {
    Bus,
    Metro,
    Tram,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitSchedule {
    pub start_time: String,
    pub end_time: String,
    /// Minutes between departures
    pub frequency: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitRoute {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransitKind,
    pub stops: Vec<Location>,
    pub schedule: TransitSchedule,
    /// 0-100
    pub current_load: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrival {
    pub route_id: String,
    /// Minutes until arrival
    pub arrival_time: u32,
    pub load: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitStop {
    #[serde(flatten)]
    pub location: Location,
    pub routes: Vec<String>,
    pub next_arrivals: Vec<Arrival>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactZone {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobilityImpact {
    pub parking_closures: Vec<String>,
    /// Minutes
    pub transit_delays: u32,
    pub route_diversions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub location: Location,
    /// RFC 3339
    pub start_time: String,
    pub end_time: String,
    pub expected_crowd: u32,
    pub impact_zone: ImpactZone,
    pub affected_areas: Vec<String>,
    pub mobility_impact: MobilityImpact,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoolestWalkingTime {
    pub time_window: String,
    pub temperature: String,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatRisk {
    Low,
    Moderate,
    High,
    Extreme,
}

impl HeatRisk {
    /// Classify a feels-like temperature (°C).
    pub fn from_feels_like(feels_like: f64) -> Self {
        if feels_like > 50.0 {
            HeatRisk::Extreme
        } else if feels_like > 45.0 {
            HeatRisk::High
        } else if feels_like > 40.0 {
            HeatRisk::Moderate
        } else {
            HeatRisk::Low
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HydrationLevel {
    Low,
    Moderate,
    High,
    Critical,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationAdvice {
    pub level: HydrationLevel,
    /// Millilitres
    pub water_per_hour: u32,
    pub message: String,
}

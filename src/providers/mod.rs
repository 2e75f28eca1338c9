//! Read-only mobility data sources.
//!
//! Handlers only see the two traits below. The simulator implements both; the Open Charge
//! Map client implements [`ChargerDirectory`] for real charger locations.

use crate::model::{
    Coordinates, CoolestWalkingTime, EvCharger, Event, ParkingZone, TransitRoute, TransitStop,
};
use anyhow::Result;
use async_trait::async_trait;

pub mod open_charge_map;
pub mod simulator;
pub mod weather;

pub use open_charge_map::OpenChargeMapClient;
pub use simulator::SimulatedMobility;
pub use weather::{CurrentConditions, WeatherClient};

/// Search radius for charger queries (km)
pub const CHARGER_RADIUS_KM: f64 = 5.0;
/// Search radius for parking queries (km)
pub const PARKING_RADIUS_KM: f64 = 2.0;
/// Search radius for transit stop queries (km)
pub const TRANSIT_RADIUS_KM: f64 = 1.0;
/// Horizon for "this week" event questions (days)
pub const WEEK_DAYS: u32 = 7;
/// Horizon for the event catalog (days)
pub const CATALOG_EVENT_DAYS: u32 = 30;

/// Chargers near a point, nearest first.
#[async_trait]
pub trait ChargerDirectory: Send + Sync {
    async fn chargers_near(&self, at: Coordinates, radius_km: f64) -> Result<Vec<EvCharger>>;
}

/// Everything else the dashboard and assistant read.
#[async_trait]
pub trait MobilityData: Send + Sync {
    async fn all_chargers(&self) -> Result<Vec<EvCharger>>;

    async fn parking_zones(&self) -> Result<Vec<ParkingZone>>;

    /// Zones within `radius_km`, nearest first
    async fn parking_near(&self, at: Coordinates, radius_km: f64) -> Result<Vec<ParkingZone>>;

    async fn transit_routes(&self) -> Result<Vec<TransitRoute>>;

    /// Stops within `radius_km`, nearest first, with every route serving them merged in
    async fn transit_stops_near(&self, at: Coordinates, radius_km: f64)
        -> Result<Vec<TransitStop>>;

    /// Events starting between now and `days_ahead` days from now
    async fn upcoming_events(&self, days_ahead: u32) -> Result<Vec<Event>>;

    async fn coolest_walking_time(&self) -> Result<CoolestWalkingTime>;
}

//! Synthetic Dubai mobility data.
//!
//! Records are regenerated on every call and carry no identity across calls. With a seed,
//! every call starts from the same RNG state and therefore returns the same records.

use crate::config::SimulatorConfig;
use crate::geo;
use crate::model::{
    Coordinates, CoolestWalkingTime, EvCharger, Event, ParkingZone, TransitRoute, TransitStop,
};
use crate::providers::{ChargerDirectory, MobilityData};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod chargers;
mod events;
pub mod heat;
mod parking;
mod transit;


const DUBAI_UTC_OFFSET_SECS: i32 = 4 * 3600;

/// Current wall-clock time in Dubai (UTC+4, no DST)
pub fn dubai_now() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(DUBAI_UTC_OFFSET_SECS).expect("UTC+4 is a valid offset");
    Utc::now().with_timezone(&offset)
}

/// Simulated provider for every mobility domain
#[derive(Clone, Debug)]
pub struct SimulatedMobility {
    seed: Option<u64>,
    charger_count: usize,
    parking_count: usize,
    fixed_time: Option<DateTime<FixedOffset>>,
}

impl Default for SimulatedMobility {
    fn default() -> Self {
        Self::from_config(&SimulatorConfig::default())
    }
}

impl SimulatedMobility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self {
            seed: config.seed,
            charger_count: config.charger_count,
            parking_count: config.parking_count,
            fixed_time: None,
        }
    }

    /// Deterministic simulator: every call regenerates identical data.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Pin the clock used for event dates and time-of-day advice.
    pub fn at_time(mut self, time: DateTime<FixedOffset>) -> Self {
        self.fixed_time = Some(time);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time.unwrap_or_else(dubai_now)
    }

    pub fn generate_chargers(&self) -> Vec<EvCharger> {
        chargers::generate_chargers(&mut self.rng(), self.charger_count)
    }

    pub fn generate_parking(&self) -> Vec<ParkingZone> {
        parking::generate_parking_zones(&mut self.rng(), self.parking_count)
    }
}

#[async_trait]
impl ChargerDirectory for SimulatedMobility {
    async fn chargers_near(&self, at: Coordinates, radius_km: f64) -> Result<Vec<EvCharger>> {
        Ok(geo::nearest_within(
            self.generate_chargers(),
            at,
            radius_km,
            |charger| charger.location.coordinates(),
        ))
    }
}

#[async_trait]
impl MobilityData for SimulatedMobility {
    async fn all_chargers(&self) -> Result<Vec<EvCharger>> {
        Ok(self.generate_chargers())
    }

    async fn parking_zones(&self) -> Result<Vec<ParkingZone>> {
        Ok(self.generate_parking())
    }

    async fn parking_near(&self, at: Coordinates, radius_km: f64) -> Result<Vec<ParkingZone>> {
        Ok(geo::nearest_within(
            self.generate_parking(),
            at,
            radius_km,
            |zone| zone.location.coordinates(),
        ))
    }

    async fn transit_routes(&self) -> Result<Vec<TransitRoute>> {
        Ok(transit::routes())
    }

    async fn transit_stops_near(
        &self,
        at: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<TransitStop>> {
        Ok(transit::stops_near(&mut self.rng(), at, radius_km))
    }

    async fn upcoming_events(&self, days_ahead: u32) -> Result<Vec<Event>> {
        Ok(events::upcoming(&mut self.rng(), self.now(), days_ahead))
    }

    async fn coolest_walking_time(&self) -> Result<CoolestWalkingTime> {
        Ok(heat::coolest_walking_time(self.now().hour()))
    }
}

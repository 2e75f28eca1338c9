// Request-scoped wire types (nothing here is persisted)

mod chat;
mod mobility;

pub use chat::{
    ActionType, AssistantAction, AssistantRequest, AssistantResponse, ChatMessage, ChatRole,
    Enrichment, ResponseData,
};
pub use mobility::{
    Arrival, ChargerType, Coordinates, CoolestWalkingTime, EvCharger, Event, HeatRisk,
    HydrationAdvice, HydrationLevel, ImpactZone, Location, MobilityImpact, ParkingType,
    ParkingZone, TransitKind, TransitRoute, TransitSchedule, TransitStop,
};

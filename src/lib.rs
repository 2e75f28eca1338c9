// Configuration file and environment overrides
pub mod config;

// Wire types shared by providers, assistant and API
pub mod model;

// Great-circle distance
pub mod geo;

// Simulated and upstream mobility data sources
pub mod providers;

// Conversational assistant
pub mod assistant;

// HTTP API
pub mod api;

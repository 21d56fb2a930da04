pub mod api;        // REST surface over the store + quote source
pub mod client;     // polling data layer consumed by dashboard views
pub mod config;
pub mod display;    // presentation-only formatting and mock chart series
pub mod source;     // external quote provider adapters
pub mod store;      // market data storage capability + in-memory impl
pub mod telemetry;

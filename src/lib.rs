// Domain records
pub mod event;

// Template engines and property extraction
pub mod extractor;
pub mod template;

// Supporting modules
pub mod config;
pub mod error;
pub mod telemetry;

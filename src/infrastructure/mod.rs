pub mod messaging;
pub mod telemetry;

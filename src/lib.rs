pub mod errors;
pub mod execution;
pub mod fleet_file;
pub mod model;
pub mod ports;
pub mod schedule;
pub mod services;

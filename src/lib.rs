pub mod calibration;
pub mod config;
pub mod constants;
pub mod gnss;
pub mod gnut_errors;
pub mod logger;
pub mod objects;
pub mod ocean_loading;
pub mod registry;

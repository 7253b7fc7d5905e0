pub mod config;
pub mod gatherer;
pub mod logging;

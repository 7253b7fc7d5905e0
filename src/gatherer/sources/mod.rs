//! Release listing source implementations

pub mod http;

pub use http::HttpTagSource;

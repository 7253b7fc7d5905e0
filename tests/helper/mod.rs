#![allow(dead_code)]

mod gatherer;

pub use gatherer::*;

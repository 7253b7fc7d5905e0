//! Gatherer implementations

pub mod tags_feed;

pub use tags_feed::TagsFeedGatherer;

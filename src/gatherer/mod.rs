//! Version gatherer layer
//!
//! This module defines the contract pluggable gatherers implement to report
//! releases of external binaries, plus the pieces hosts use to drive them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  create   ┌──────────────────┐  fetch   ┌─────────────┐
//! │  Registry   │──────────▶│ VersionsGatherer │─────────▶│  TagSource  │
//! │ (by name)   │           │ (tags-feed, ...) │          │   (HTTP)    │
//! └─────────────┘           └────────┬─────────┘          └─────────────┘
//!                                    │ results
//!                                    ▼
//!                           ┌──────────────────┐
//!                           │    VersionSet    │
//!                           │ (unique, latest) │
//!                           └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`contract`]: `VersionsGatherer` trait hosts construct generically
//! - [`legacy`]: original `BinaryVersionGatherer` trait and an adapter to it
//! - [`record`]: `VersionRecord` and the EOL marker
//! - [`versions`]: result set with unique identifiers and latest selection
//! - [`meta`]: parsing of the user-supplied metadata text
//! - [`state`]: configuration and result bookkeeping shared by gatherers
//! - [`registry`]: construction of gatherers by name
//! - [`conformance`]: checks that results honor the contract
//! - [`source`] / [`sources`]: fetching raw release listings
//! - [`gatherers`]: concrete gatherers
//! - [`error`]: error types of both contract forms

pub mod binary;
pub mod conformance;
pub mod contract;
pub mod error;
pub mod gatherers;
pub mod legacy;
pub mod meta;
pub mod record;
pub mod registry;
pub mod semver;
pub mod source;
pub mod sources;
pub mod state;
pub mod versions;

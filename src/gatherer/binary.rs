use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Host-defined description of the binary whose releases are tracked.
///
/// Gatherers only rely on `name`; everything else the host stores is carried
/// along untouched in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Binary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Map::new(),
        }
    }
}

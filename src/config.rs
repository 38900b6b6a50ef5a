use {
    crate::ifs::wl_seat::{Capability, SEAT_VERSION, SeatCapabilities},
    serde::Deserialize,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not parse the seat configuration")]
    Parse(#[source] serde_json::Error),
}

/// Initial properties of a seat.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeatConfig {
    pub name: String,
    pub capabilities: Vec<Capability>,
    pub max_version: u32,
}

impl Default for SeatConfig {
    fn default() -> Self {
        Self {
            name: "seat0".to_string(),
            capabilities: vec![],
            max_version: SEAT_VERSION.0,
        }
    }
}

impl SeatConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn seat_capabilities(&self) -> SeatCapabilities {
        self.capabilities.iter().copied().collect()
    }
}

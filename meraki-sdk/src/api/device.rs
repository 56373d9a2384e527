use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use meraki_corelib::err::ErrResp;

use super::http::Client;

/// Model prefix of MS switches.
pub const SWITCH_MODEL_PREFIX: &'static str = "MS";

/// A device of a network. Only the lookup fields are typed, the others are kept as they are.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Device {
    pub serial: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub others: Map<String, Value>,
}

impl Device {
    /// The device name, or the serial number for unnamed devices.
    pub fn display_name(&self) -> &str {
        match self.name.as_ref() {
            Some(name) if name.len() > 0 => name.as_str(),
            _ => self.serial.as_str(),
        }
    }

    pub fn is_switch(&self) -> bool {
        self.model.starts_with(SWITCH_MODEL_PREFIX)
    }
}

/// `GET /networks/{networkId}/devices`
pub async fn list(client: &Client, network_id: &str) -> Result<Vec<Device>, ErrResp> {
    client.get_json(&["networks", network_id, "devices"]).await
}

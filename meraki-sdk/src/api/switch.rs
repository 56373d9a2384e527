use serde::Serialize;
use serde_json::Value;

use meraki_corelib::err::ErrResp;

use super::{device::Device, http::Client};

/// The collected configuration of one switch.
#[derive(Debug, Serialize)]
pub struct SwitchConfig {
    /// The device name, or the serial number for unnamed switches.
    pub name: String,
    #[serde(rename = "deviceInfo")]
    pub device_info: Device,
    #[serde(rename = "routingInterfaces")]
    pub routing_interfaces: Value,
    pub ports: Value,
    /// `None` if the static routes are not available.
    #[serde(rename = "staticRoutes", skip_serializing_if = "Option::is_none")]
    pub static_routes: Option<Value>,
    /// Access control lists of the network. `None` if not available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acls: Option<Value>,
}

/// `GET /networks/{networkId}/switch/settings`
///
/// The body is returned as it is.
pub async fn get_settings(client: &Client, network_id: &str) -> Result<Value, ErrResp> {
    client
        .get_json(&["networks", network_id, "switch", "settings"])
        .await
}

/// `GET /networks/{networkId}/switch/accessControlLists`
pub async fn get_acls(client: &Client, network_id: &str) -> Result<Value, ErrResp> {
    client
        .get_json(&["networks", network_id, "switch", "accessControlLists"])
        .await
}

/// `GET /devices/{serial}/switch/ports`
pub async fn get_ports(client: &Client, serial: &str) -> Result<Value, ErrResp> {
    client
        .get_json(&["devices", serial, "switch", "ports"])
        .await
}

/// `GET /devices/{serial}/switch/routing/interfaces`
pub async fn get_routing_interfaces(client: &Client, serial: &str) -> Result<Value, ErrResp> {
    client
        .get_json(&["devices", serial, "switch", "routing", "interfaces"])
        .await
}

/// `GET /devices/{serial}/switch/routing/staticRoutes`
pub async fn get_static_routes(client: &Client, serial: &str) -> Result<Value, ErrResp> {
    client
        .get_json(&["devices", serial, "switch", "routing", "staticRoutes"])
        .await
}

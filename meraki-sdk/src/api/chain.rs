//! The resolve-organization, resolve-network, fetch-resource sequences.
//!
//! The three calls of a chain are awaited strictly in order. The `try_` functions return the
//! first error. The others log it as a diagnostic and yield `None`.

use log::{error, info, warn};
use serde_json::Value;

use meraki_corelib::err::ErrResp;

use super::{
    device::{self, Device},
    http::Client,
    network, organization,
    switch::{self, SwitchConfig},
    traffic,
};

/// To get the ID of the network `network_name` inside the organization `org_name`.
pub async fn resolve_network_id(
    client: &Client,
    org_name: &str,
    network_name: &str,
) -> Result<String, ErrResp> {
    const FN_NAME: &'static str = "resolve_network_id";

    let org_id = organization::resolve(client, org_name).await?;
    info!("[{}] found organization ID: {}", FN_NAME, org_id);
    let network_id = network::resolve(client, org_id.as_str(), network_name).await?;
    info!("[{}] found network ID: {}", FN_NAME, network_id);
    Ok(network_id)
}

/// Traffic analysis of a named network.
pub async fn try_network_traffic(
    client: &Client,
    org_name: &str,
    network_name: &str,
    timespan: u64,
) -> Result<Value, ErrResp> {
    let network_id = resolve_network_id(client, org_name, network_name).await?;
    traffic::get(client, network_id.as_str(), timespan).await
}

/// Switch settings of a named network.
pub async fn try_switch_settings(
    client: &Client,
    org_name: &str,
    network_name: &str,
) -> Result<Value, ErrResp> {
    let network_id = resolve_network_id(client, org_name, network_name).await?;
    switch::get_settings(client, network_id.as_str()).await
}

/// Clients of a named network.
pub async fn try_network_clients(
    client: &Client,
    org_name: &str,
    network_name: &str,
    timespan: u64,
) -> Result<Value, ErrResp> {
    let network_id = resolve_network_id(client, org_name, network_name).await?;
    traffic::get_clients(client, network_id.as_str(), timespan).await
}

/// Devices of a named network.
pub async fn try_network_devices(
    client: &Client,
    org_name: &str,
    network_name: &str,
) -> Result<Vec<Device>, ErrResp> {
    let network_id = resolve_network_id(client, org_name, network_name).await?;
    device::list(client, network_id.as_str()).await
}

/// Configurations of the switches (MS models) of a named network.
///
/// A switch whose routing interfaces or ports cannot be fetched is logged and skipped. Static
/// routes and access control lists that are not available are left out of the configuration.
pub async fn try_switch_configs(
    client: &Client,
    org_name: &str,
    network_name: &str,
) -> Result<Vec<SwitchConfig>, ErrResp> {
    const FN_NAME: &'static str = "try_switch_configs";

    let network_id = resolve_network_id(client, org_name, network_name).await?;
    let switches: Vec<Device> = device::list(client, network_id.as_str())
        .await?
        .into_iter()
        .filter(|device| device.is_switch())
        .collect();
    info!("[{}] found {} switches", FN_NAME, switches.len());
    if switches.len() == 0 {
        return Ok(vec![]);
    }

    // One list for the whole network.
    let acls = match switch::get_acls(client, network_id.as_str()).await {
        Err(e) => {
            warn!("[{}] no ACLs for network {}: {}", FN_NAME, network_id, e);
            None
        }
        Ok(acls) => Some(acls),
    };

    let mut configs = vec![];
    for device in switches {
        let name = device.display_name().to_string();
        let serial = device.serial.as_str();
        let routing_interfaces = match switch::get_routing_interfaces(client, serial).await {
            Err(e) => {
                error!("[{}] skip switch {} ({}): {}", FN_NAME, name, serial, e);
                continue;
            }
            Ok(data) => data,
        };
        let ports = match switch::get_ports(client, serial).await {
            Err(e) => {
                error!("[{}] skip switch {} ({}): {}", FN_NAME, name, serial, e);
                continue;
            }
            Ok(data) => data,
        };
        let static_routes = match switch::get_static_routes(client, serial).await {
            Err(e) => {
                warn!("[{}] no static routes for {} ({}): {}", FN_NAME, name, serial, e);
                None
            }
            Ok(data) => Some(data),
        };
        configs.push(SwitchConfig {
            name,
            device_info: device,
            routing_interfaces,
            ports,
            static_routes,
            acls: acls.clone(),
        });
    }
    Ok(configs)
}

/// Same as [`try_network_traffic`] but the error is only logged.
pub async fn network_traffic(
    client: &Client,
    org_name: &str,
    network_name: &str,
    timespan: u64,
) -> Option<Value> {
    absent_on_err(
        "network_traffic",
        try_network_traffic(client, org_name, network_name, timespan).await,
    )
}

/// Same as [`try_switch_settings`] but the error is only logged.
pub async fn switch_settings(client: &Client, org_name: &str, network_name: &str) -> Option<Value> {
    absent_on_err(
        "switch_settings",
        try_switch_settings(client, org_name, network_name).await,
    )
}

/// Same as [`try_network_clients`] but the error is only logged.
pub async fn network_clients(
    client: &Client,
    org_name: &str,
    network_name: &str,
    timespan: u64,
) -> Option<Value> {
    absent_on_err(
        "network_clients",
        try_network_clients(client, org_name, network_name, timespan).await,
    )
}

/// Same as [`try_switch_configs`] but the error is only logged.
pub async fn switch_configs(
    client: &Client,
    org_name: &str,
    network_name: &str,
) -> Option<Vec<SwitchConfig>> {
    absent_on_err(
        "switch_configs",
        try_switch_configs(client, org_name, network_name).await,
    )
}

/// Same as [`try_network_devices`] but the error is only logged.
pub async fn network_devices(
    client: &Client,
    org_name: &str,
    network_name: &str,
) -> Option<Vec<Device>> {
    absent_on_err(
        "network_devices",
        try_network_devices(client, org_name, network_name).await,
    )
}

/// To log the error of `result` as a diagnostic of `fn_name` and yield `None`.
///
/// Non-2xx responses are logged with the status and the raw body.
pub fn absent_on_err<T>(fn_name: &str, result: Result<T, ErrResp>) -> Option<T> {
    match result {
        Err(e) => {
            match e.status() {
                None => error!("[{}] {}", fn_name, e),
                Some(status) => error!(
                    "[{}] unexpected status: {}, body: {}",
                    fn_name,
                    status,
                    e.message().unwrap_or("")
                ),
            }
            None
        }
        Ok(data) => Some(data),
    }
}

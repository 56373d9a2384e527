use serde::Serialize;
use serde_json::Value;

use meraki_corelib::err::ErrResp;

use super::http::Client;

/// Default traffic analysis window in seconds (one day).
pub const DEF_TIMESPAN: u64 = 86400;
/// Default client usage window in seconds (one hour).
pub const DEF_CLIENTS_TIMESPAN: u64 = 3600;

#[derive(Serialize)]
struct GetReq {
    timespan: u64,
}

/// `GET /networks/{networkId}/traffic?timespan={seconds}`
///
/// The body is returned as it is.
pub async fn get(client: &Client, network_id: &str, timespan: u64) -> Result<Value, ErrResp> {
    client
        .get_json_query(&["networks", network_id, "traffic"], &GetReq { timespan })
        .await
}

/// `GET /networks/{networkId}/clients?timespan={seconds}`
///
/// The body is returned as it is.
pub async fn get_clients(
    client: &Client,
    network_id: &str,
    timespan: u64,
) -> Result<Value, ErrResp> {
    client
        .get_json_query(&["networks", network_id, "clients"], &GetReq { timespan })
        .await
}

//! Common constants of the Meraki Dashboard API.

pub struct ContentType;
pub struct DashboardApi;

impl ContentType {
    pub const JSON: &'static str = "application/json";
}

impl DashboardApi {
    /// The API v1 base path with host.
    pub const BASE: &'static str = "https://api.meraki.com/api/v1";
    /// The header that carries the API key.
    pub const KEY_HEADER: &'static str = "X-Cisco-Meraki-API-Key";
    /// The environment variable that carries the API key.
    pub const KEY_ENV: &'static str = "MERAKI_API_KEY";
}

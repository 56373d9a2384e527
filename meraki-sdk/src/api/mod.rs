//! Meraki Dashboard API v1 operations.

pub mod chain;
pub mod device;
pub mod http;
pub mod network;
pub mod organization;
pub mod switch;
pub mod traffic;

//! Common libraries of the Meraki Dashboard lookup tools.

pub mod constants;
pub mod err;
pub mod logger;

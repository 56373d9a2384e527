//! Error definitions of Meraki Dashboard lookups.
//!
//! ```
//! use meraki_corelib::err::ErrResp;
//! // A non-2xx response from the Dashboard API.
//! let e = ErrResp::ErrTransport(Some(404), Some("{\"errors\":[\"Not found\"]}".to_string()));
//! ```

use std::{error::Error, fmt};

use serde::Serialize;
use serde_json;

/// The standard error definitions.
#[derive(Debug)]
pub enum ErrResp {
    /// The API key is missing.
    ErrCredential(Option<String>),
    /// Organization or network name has no match.
    ErrNotFound(Option<String>),
    /// Input argument or configuration error.
    ErrParam(Option<String>),
    /// HTTP request failed or returned a non-success status. The status code is `None` when the
    /// request did not complete. The message is the raw response body when there is a status.
    ErrTransport(Option<u16>, Option<String>),
    /// The response body cannot be decoded.
    ErrUnknown(Option<String>),
}

/// Used for generating diagnostic strings for errors.
#[derive(Serialize)]
struct RespJson<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

/// The API key is absent.
pub const E_CREDENTIAL: &'static str = "err_credential";
/// Name lookup found nothing.
pub const E_NOT_FOUND: &'static str = "err_not_found";
/// Argument or configuration format error.
pub const E_PARAM: &'static str = "err_param";
/// Network error or non-2xx status.
pub const E_TRANSPORT: &'static str = "err_transport";
/// Unknown error.
pub const E_UNKNOWN: &'static str = "err_unknown";

/// To generate error JSON string for diagnostics.
pub fn to_json(code: &str, status: Option<u16>, message: Option<&str>) -> String {
    match serde_json::to_string(&RespJson {
        code,
        status,
        message,
    }) {
        Err(_) => format!("{{\"code\":\"{}\"}}", code),
        Ok(str) => str,
    }
}

impl ErrResp {
    /// The error code string.
    pub fn code(&self) -> &'static str {
        match *self {
            ErrResp::ErrCredential(_) => E_CREDENTIAL,
            ErrResp::ErrNotFound(_) => E_NOT_FOUND,
            ErrResp::ErrParam(_) => E_PARAM,
            ErrResp::ErrTransport(_, _) => E_TRANSPORT,
            ErrResp::ErrUnknown(_) => E_UNKNOWN,
        }
    }

    /// The HTTP status code of [`ErrResp::ErrTransport`] if the server responded.
    pub fn status(&self) -> Option<u16> {
        match *self {
            ErrResp::ErrTransport(status, _) => status,
            _ => None,
        }
    }

    /// The detail message. This is the raw response body for non-2xx responses.
    pub fn message(&self) -> Option<&str> {
        match *self {
            ErrResp::ErrCredential(ref desc)
            | ErrResp::ErrNotFound(ref desc)
            | ErrResp::ErrParam(ref desc)
            | ErrResp::ErrTransport(_, ref desc)
            | ErrResp::ErrUnknown(ref desc) => desc.as_deref(),
        }
    }
}

impl fmt::Display for ErrResp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", to_json(self.code(), self.status(), self.message()))
    }
}

impl Error for ErrResp {}

//! A wrapped HTTP client that is used for the Meraki Dashboard API v1.
//!
//! Every request carries the static API key in the `X-Cisco-Meraki-API-Key` header and asks for
//! JSON. There is no retry and no pagination: the caller receives the first response as it is.
//!
//! Here is an example to list organizations:
//!
//! ```rust,no_run
//! use meraki_sdk::api::http::{Client, ClientOptions};
//!
//! async fn list_organizations() {
//!     let opts = ClientOptions {
//!         base: "https://api.meraki.com/api/v1".to_string(),
//!         api_key: "MERAKI_API_KEY".to_string(),
//!     };
//!     let client = Client::new(opts);
//!     match client.get_json::<serde_json::Value>(&["organizations"]).await {
//!         Err(_e) => {
//!             // Network errors and non-2xx responses are handled in this arm.
//!         }
//!         Ok(_body) => {
//!             // Handle response.
//!         }
//!     }
//! }
//! ```
use bytes::Bytes;
use log::debug;
use reqwest::{Client as ReqwestClient, Method, StatusCode, header};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use meraki_corelib::{
    constants::{ContentType, DashboardApi},
    err::ErrResp,
};

/// The HTTP client to request Meraki Dashboard APIs.
#[derive(Clone)]
pub struct Client {
    /// The underlying HTTP client instance.
    client: ReqwestClient,
    /// API base path with scheme and host.
    base: String,
    /// The API key.
    api_key: String,
}

/// Options of the HTTP client [`Client`].
pub struct ClientOptions {
    /// API base path with scheme. For example `https://api.meraki.com/api/v1`.
    pub base: String,
    /// Dashboard API key.
    pub api_key: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base: DashboardApi::BASE.to_string(),
            api_key: "".to_string(),
        }
    }
}

impl Client {
    /// Create an instance.
    pub fn new(opts: ClientOptions) -> Self {
        Client {
            client: ReqwestClient::new(),
            base: opts.base.trim().trim_end_matches('/').to_string(),
            api_key: opts.api_key,
        }
    }

    /// The API base path without the trailing slash.
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// To build the full URL of an API.
    /// - `segments` are path segments relative to the base. Each segment is percent-encoded so
    ///   identifiers can be passed as they are.
    /// - `query` is the encoded query string without `?`.
    pub fn url(&self, segments: &[&str], query: Option<&str>) -> Result<Url, ErrResp> {
        let mut url = match Url::parse(self.base.as_str()) {
            Err(e) => {
                let msg = format!("[url] invalid base {}: {}", self.base, e);
                return Err(ErrResp::ErrParam(Some(msg)));
            }
            Ok(url) => url,
        };
        match url.path_segments_mut() {
            Err(_) => {
                let msg = format!("[url] base {} cannot be a base", self.base);
                return Err(ErrResp::ErrParam(Some(msg)));
            }
            Ok(mut path) => {
                path.pop_if_empty().extend(segments);
            }
        }
        if let Some(query) = query {
            if query.len() > 0 {
                url.set_query(Some(query));
            }
        }
        Ok(url)
    }

    /// Execute a Dashboard API request.
    ///
    /// Any status is returned with the raw body. Only transport failures are errors.
    pub async fn request(&self, method: Method, url: Url) -> Result<(StatusCode, Bytes), ErrResp> {
        const FN_NAME: &'static str = "request";

        debug!("[{}] {} {}", FN_NAME, method, url);
        let req = match self
            .client
            .request(method, url)
            .header(DashboardApi::KEY_HEADER, self.api_key.as_str())
            .header(header::ACCEPT, ContentType::JSON)
            .build()
        {
            Err(e) => {
                let msg = format!("[API] create request error: {}", e);
                return Err(ErrResp::ErrTransport(None, Some(msg)));
            }
            Ok(req) => req,
        };
        let resp = match self.client.execute(req).await {
            Err(e) => {
                let msg = format!("[API] execute request error: {}", e);
                return Err(ErrResp::ErrTransport(None, Some(msg)));
            }
            Ok(resp) => resp,
        };
        let status = resp.status();
        match resp.bytes().await {
            Err(e) => {
                let msg = format!("[API] read body error: {}", e);
                Err(ErrResp::ErrTransport(Some(status.as_u16()), Some(msg)))
            }
            Ok(body) => Ok((status, body)),
        }
    }

    /// `GET` an API and decode the JSON body.
    pub async fn get_json<T>(&self, segments: &[&str]) -> Result<T, ErrResp>
    where
        T: DeserializeOwned,
    {
        let url = self.url(segments, None)?;
        self.get_url(url).await
    }

    /// `GET` an API with the query string encoded from `query` and decode the JSON body.
    pub async fn get_json_query<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T, ErrResp>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let query = match serde_urlencoded::to_string(query) {
            Err(e) => {
                let msg = format!("[query] cannot encode query string: {}", e);
                return Err(ErrResp::ErrParam(Some(msg)));
            }
            Ok(query) => query,
        };
        let url = self.url(segments, Some(query.as_str()))?;
        self.get_url(url).await
    }

    async fn get_url<T>(&self, url: Url) -> Result<T, ErrResp>
    where
        T: DeserializeOwned,
    {
        let (status, body) = self.request(Method::GET, url).await?;
        if !status.is_success() {
            return Err(ErrResp::ErrTransport(
                Some(status.as_u16()),
                Some(body_string(&body)),
            ));
        }
        match serde_json::from_slice::<T>(body.as_ref()) {
            Err(e) => {
                let msg = format!(
                    "[API] unexpected body error: {}, body: {}",
                    e,
                    body_string(&body)
                );
                Err(ErrResp::ErrUnknown(Some(msg)))
            }
            Ok(data) => Ok(data),
        }
    }
}

fn body_string(body: &Bytes) -> String {
    match String::from_utf8(body.to_vec()) {
        Err(e) => format!("(body not UTF-8: {})", e),
        Ok(body) => body,
    }
}

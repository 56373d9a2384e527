use serde::{Deserialize, Serialize};

use meraki_corelib::err::ErrResp;

use super::http::Client;

/// An organization. Other fields of the API response are dropped.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// `GET /organizations`
pub async fn list(client: &Client) -> Result<Vec<Organization>, ErrResp> {
    client.get_json(&["organizations"]).await
}

/// To get the ID of the first organization whose name is exactly `name` (case-sensitive).
pub async fn resolve(client: &Client, name: &str) -> Result<String, ErrResp> {
    let list = list(client).await?;
    match find(&list, name) {
        None => {
            let msg = format!("organization '{}' not found", name);
            Err(ErrResp::ErrNotFound(Some(msg)))
        }
        Some(org) => Ok(org.id.clone()),
    }
}

/// Linear scan for the first exact name match.
pub fn find<'a>(list: &'a [Organization], name: &str) -> Option<&'a Organization> {
    list.iter().find(|org| org.name == name)
}

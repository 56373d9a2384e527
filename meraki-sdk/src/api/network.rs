use serde::{Deserialize, Serialize};

use meraki_corelib::err::ErrResp;

use super::http::Client;

/// A network inside an organization. Other fields of the API response are dropped.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    #[serde(
        rename = "organizationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub organization_id: Option<String>,
}

/// `GET /organizations/{orgId}/networks`
pub async fn list(client: &Client, org_id: &str) -> Result<Vec<Network>, ErrResp> {
    client
        .get_json(&["organizations", org_id, "networks"])
        .await
}

/// To get the ID of the first network of the organization whose name is exactly `name`.
pub async fn resolve(client: &Client, org_id: &str, name: &str) -> Result<String, ErrResp> {
    let list = list(client, org_id).await?;
    match find(&list, name) {
        None => {
            let msg = format!("network '{}' not found in organization {}", name, org_id);
            Err(ErrResp::ErrNotFound(Some(msg)))
        }
        Some(network) => Ok(network.id.clone()),
    }
}

/// Linear scan for the first exact name match.
pub fn find<'a>(list: &'a [Network], name: &str) -> Option<&'a Network> {
    list.iter().find(|network| network.name == name)
}

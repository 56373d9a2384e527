use std::error::Error as StdError;

use clap::{ArgMatches, Command};
use log::info;

use meraki_corelib::err::ErrResp;
use meraki_sdk::api::{
    chain,
    http::Client,
    network::{self, Network},
    organization,
};

use super::{Config, arg_org, org_name, print_json};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Networks").subcommand(
        Command::new("list")
            .about("List networks of an organization")
            .arg(arg_org()),
    )
}

pub async fn run(
    conf: &Config,
    client: &Client,
    args: &ArgMatches,
) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("list", args)) => {
            let data =
                chain::absent_on_err("network_list", list(client, org_name(conf, args)).await);
            print_json(data)
        }
        _ => Ok(None),
    }
}

async fn list(client: &Client, org_name: &str) -> Result<Vec<Network>, ErrResp> {
    const FN_NAME: &'static str = "list";

    let org_id = organization::resolve(client, org_name).await?;
    info!("[{}] found organization ID: {}", FN_NAME, org_id);
    network::list(client, org_id.as_str()).await
}

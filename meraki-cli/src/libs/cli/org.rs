use std::error::Error as StdError;

use clap::{ArgMatches, Command};

use meraki_sdk::api::{chain, http::Client, organization};

use super::{Config, print_json};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Organizations")
        .subcommand(Command::new("list").about("List organizations of the API key"))
}

pub async fn run(
    _conf: &Config,
    client: &Client,
    args: &ArgMatches,
) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("list", _)) => {
            let data = chain::absent_on_err("org_list", organization::list(client).await);
            print_json(data)
        }
        _ => Ok(None),
    }
}

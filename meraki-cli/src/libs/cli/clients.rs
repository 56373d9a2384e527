use std::error::Error as StdError;

use clap::{ArgMatches, Command};

use meraki_sdk::api::{chain, http::Client, traffic};

use super::{Config, arg_network, arg_org, arg_timespan, network_name, org_name, print_json};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Clients of a network")
        .arg(arg_org())
        .arg(arg_network())
        .arg(arg_timespan("Timespan in seconds, default 3600"))
}

pub async fn run(
    conf: &Config,
    client: &Client,
    args: &ArgMatches,
) -> Result<Option<()>, Box<dyn StdError>> {
    let timespan = match args.get_one::<u64>("timespan") {
        Some(v) => *v,
        None => traffic::DEF_CLIENTS_TIMESPAN,
    };
    let data = chain::network_clients(
        client,
        org_name(conf, args),
        network_name(conf, args),
        timespan,
    )
    .await;
    print_json(data)
}

use std::error::Error as StdError;

use clap::{ArgMatches, Command};

use meraki_sdk::api::{chain, http::Client};

use super::{
    Config, arg_network, arg_org, arg_timespan, config, network_name, org_name, print_json,
};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Traffic analysis of a network")
        .arg(arg_org())
        .arg(arg_network())
        .arg(arg_timespan("Timespan in seconds"))
}

pub async fn run(
    conf: &Config,
    client: &Client,
    args: &ArgMatches,
) -> Result<Option<()>, Box<dyn StdError>> {
    let timespan = match args.get_one::<u64>("timespan") {
        Some(v) => *v,
        None => conf.timespan.unwrap_or(config::DEF_TIMESPAN),
    };
    let data = chain::network_traffic(
        client,
        org_name(conf, args),
        network_name(conf, args),
        timespan,
    )
    .await;
    print_json(data)
}

use std::error::Error as StdError;

use clap::{Arg, ArgMatches, Command};

use meraki_sdk::api::{chain, http::Client, switch};

use super::{Config, arg_network, arg_org, network_name, org_name, print_json};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Switch configurations")
        .subcommand(
            Command::new("settings")
                .about("Switch settings of a network")
                .arg(arg_org())
                .arg(arg_network()),
        )
        .subcommand(
            Command::new("config")
                .about("Configurations of the switches of a network")
                .arg(arg_org())
                .arg(arg_network()),
        )
        .subcommand(
            Command::new("ports")
                .about("Ports of a switch")
                .arg(
                    Arg::new("serial")
                        .short('s')
                        .long("serial")
                        .help("Device serial number")
                        .num_args(1)
                        .required(true),
                ),
        )
}

pub async fn run(
    conf: &Config,
    client: &Client,
    args: &ArgMatches,
) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("settings", args)) => {
            let data =
                chain::switch_settings(client, org_name(conf, args), network_name(conf, args))
                    .await;
            print_json(data)
        }
        Some(("config", args)) => {
            let data =
                chain::switch_configs(client, org_name(conf, args), network_name(conf, args))
                    .await;
            print_json(data)
        }
        Some(("ports", args)) => {
            let serial = match args.get_one::<String>("serial") {
                None => return Ok(None),
                Some(v) => v.as_str(),
            };
            let data =
                chain::absent_on_err("switch_ports", switch::get_ports(client, serial).await);
            print_json(data)
        }
        _ => Ok(None),
    }
}

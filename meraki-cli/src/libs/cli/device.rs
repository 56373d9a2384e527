use std::error::Error as StdError;

use clap::{Arg, ArgAction, ArgMatches, Command};

use meraki_sdk::api::{chain, http::Client};

use super::{Config, arg_network, arg_org, network_name, org_name, print_json};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Devices").subcommand(
        Command::new("list")
            .about("List devices of a network")
            .arg(arg_org())
            .arg(arg_network())
            .arg(
                Arg::new("switches")
                    .long("switches")
                    .help("Switches (MS models) only")
                    .num_args(0)
                    .action(ArgAction::SetTrue),
            ),
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
                chain::network_devices(client, org_name(conf, args), network_name(conf, args))
                    .await;
            let data = match args.get_flag("switches") {
                false => data,
                true => data.map(|list| {
                    list.into_iter()
                        .filter(|device| device.is_switch())
                        .collect::<Vec<_>>()
                }),
            };
            print_json(data)
        }
        _ => Ok(None),
    }
}

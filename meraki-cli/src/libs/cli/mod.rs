use std::error::Error as StdError;

use clap::{Arg, ArgMatches, Command, builder::RangedU64ValueParser};
use serde::{Deserialize, Serialize};

use meraki_sdk::api::http::{Client, ClientOptions};

mod clients;
pub mod config;
mod device;
mod network;
mod org;
mod switch;
mod traffic;

/// Application configurations.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Dashboard API base path. For example: `https://api.meraki.com/api/v1`.
    pub base: Option<String>,
    /// Default organization name.
    pub organization: Option<String>,
    /// Default network name.
    pub network: Option<String>,
    /// Default traffic analysis window in seconds.
    pub timespan: Option<u64>,
}

/// To register Clap arguments.
pub fn reg_args(cmd: Command) -> Command {
    config::reg_args(cmd)
        .subcommand(traffic::reg_args(Command::new("traffic")))
        .subcommand(switch::reg_args(Command::new("switch")))
        .subcommand(org::reg_args(Command::new("org")))
        .subcommand(network::reg_args(Command::new("network")))
        .subcommand(device::reg_args(Command::new("device")))
        .subcommand(clients::reg_args(Command::new("clients")))
}

/// To run the sub-command.
///
/// Returns `None` if the sub-command is not supported. Lookup failures are logged and the
/// command prints nothing.
pub async fn run(
    conf: &Config,
    api_key: &str,
    args: &ArgMatches,
) -> Result<Option<()>, Box<dyn StdError>> {
    let mut opts = ClientOptions {
        api_key: api_key.to_string(),
        ..Default::default()
    };
    if let Some(base) = conf.base.as_ref() {
        opts.base = base.clone();
    }
    let client = Client::new(opts);

    match args.subcommand() {
        Some(("traffic", args)) => traffic::run(conf, &client, args).await,
        Some(("switch", args)) => switch::run(conf, &client, args).await,
        Some(("org", args)) => org::run(conf, &client, args).await,
        Some(("network", args)) => network::run(conf, &client, args).await,
        Some(("device", args)) => device::run(conf, &client, args).await,
        Some(("clients", args)) => clients::run(conf, &client, args).await,
        _ => Ok(None),
    }
}

fn arg_org() -> Arg {
    Arg::new("org")
        .short('o')
        .long("org")
        .help("Organization name")
        .num_args(1)
}

fn arg_network() -> Arg {
    Arg::new("network")
        .short('n')
        .long("network")
        .help("Network name")
        .num_args(1)
}

fn arg_timespan(help: &'static str) -> Arg {
    Arg::new("timespan")
        .short('t')
        .long("timespan")
        .help(help)
        .num_args(1)
        .value_parser(RangedU64ValueParser::<u64>::new().range(1..))
}

/// The organization name from `-o` or the configuration.
fn org_name<'a>(conf: &'a Config, args: &'a ArgMatches) -> &'a str {
    match args.get_one::<String>("org") {
        Some(v) => v.as_str(),
        None => match conf.organization.as_ref() {
            None => config::DEF_ORG,
            Some(v) => v.as_str(),
        },
    }
}

/// The network name from `-n` or the configuration.
fn network_name<'a>(conf: &'a Config, args: &'a ArgMatches) -> &'a str {
    match args.get_one::<String>("network") {
        Some(v) => v.as_str(),
        None => match conf.network.as_ref() {
            None => config::DEF_NETWORK,
            Some(v) => v.as_str(),
        },
    }
}

/// Prints the pretty JSON to the standard output. Nothing is printed for `None`.
fn print_json<T: Serialize>(data: Option<T>) -> Result<Option<()>, Box<dyn StdError>> {
    if let Some(data) = data {
        println!("{}", serde_json::to_string_pretty(&data)?);
    }
    Ok(Some(()))
}

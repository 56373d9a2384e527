//! Program configurations.

use std::env;

use clap::{Arg, ArgMatches, Command, builder::RangedU64ValueParser};
use validators::prelude::*;

use meraki_corelib::{constants::DashboardApi, err::ErrResp};
use meraki_sdk::api::traffic;

use super::Config;

#[derive(Validator)]
#[validator(http_ftp_url(local(Allow)))]
struct HttpFtpURL {
    url: url::Url,
    protocol: validators::models::Protocol,
}

pub const DEF_BASE: &'static str = DashboardApi::BASE;
pub const DEF_ORG: &'static str = "DevNet Sandbox";
pub const DEF_NETWORK: &'static str = "DNSMB5";
pub const DEF_TIMESPAN: u64 = traffic::DEF_TIMESPAN;

/// To register Clap arguments.
pub fn reg_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("meraki-cli.base")
            .long("meraki-cli.base")
            .help("Dashboard API base path")
            .num_args(1)
            .global(true),
    )
    .arg(
        Arg::new("meraki-cli.organization")
            .long("meraki-cli.organization")
            .help("default organization name")
            .num_args(1)
            .global(true),
    )
    .arg(
        Arg::new("meraki-cli.network")
            .long("meraki-cli.network")
            .help("default network name")
            .num_args(1)
            .global(true),
    )
    .arg(
        Arg::new("meraki-cli.timespan")
            .long("meraki-cli.timespan")
            .help("default traffic timespan in seconds")
            .num_args(1)
            .global(true)
            .value_parser(RangedU64ValueParser::<u64>::new().range(1..)),
    )
}

/// To read input arguments from command-line arguments and environment variables.
///
/// This function will call [`apply_default()`] to fill missing values so you do not need call it
/// again.
pub fn read_args(args: &ArgMatches) -> Result<Config, ErrResp> {
    apply_default(&Config {
        base: match args.try_get_one::<String>("meraki-cli.base") {
            Ok(Some(v)) => Some(v.clone()),
            _ => match env::var("MERAKI_BASE") {
                Err(_) => None,
                Ok(v) => Some(v),
            },
        },
        organization: match args.try_get_one::<String>("meraki-cli.organization") {
            Ok(Some(v)) => Some(v.clone()),
            _ => match env::var("MERAKI_ORG") {
                Err(_) => None,
                Ok(v) => Some(v),
            },
        },
        network: match args.try_get_one::<String>("meraki-cli.network") {
            Ok(Some(v)) => Some(v.clone()),
            _ => match env::var("MERAKI_NETWORK") {
                Err(_) => None,
                Ok(v) => Some(v),
            },
        },
        timespan: match args.try_get_one::<u64>("meraki-cli.timespan") {
            Ok(Some(v)) => Some(*v),
            _ => match env::var("MERAKI_TIMESPAN") {
                Err(_) => None,
                Ok(v) => match v.parse::<u64>() {
                    Ok(v) if v > 0 => Some(v),
                    _ => {
                        let msg = format!("invalid `MERAKI_TIMESPAN`: {}", v);
                        return Err(ErrResp::ErrParam(Some(msg)));
                    }
                },
            },
        },
    })
}

/// Fill missing configuration with default values.
///
/// The base path must be an HTTP(S) URL.
pub fn apply_default(config: &Config) -> Result<Config, ErrResp> {
    Ok(Config {
        base: match config.base.as_ref() {
            None => Some(DEF_BASE.to_string()),
            Some(v) => match v.len() {
                0 => Some(DEF_BASE.to_string()),
                _ => Some(validate_base(v.as_str())?),
            },
        },
        organization: match config.organization.as_ref() {
            None => Some(DEF_ORG.to_string()),
            Some(v) => Some(v.clone()),
        },
        network: match config.network.as_ref() {
            None => Some(DEF_NETWORK.to_string()),
            Some(v) => Some(v.clone()),
        },
        timespan: match config.timespan {
            None | Some(0) => Some(DEF_TIMESPAN),
            Some(v) => Some(v),
        },
    })
}

/// To read the Dashboard API key from `MERAKI_API_KEY`.
///
/// The key is only accepted from the environment.
pub fn read_api_key() -> Result<String, ErrResp> {
    match env::var(DashboardApi::KEY_ENV) {
        Ok(v) if v.len() > 0 => Ok(v),
        _ => {
            let msg = format!("`{}` is not set", DashboardApi::KEY_ENV);
            Err(ErrResp::ErrCredential(Some(msg)))
        }
    }
}

fn validate_base(base: &str) -> Result<String, ErrResp> {
    match HttpFtpURL::parse_string(base) {
        Ok(v) if v.url.scheme() == "http" || v.url.scheme() == "https" => Ok(base.to_string()),
        _ => {
            let msg = format!("invalid `meraki-cli.base`: {}", base);
            Err(ErrResp::ErrParam(Some(msg)))
        }
    }
}

use std::{
    error::Error as StdError,
    fs,
    io::{Error as IoError, ErrorKind},
};

use chrono::Utc;
use clap::{Arg, ArgMatches, Command};
use log::{error, info};
use serde::Deserialize;
use tokio;

use meraki_cli::libs::cli::{self as libs, Config, config};
use meraki_corelib::logger::{self, Config as LogConfig};

#[derive(Deserialize)]
struct AppConfig {
    #[serde(default)]
    log: LogConfig,
    #[serde(default, rename = "merakiCli")]
    meraki_cli: Config,
}

const PROJ_NAME: &'static str = env!("CARGO_BIN_NAME");
const PROJ_VER: &'static str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "main";

    let (conf, args) = match init_config() {
        Err(e) => return Err(e),
        Ok((conf, args)) => (conf, args),
    };
    logger::init(PROJ_NAME, &conf.log);

    let api_key = match config::read_api_key() {
        Err(e) => {
            error!("[{}] {}", FN_NAME, e);
            return Err(Box::new(e));
        }
        Ok(key) => key,
    };

    let start = Utc::now().timestamp_millis();
    match libs::run(&conf.meraki_cli, api_key.as_str(), &args).await {
        Err(e) => {
            let diff = Utc::now().timestamp_millis() - start;
            error!("[{}] error ({} ms): {}", FN_NAME, diff, e);
            Err(e)
        }
        Ok(None) => {
            error!("[{}] sub-command not support", FN_NAME);
            Err(Box::new(IoError::new(
                ErrorKind::InvalidInput,
                "sub-command not support",
            )))
        }
        Ok(Some(_)) => {
            let diff = Utc::now().timestamp_millis() - start;
            info!("[{}] OK ({} ms)", FN_NAME, diff);
            Ok(())
        }
    }
}

fn init_config() -> Result<(AppConfig, ArgMatches), Box<dyn StdError>> {
    let mut args = Command::new(PROJ_NAME).version(PROJ_VER).arg(
        Arg::new("file")
            .short('f')
            .long("file")
            .help("config file")
            .num_args(1)
            .global(true),
    );
    args = logger::reg_args(args);
    args = libs::reg_args(args);
    let args = args.get_matches();

    if let Some(value) = args.get_one::<String>("file") {
        let conf_str = fs::read_to_string(value)?;
        let conf: AppConfig = json5::from_str(conf_str.as_str())?;
        return Ok((
            AppConfig {
                log: logger::apply_default(&conf.log),
                meraki_cli: config::apply_default(&conf.meraki_cli)?,
            },
            args,
        ));
    }

    Ok((
        AppConfig {
            log: logger::read_args(&args),
            meraki_cli: config::read_args(&args)?,
        },
        args,
    ))
}

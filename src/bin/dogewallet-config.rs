use std::path::PathBuf;
use structopt::StructOpt;
use dogewallet::config::Config;
use dogewallet::{init_logger, KeyEncoding, Network};
use log::{info, error};

#[derive(Debug, StructOpt)]
#[structopt(name = "dogewallet-config", about = "Dogewallet configuration tool")]
struct Opt {
    /// Generate a configuration
    #[structopt(long)]
    generate: bool,

    /// Output file
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Input file
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Default network (mainnet, testnet)
    #[structopt(long)]
    network: Option<Network>,

    /// Use uncompressed public keys by default
    #[structopt(long)]
    uncompressed: bool,

    /// Network used when deriving addresses during verification
    #[structopt(long)]
    verify_network: Option<Network>,

    /// Log level
    #[structopt(long)]
    log_level: Option<String>,
}

fn print_config(config: &Config) {
    match toml::to_string_pretty(config) {
        Ok(config_str) => {
            println!("{}", config_str);
        },
        Err(e) => {
            error!("Failed to serialize configuration: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    init_logger();

    let opt = Opt::from_args();

    if opt.generate {
        let mut config = Config::default();

        if let Some(network) = opt.network {
            config.wallet.network = network;
        }

        if opt.uncompressed {
            config.wallet.key_encoding = KeyEncoding::Uncompressed;
        }

        if let Some(verify_network) = opt.verify_network {
            config.signing.verify_network = verify_network;
        }

        if let Some(log_level) = opt.log_level {
            config.logging.log_level = log_level;
        }

        if let Some(output) = opt.output {
            match config.save(&output) {
                Ok(_) => {
                    info!("Configuration saved to {:?}", output);
                },
                Err(e) => {
                    error!("Failed to save configuration: {}", e);
                    std::process::exit(1);
                }
            }
        } else {
            print_config(&config);
        }
    } else if let Some(input) = opt.input {
        match Config::load(&input) {
            Ok(config) => print_config(&config),
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        let _ = Opt::clap().print_help();
        println!();
    }
}

use std::path::PathBuf;
use std::process;
use structopt::StructOpt;
use log::info;

use dogewallet::config::Config;
use dogewallet::init_logger_with_level;
use dogewallet::{KeyEncoding, KeyPairInfo, Network, Wallet, WalletError};

#[derive(Debug, StructOpt)]
#[structopt(name = "dogewallet", about = "Dogecoin key, address and message-signing tool")]
struct Opt {
    /// Config file
    #[structopt(long, parse(from_os_str), default_value = "dogewallet.toml")]
    config: PathBuf,

    /// Use testnet instead of the configured network
    #[structopt(long)]
    testnet: bool,

    /// Use uncompressed public keys instead of the configured encoding
    #[structopt(long)]
    uncompressed: bool,

    /// Print results as JSON
    #[structopt(long)]
    json: bool,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Generate a new key pair
    Generate,

    /// Show the public key and address of a WIF private key
    Import {
        wif: String,
    },

    /// Convert a hex private key to WIF
    ExportWif {
        private_key_hex: String,
    },

    /// Address of a hex public key
    Address {
        public_key_hex: String,
    },

    /// Address of a WIF private key
    AddressFromWif {
        wif: String,
    },

    /// Sign a message with a hex private key
    Sign {
        message: String,
        private_key_hex: String,
    },

    /// Sign a message with a WIF private key
    SignWif {
        message: String,
        wif: String,
    },

    /// Verify a Base64 message signature against an address
    Verify {
        message: String,
        signature: String,
        address: String,
    },

    /// Check that an address belongs to the selected network
    Validate {
        address: String,
    },
}

fn print_key_pair(info: &KeyPairInfo, json: bool) -> Result<(), WalletError> {
    if json {
        let out = serde_json::to_string_pretty(info)
            .map_err(|e| WalletError::InputFormat(format!("failed to serialize output: {}", e)))?;
        println!("{}", out);
    } else {
        println!("private_key: {}", info.private_key);
        println!("public_key:  {}", info.public_key);
        println!("address:     {}", info.address);
    }
    Ok(())
}

fn print_field<V: Into<serde_json::Value> + std::fmt::Display>(name: &str, value: V, json: bool) {
    if json {
        let mut object = serde_json::Map::new();
        object.insert(name.to_string(), value.into());
        println!("{}", serde_json::Value::Object(object));
    } else {
        println!("{}", value);
    }
}

fn run(opt: Opt, config: Config) -> Result<bool, WalletError> {
    let network = if opt.testnet { Network::Test } else { config.wallet.network };
    let encoding = if opt.uncompressed { KeyEncoding::Uncompressed } else { config.wallet.key_encoding };
    let wallet = Wallet::new(config);

    match opt.cmd {
        Command::Generate => {
            let info = wallet.generate_keypair(encoding, network)?;
            info!("Generated key pair for {}", info.address);
            print_key_pair(&info, opt.json)?;
        }
        Command::Import { wif } => {
            let info = wallet.import_from_wif(&wif)?;
            print_key_pair(&info, opt.json)?;
        }
        Command::ExportWif { private_key_hex } => {
            let wif = wallet.export_to_wif(&private_key_hex, encoding, network)?;
            print_field("wif", wif.as_str(), opt.json);
        }
        Command::Address { public_key_hex } => {
            let address = wallet.address_from_public_key(&public_key_hex, network)?;
            print_field("address", address.as_str(), opt.json);
        }
        Command::AddressFromWif { wif } => {
            let address = wallet.address_from_wif(&wif)?;
            print_field("address", address.as_str(), opt.json);
        }
        Command::Sign { message, private_key_hex } => {
            let signature = wallet.sign_message(&message, &private_key_hex, encoding)?;
            print_field("signature", signature.as_str(), opt.json);
        }
        Command::SignWif { message, wif } => {
            let signature = wallet.sign_message_wif(&message, &wif)?;
            print_field("signature", signature.as_str(), opt.json);
        }
        Command::Verify { message, signature, address } => {
            let valid = wallet.verify_message(&message, &signature, &address);
            print_field("valid", valid, opt.json);
            return Ok(valid);
        }
        Command::Validate { address } => {
            let valid = wallet.validate_address(&address, network);
            print_field("valid", valid, opt.json);
            return Ok(valid);
        }
    }

    Ok(true)
}

fn main() {
    let opt = Opt::from_args();

    let config = match Config::load_or_default(&opt.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    init_logger_with_level(&config.logging.log_level);

    match run(opt, config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mot_core::FrameBuilder;
use mot_core::protocol::{DEFAULT_END_DEST, DEFAULT_END_ORIG};
use mot_decode::{Config, Envelope, PayloadFormat, UplinkProcessor, encode};
use tracing::info;

#[derive(Parser)]
#[command(name = "mot-decode")]
#[command(about = "MoT LoRaWAN uplink decoder")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "mot-decode.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode uplink payloads given as arguments, or one per line on stdin
    Decode {
        /// Payload text encoding (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<PayloadFormat>,
        /// Humidity correction factor (overrides the config file)
        #[arg(long)]
        humidity_correction: Option<f64>,
        /// Wrap each outcome with an id and receive timestamp
        #[arg(long)]
        record: bool,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
        payloads: Vec<String>,
    },
    /// Build a frame the way the DHT22 end device does
    Encode {
        /// Temperature in degrees Celsius
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        /// Relative humidity in percent, before correction
        #[arg(long)]
        humidity: f64,
        /// Uplink packet counter
        #[arg(long, default_value_t = 0)]
        counter: u8,
        #[arg(long, default_value_t = DEFAULT_END_DEST)]
        end_dest: u8,
        #[arg(long, default_value_t = DEFAULT_END_ORIG)]
        end_orig: u8,
        /// Output encoding (`bytes` prints a decimal list)
        #[arg(short, long, value_enum, default_value = "hex")]
        format: PayloadFormat,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "mot_decode=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        info!(path = ?cli.config, "Loading configuration");
        Config::load(&cli.config)?
    } else {
        tracing::debug!("No configuration file found, using defaults");
        Config::default()
    };

    match cli.command {
        Command::Decode {
            format,
            humidity_correction,
            record,
            pretty,
            payloads,
        } => {
            if let Some(format) = format {
                config.input.format = format;
            }
            if let Some(factor) = humidity_correction {
                config.decoder.humidity_correction = factor;
            }
            if record {
                config.output.envelope = Envelope::Record;
            }
            config.output.pretty |= pretty;

            run_decode(&config, payloads)
        }
        Command::Encode {
            temperature,
            humidity,
            counter,
            end_dest,
            end_orig,
            format,
        } => {
            let builder = FrameBuilder::new(temperature, humidity, counter)
                .end_dest(end_dest)
                .end_orig(end_orig);
            println!("{}", encode(&builder, format));
            Ok(())
        }
    }
}

fn run_decode(config: &Config, payloads: Vec<String>) -> color_eyre::Result<()> {
    let processor = UplinkProcessor::from_config(config)?;

    info!(
        format = ?config.input.format,
        humidity_correction = config.decoder.humidity_correction,
        envelope = ?config.output.envelope,
        "Starting mot-decode"
    );

    let out = io::stdout().lock();
    if payloads.is_empty() {
        processor.decode_lines(io::stdin().lock(), out)?;
    } else {
        processor.decode_payloads(payloads.iter().map(String::as_str), out)?;
    }
    Ok(())
}

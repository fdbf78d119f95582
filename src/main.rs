use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::env;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, LevelFilter};
use usbclassify::{class_table, Catalog, ClassTable, LabelStyle, PropertyMap, UsbDevice};

#[derive(Debug, Parser)]
#[command(name = "usbclassify", version, about = "Classify USB devices by class code")]
struct Cli {
    /// JSON object mapping label msgids to translations
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a class/subclass/protocol triple
    Classify {
        #[arg(value_parser = parse_code)]
        class: u8,
        #[arg(value_parser = parse_code)]
        subclass: u8,
        #[arg(value_parser = parse_code)]
        protocol: u8,
    },
    /// Label a device from a udev property dump
    Label {
        /// Property dump to read, stdin when omitted
        #[arg(long)]
        properties: Option<PathBuf>,
        #[arg(long, default_value_t = LabelStyle::Short)]
        style: LabelStyle,
    },
    /// List the classification table
    Table,
}

// Accepts decimal or 0x-prefixed hex
fn parse_code(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("{:?} is not a code in 0..=255 ({})", s, e))
}

fn main() -> Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn,usbclassify=info");
    }

    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Warn)
        .filter_module("usbclassify", LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    let translated;
    let table: &ClassTable = match &cli.catalog {
        Some(path) => {
            let catalog = Catalog::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            info!("Using {} translations from {}", catalog.len(), path.display());
            translated = ClassTable::new(&catalog);
            &translated
        }
        None => class_table(),
    };

    match cli.command {
        Command::Classify { class, subclass, protocol } => {
            let labels = table.classify(class, subclass, protocol);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(labels)?);
            } else {
                println!("{}", labels.short);
                println!("{}", labels.long);
            }
        }
        Command::Label { properties, style } => {
            let device = match &properties {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    PropertyMap::parse(BufReader::new(file))
                }
                None => PropertyMap::parse(io::stdin().lock()),
            }
            .context("Failed to read device properties")?;

            let usb = UsbDevice::new(&device, table);
            let label = usb.label(style)?;
            if cli.json {
                let value = serde_json::json!({
                    "label": label,
                    "type": usb.usb_type()?,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", label);
            }
        }
        Command::Table => {
            let entries = table.entries();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    println!("{}  {:<30} {}", entry.key, entry.labels.short, entry.labels.long);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code("3"), Ok(3));
        assert_eq!(parse_code("0xe0"), Ok(0xe0));
        assert_eq!(parse_code("0XEF"), Ok(0xef));
        assert!(parse_code("256").is_err());
        assert!(parse_code("-1").is_err());
        assert!(parse_code("0xzz").is_err());
    }

    #[test]
    fn test_cli_parses_classify() {
        let cli = Cli::try_parse_from(["usbclassify", "--json", "classify", "0x03", "1", "2"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Classify { class, subclass, protocol } => {
                assert_eq!((class, subclass, protocol), (3, 1, 2))
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_label_style() {
        let cli = Cli::try_parse_from(["usbclassify", "label", "--style", "long"]).unwrap();
        match cli.command {
            Command::Label { properties, style } => {
                assert_eq!(properties, None);
                assert_eq!(style, LabelStyle::Long);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

//! Decode command implementation.

use super::Cli;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use pearl_serialized::{Decoder, SerializedValue};
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for the decode command.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// File holding the serialized value (a pear.conf works too)
    pub file: PathBuf,

    /// Only keep object attributes and array keys fully matching this regex
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the decode command.
pub fn run(cli: &Cli, args: &DecodeArgs) -> Result<()> {
    info!(file = %args.file.display(), "running decode command");

    let text = cli.read(&args.file)?;
    let input = pearl_config::strip_comments(&text);

    let decoder = match &args.filter {
        Some(pattern) => Decoder::with_attribute_filter(pattern)
            .with_context(|| format!("invalid filter '{pattern}'"))?,
        None => Decoder::new(),
    };
    let (value, consumed) = decoder
        .parse_prefix(input)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let trailing = input[consumed..].trim();
    if !trailing.is_empty() {
        warn!(bytes = trailing.len(), "ignoring trailing input");
    }

    if args.json {
        return output::json(&value);
    }
    print_tree(&value, 0);
    Ok(())
}

fn print_tree(value: &SerializedValue, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        SerializedValue::Array(pairs) => {
            println!("{}", style(format!("array({})", pairs.len())).dim());
            for (key, item) in pairs {
                print!("{indent}  {} => ", style(key_label(key)).yellow());
                print_tree(item, depth + 1);
            }
        }
        SerializedValue::Object {
            type_name,
            attributes,
        } => {
            println!(
                "{}",
                style(format!("{type_name}({})", attributes.len())).green()
            );
            for (name, item) in attributes {
                print!("{indent}  {} => ", style(name).yellow());
                print_tree(item, depth + 1);
            }
        }
        scalar => println!("{}", scalar_label(scalar)),
    }
}

fn key_label(key: &SerializedValue) -> String {
    match key {
        SerializedValue::Str(s) => format!("\"{s}\""),
        other => scalar_label(other),
    }
}

fn scalar_label(value: &SerializedValue) -> String {
    match value {
        SerializedValue::Null => "null".to_string(),
        SerializedValue::Bool(b) => b.to_string(),
        SerializedValue::Int(i) => i.to_string(),
        SerializedValue::Float(f) => f.to_string(),
        SerializedValue::Str(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}

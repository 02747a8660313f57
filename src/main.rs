use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tracing::{debug, Level};

use docquill::config::Config;
use docquill::docpath::split_parent_and_leaf;
use docquill::document::node::DocValue;
use docquill::document::parser::parse_json;
use docquill::document::serializer::{to_json, to_pretty_json};
use docquill::document::tree::DocTree;
use docquill::document::xml::to_xml;
use docquill::document::SetOutcome;
use docquill::file::loader::{load_document_file, load_document_from_stdin};
use docquill::file::saver::{render, save_document_file};

/// docquill - read and write JSON/YAML documents by path
#[derive(Parser)]
#[command(name = "docquill")]
#[command(version)]
#[command(about = "Path-addressed editing of JSON and YAML documents", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at a path
    Get {
        /// Document file (`-` reads stdin)
        file: String,
        /// Path such as `$.foo[0]`
        path: String,
        /// Print compact JSON instead of indented
        #[arg(long)]
        compact: bool,
    },
    /// Write a value at a path, creating missing containers
    Set {
        file: String,
        path: String,
        /// Value as relaxed JSON; anything unparseable is taken as a string
        value: String,
        /// Save the result back to the file instead of printing it
        #[arg(short, long)]
        in_place: bool,
    },
    /// Append a value to the array at a path
    Append {
        file: String,
        path: String,
        value: String,
        #[arg(short, long)]
        in_place: bool,
    },
    /// Print the parent and leaf of a path
    Split { path: String },
    /// Print a document as JSON or XML
    Convert {
        file: String,
        #[arg(long)]
        xml: bool,
        #[arg(long, conflicts_with = "xml")]
        compact: bool,
    },
}

impl Cli {
    fn is_debug(&self) -> bool {
        self.debug
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.is_debug() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    debug!(?config, "configuration loaded");

    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Get {
            file,
            path,
            compact,
        } => {
            let tree = load(&file, &config)?;
            let value = tree
                .read(&path)
                .with_context(|| format!("Cannot read {} from {}", path, file))?;
            write_value(&mut stdout, value, compact, &config)?;
        }
        Command::Set {
            file,
            path,
            value,
            in_place,
        } => {
            let mut tree = load(&file, &config)?;
            let outcome = tree
                .set(&path, parse_argument(&value))
                .with_context(|| format!("Cannot set {}", path))?;
            if outcome == SetOutcome::RootReplaced {
                debug!("root value replaced");
            }
            finish_write(&mut stdout, &file, &tree, in_place, &config)?;
        }
        Command::Append {
            file,
            path,
            value,
            in_place,
        } => {
            let mut tree = load(&file, &config)?;
            tree.append(&path, parse_argument(&value))
                .with_context(|| format!("Cannot append to {}", path))?;
            finish_write(&mut stdout, &file, &tree, in_place, &config)?;
        }
        Command::Split { path } => {
            let (parent, leaf) = split_parent_and_leaf(&path)
                .with_context(|| format!("Invalid path: {}", path))?;
            writeln!(stdout, "{}", parent)?;
            writeln!(stdout, "{}", leaf)?;
        }
        Command::Convert { file, xml, compact } => {
            let tree = load(&file, &config)?;
            if xml {
                writeln!(stdout, "{}", to_xml(tree.root()))?;
            } else {
                write_value(&mut stdout, tree.root(), compact, &config)?;
            }
        }
    }

    stdout.flush()?;
    Ok(())
}

fn load(file: &str, config: &Config) -> Result<DocTree> {
    if file == "-" {
        load_document_from_stdin(config)
    } else {
        load_document_file(file, config).with_context(|| format!("Failed to load {}", file))
    }
}

/// Reads a command-line value as relaxed JSON, or as a plain string.
fn parse_argument(raw: &str) -> DocValue {
    match parse_json(raw) {
        Ok(value) => value,
        Err(_) => DocValue::String(raw.to_string()),
    }
}

fn write_value<W: Write>(
    out: &mut W,
    value: &DocValue,
    compact: bool,
    config: &Config,
) -> Result<()> {
    if compact {
        writeln!(out, "{}", to_json(value))?;
    } else {
        write!(out, "{}", to_pretty_json(value, config.indent_size))?;
    }
    Ok(())
}

fn finish_write<W: Write>(
    out: &mut W,
    file: &str,
    tree: &DocTree,
    in_place: bool,
    config: &Config,
) -> Result<()> {
    if in_place {
        anyhow::ensure!(file != "-", "--in-place cannot be used with stdin");
        save_document_file(file, tree, config)
            .with_context(|| format!("Failed to save {}", file))?;
    } else {
        write!(out, "{}", render(tree, tree.format(), config)?)?;
    }
    Ok(())
}

//! Command-line interface for mdoc-validate
//!
//! Reads a JSON description of an mdoc document (see
//! `mdoc_validate::mdoc::formats::source`), validates it and prints the
//! diagnostics, the document metadata and optionally the normalized tree.
//!
//! Usage:
//!   mdoc `<path>` [--config `<file>`] [--format text|json] [--tree] [--quick] [--os `<name>`] [-v...]

use clap::{Arg, ArgAction, Command};
use mdoc_validate::mdoc::building::{Document, DocumentBuilder};
use mdoc_validate::mdoc::config::{Loader, MdocConfig, OutputFormat};
use mdoc_validate::mdoc::diagnostics::{Diagnostic, DiagnosticSeverity};
use mdoc_validate::mdoc::formats::json::DocumentView;
use mdoc_validate::mdoc::formats::{replay, FormatRegistry, SourceDocument};
use mdoc_validate::mdoc::validate::ValidatorOptions;
use serde::Serialize;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("mdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate and normalize mdoc manual page trees")
        .arg(
            Arg::new("path")
                .help("Path to the JSON document to validate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["text", "json"]),
        )
        .arg(
            Arg::new("tree")
                .long("tree")
                .help("Print the normalized tree")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quick")
                .long("quick")
                .help("Keep the document date verbatim")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("os")
                .long("os")
                .help("Operating system name for an empty Os macro"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity")
                .action(ArgAction::Count),
        )
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mdoc_validate={level},mdoc={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &clap::ArgMatches) -> Result<MdocConfig, config::ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("mdoc.toml"),
    };
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("tree") {
        loader = loader.set_override("output.tree", true)?;
    }
    if matches.get_flag("quick") {
        loader = loader.set_override("validation.quick", true)?;
    }
    if let Some(os) = matches.get_one::<String>("os") {
        loader = loader.set_override("validation.default_os", os.as_str())?;
    }
    loader.build()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: Vec<&'a Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<DocumentView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_meta(doc: &Document) {
    let meta = &doc.meta;
    let fields = [
        ("title", &meta.title),
        ("section", &meta.msec),
        ("volume", &meta.vol),
        ("arch", &meta.arch),
        ("date", &meta.date),
        ("os", &meta.os),
        ("name", &meta.name),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{label}: {value}");
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn Error>> {
    let matches = command().get_matches();
    init_tracing(matches.get_count("verbose"));

    let config = load_config(&matches)?;
    debug!(?config, "configuration loaded");
    let min_severity = DiagnosticSeverity::from_name(&config.output.min_severity)
        .ok_or_else(|| format!("unknown severity '{}'", config.output.min_severity))?;

    let path = matches
        .get_one::<String>("path")
        .ok_or("missing input path")?;
    let input = std::fs::read_to_string(path)?;
    let source = SourceDocument::from_json(&input)?;
    info!(path = %path, nodes = source.nodes.len(), "validating");

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let outcome = {
        let mut builder =
            DocumentBuilder::with_sink(&mut diagnostics).with_options(ValidatorOptions::from(&config.validation));
        replay(&mut builder, &source.nodes)
            .and_then(|()| builder.finish())
            .map(|(doc, _)| doc)
    };
    let shown: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.severity >= min_severity)
        .collect();

    match config.output.format {
        OutputFormat::Json => {
            let report = JsonReport {
                diagnostics: shown,
                document: outcome.as_ref().ok().map(DocumentView::new),
                error: outcome.as_ref().err().map(|e| e.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for diagnostic in &shown {
                println!("{path}:{diagnostic}");
            }
            match &outcome {
                Ok(doc) => {
                    print_meta(doc);
                    if config.output.tree {
                        print!("{}", FormatRegistry::default().serialize(doc, "treeviz")?);
                    }
                }
                Err(err) => eprintln!("{path}: {err}"),
            }
        }
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

//! notemark CLI
//!
//! Developer tools around the import pipeline. Every command prints JSON on
//! stdout; logs go to stderr (`RUST_LOG`, or `--verbose` for debug).
//!
//! - `parse <file>`: markdown → `ParseResult`
//! - `verify <original.json> <imported.json>`: diff two trees
//! - `roundtrip <file>`: parse, export, reparse and verify
//! - `export <file>`: parse, then print markdown (and optionally a sidecar)
//! - `import [notes-dir]`: import every note under a directory
//!
//! `verify` and `roundtrip` exit with status 1 when a semantic difference is
//! found.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use notemark_config::Config;
use notemark_engine::io::{self, ImportOptions};
use notemark_engine::{
    ExportOptions, Node, ParseOptions, RoundTripReport, SidecarMeta, build_sidecar, import_note,
    parse_markdown, parse_markdown_bytes, scan_markdown_files, to_markdown, verify_round_trip,
};
use relative_path::RelativePathBuf;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::{fs, process};

#[derive(Parser)]
#[command(name = "notemark")]
#[command(author, version, about = "Markdown import pipeline tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (default: ~/.config/notemark/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a markdown file and print the result as JSON
    Parse {
        file: PathBuf,

        #[command(flatten)]
        parse: ParseFlags,

        /// Sidecar to enrich the tree with
        #[arg(long)]
        sidecar: Option<PathBuf>,
    },

    /// Compare two trees (a tree or a parse result per JSON file)
    Verify {
        original: PathBuf,
        imported: PathBuf,
    },

    /// Parse, export, reparse and verify a markdown file
    Roundtrip {
        file: PathBuf,

        #[command(flatten)]
        parse: ParseFlags,

        /// Export tags and wiki-links without id envelopes
        #[arg(long)]
        plain: bool,
    },

    /// Parse a markdown file and print it back as markdown
    Export {
        file: PathBuf,

        #[command(flatten)]
        parse: ParseFlags,

        /// Export tags and wiki-links without id envelopes
        #[arg(long)]
        plain: bool,

        /// Also write a sidecar for the exported note
        #[arg(long)]
        sidecar_out: Option<PathBuf>,
    },

    /// Import every note under a directory (default: notes_path from config)
    Import {
        notes_dir: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseFlags,
    },
}

#[derive(Args, Debug, Clone, Copy, Default)]
struct ParseFlags {
    /// Treat tag/wiki-link envelopes as plain text
    #[arg(long)]
    no_semantics: bool,

    /// Keep a leading frontmatter block as content
    #[arg(long)]
    keep_frontmatter: bool,
}

impl ParseFlags {
    fn apply(self, mut options: ParseOptions) -> ParseOptions {
        if self.no_semantics {
            options.parse_semantics = false;
        }
        if self.keep_frontmatter {
            options.strip_frontmatter = false;
        }
        options
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportSummary {
    path: RelativePathBuf,
    warnings: usize,
    block_count: usize,
    has_sidecar: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = load_config(cli.config.as_deref())?;

    let lossless = match cli.command {
        Commands::Parse {
            file,
            parse,
            sidecar,
        } => {
            let bytes =
                fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let mut result = parse_markdown_bytes(&bytes, &parse.apply(config.to_parse_options()))?;
            if let Some(path) = sidecar {
                match io::load_sidecar(&path)? {
                    Some(parsed) => {
                        io::apply_sidecar(&mut result, parsed);
                    }
                    None => log::warn!("no usable sidecar at {}", path.display()),
                }
            }
            print_json(&result)?;
            true
        }
        Commands::Verify { original, imported } => {
            let report = verify_round_trip(&read_tree(&original)?, &read_tree(&imported)?);
            print_json(&report)?;
            report.is_lossless()
        }
        Commands::Roundtrip { file, parse, plain } => {
            let options = parse.apply(config.to_parse_options());
            let report = round_trip(&read_text(&file)?, &options, &export_options(plain));
            print_json(&report)?;
            report.is_lossless()
        }
        Commands::Export {
            file,
            parse,
            plain,
            sidecar_out,
        } => {
            let tree = parse_markdown(&read_text(&file)?, &parse.apply(config.to_parse_options())).tree;
            print!("{}", to_markdown(&tree, &export_options(plain)));
            if let Some(path) = sidecar_out {
                let meta = SidecarMeta {
                    title: file
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned()),
                    ..SidecarMeta::default()
                };
                fs::write(&path, build_sidecar(&tree, meta).to_json()?)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            true
        }
        Commands::Import { notes_dir, parse } => {
            let notes_dir = notes_dir.or_else(|| config.notes_path.clone()).context(
                "no notes directory given and no notes_path in the config file",
            )?;
            let options = ImportOptions {
                parse: parse.apply(config.to_parse_options()),
                ..config.to_import_options()
            };
            print_json(&import_all(&notes_dir, &options)?)?;
            true
        }
    };

    if !lossless {
        process::exit(1);
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map_or_else(Config::config_path, Path::to_path_buf);
    let config = Config::load_from_path(&path)?;
    if config.is_none() {
        log::debug!("no config file at {}; using defaults", path.display());
    }
    Ok(config.unwrap_or_default())
}

fn export_options(plain: bool) -> ExportOptions {
    ExportOptions {
        semantic_envelopes: !plain,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Reads a tree from JSON: either a bare node or a parse result's `tree`.
fn read_tree(path: &Path) -> Result<Node> {
    tree_from_json(&read_text(path)?).with_context(|| format!("reading tree from {}", path.display()))
}

fn tree_from_json(json: &str) -> Result<Node> {
    let mut value: Value = serde_json::from_str(json)?;
    if let Some(tree) = value.get_mut("tree") {
        value = tree.take();
    }
    Ok(serde_json::from_value(value)?)
}

fn round_trip(text: &str, parse: &ParseOptions, export: &ExportOptions) -> RoundTripReport {
    let original = parse_markdown(text, parse).tree;
    let markdown = to_markdown(&original, export);
    log::debug!("exported {} bytes of markdown", markdown.len());
    let imported = parse_markdown(&markdown, parse).tree;
    verify_round_trip(&original, &imported)
}

fn import_all(notes_dir: &Path, options: &ImportOptions) -> Result<Vec<ImportSummary>> {
    let mut summaries = Vec::new();
    for file in scan_markdown_files(notes_dir)? {
        let relative = file.strip_prefix(notes_dir)?;
        let relative = RelativePathBuf::from_path(relative)
            .with_context(|| format!("non-relative path {}", relative.display()))?;
        let note = import_note(&relative, notes_dir, options)?;
        for warning in &note.result.warnings {
            log::info!("{relative}: {warning}");
        }
        summaries.push(ImportSummary {
            path: note.path,
            warnings: note.result.warnings.len(),
            block_count: note.result.stats.block_count,
            has_sidecar: note.sidecar.is_some(),
        });
    }
    Ok(summaries)
}

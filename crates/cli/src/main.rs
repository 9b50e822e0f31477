use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use doxchunk_code_chunker::{retrieve_snippet, CodeChunker};
use doxchunk_doxygen_parser::{parse_file, try_parse_file, CodeElement, ElementOrigin};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Doxygen XML file name suffixes that describe whole source files rather
/// than compound entities; the browse list hides them.
const FILE_COMPOUND_SUFFIXES: &[&str] = &[
    "_8cpp.xml",
    "_8h.xml",
    "_8td.xml",
    "_8py.xml",
    "_8inc.xml",
];

#[derive(Parser)]
#[command(name = "doxchunk")]
#[command(about = "Chunk Doxygen-documented source code for retrieval pipelines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List chunkable compound XML files in a Doxygen output directory
    List {
        /// Directory containing Doxygen XML output
        xml_dir: PathBuf,
    },

    /// Parse one compound XML file and print its chunks
    Chunk {
        /// Path to a Doxygen compound XML file
        xml_file: PathBuf,

        /// Root directory of the source tree the XML refers to
        #[arg(long)]
        source_root: PathBuf,

        /// Emit chunks as JSON records instead of plain text
        #[arg(long)]
        json: bool,

        /// Print only the chunk whose element id matches
        #[arg(long)]
        id: Option<String>,
    },

    /// Walk an XML tree and extract class-like definition bodies
    Extract {
        /// Directory containing Doxygen XML output
        xml_dir: PathBuf,

        /// Root directory of the source tree the XML refers to
        source_root: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::List { xml_dir } => cmd_list(&xml_dir),
        Commands::Chunk {
            xml_file,
            source_root,
            json,
            id,
        } => cmd_chunk(&xml_file, &source_root, json, id.as_deref()),
        Commands::Extract {
            xml_dir,
            source_root,
        } => cmd_extract(&xml_dir, &source_root),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// List compound XML files worth chunking, sorted by name
///
/// Hides `index.xml`, `Doxyfile.xml`, and per-file compounds: file compounds
/// rarely carry body ranges and would only produce skip noise.
fn cmd_list(xml_dir: &Path) -> Result<()> {
    if !xml_dir.is_dir() {
        bail!("XML directory not found: {}", xml_dir.display());
    }

    let mut names: Vec<String> = std::fs::read_dir(xml_dir)
        .with_context(|| format!("Failed to read {}", xml_dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".xml"))
        .filter(|name| name != "index.xml" && name != "Doxyfile.xml")
        .filter(|name| {
            !FILE_COMPOUND_SUFFIXES
                .iter()
                .any(|suffix| name.ends_with(suffix))
        })
        .collect();
    names.sort();

    for name in &names {
        println!("{name}");
    }
    log::info!("{} compound file(s) in {}", names.len(), xml_dir.display());
    Ok(())
}

/// Parse one compound file, chunk it, and print the result
fn cmd_chunk(xml_file: &Path, source_root: &Path, json: bool, id: Option<&str>) -> Result<()> {
    if !source_root.is_dir() {
        bail!("Source root not found: {}", source_root.display());
    }

    let elements = try_parse_file(xml_file)
        .with_context(|| format!("Failed to parse {}", xml_file.display()))?;
    if elements.is_empty() {
        log::warn!("No parsable elements found in {}", xml_file.display());
        return Ok(());
    }

    let chunker = CodeChunker::new(source_root);
    let (chunks, stats) = chunker.chunk_with_stats(&elements);

    match id {
        Some(wanted) => {
            let chunk = chunks
                .iter()
                .find(|chunk| chunk.metadata.id == wanted)
                .with_context(|| format!("No chunk produced for element id '{wanted}'"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(chunk)?);
            } else {
                println!("{}", chunk.text);
            }
        }
        None => {
            if json {
                println!("{}", serde_json::to_string_pretty(&chunks)?);
            } else {
                for chunk in &chunks {
                    println!("{}", chunk.text);
                    println!("{}", "=".repeat(60));
                }
            }
        }
    }

    log::info!("{stats}");
    Ok(())
}

/// Walk a Doxygen XML tree and print every class-like definition body
///
/// Ad hoc reporting over the same parser and retriever the chunk pipeline
/// uses; per-element failures are logged and skipped.
fn cmd_extract(xml_dir: &Path, source_root: &Path) -> Result<()> {
    if !xml_dir.is_dir() {
        bail!("XML directory not found: {}", xml_dir.display());
    }
    if !source_root.is_dir() {
        bail!("Source root not found: {}", source_root.display());
    }

    println!("Scanning XML files in: {}", xml_dir.display());
    println!("Using source root: {}\n", source_root.display());

    let mut definitions = 0usize;
    let mut largest_snippet = 0usize;

    for entry in WalkDir::new(xml_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".xml") || name == "index.xml" {
            continue;
        }

        for element in class_like_elements(&parse_file(path)) {
            // class_like_elements guarantees a complete location.
            let Some(location) = element.location.as_ref() else {
                continue;
            };
            let (Some(start), Some(end)) = (location.start_line, location.end_line) else {
                continue;
            };
            let source_path = source_root.join(&location.file);

            let snippet = match retrieve_snippet(&source_path, start, end) {
                Ok(snippet) => snippet,
                Err(err) => {
                    log::error!("Skipping '{}': {err}", element.name);
                    continue;
                }
            };

            definitions += 1;
            largest_snippet = largest_snippet.max(snippet.trim().len());

            println!("--- Found {}: {} ---", element.kind, element.name);
            println!("  Source file: {}", source_path.display());
            println!("  Lines: {start}-{end}");
            println!("  Code:");
            println!("{}", "-".repeat(60));
            println!("{}", snippet.trim());
            println!("{}\n", "-".repeat(60));
        }
    }

    println!("Total class-like definitions: {definitions}");
    println!("Largest snippet: {largest_snippet} bytes");
    if definitions == 0 {
        println!("No class-like definitions found in the XML files.");
    }
    Ok(())
}

/// Filter a parsed element batch down to class-like compound definitions
/// with a complete source location
///
/// Member-level matches are excluded: an enum declared inside a class shares
/// its kind with a standalone enum compound, and only the latter is a
/// definition body worth printing whole.
fn class_like_elements(elements: &[CodeElement]) -> impl Iterator<Item = &CodeElement> {
    elements.iter().filter(|element| {
        element.origin == ElementOrigin::Compound
            && element.kind.is_class_like()
            && element
                .location
                .as_ref()
                .is_some_and(|location| location.is_complete())
    })
}

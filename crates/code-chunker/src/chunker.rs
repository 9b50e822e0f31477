use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::retriever::retrieve_snippet;
use crate::types::{Chunk, ChunkMetadata};
use doxchunk_doxygen_parser::CodeElement;
use std::path::PathBuf;

/// Batch orchestrator: resolves each element's source file against a source
/// tree root, retrieves its snippet, and formats the pair into a [`Chunk`]
///
/// Elements with missing or unusable locations are logged and skipped; the
/// batch always runs to completion.
pub struct CodeChunker {
    source_root: PathBuf,
}

impl CodeChunker {
    /// Create a chunker rooted at the given source tree
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    /// Produce chunks for every element with a usable location
    pub fn chunk(&self, elements: &[CodeElement]) -> Vec<Chunk> {
        self.chunk_with_stats(elements).0
    }

    /// Produce chunks plus batch diagnostics
    ///
    /// Processes elements in input order. Every per-element failure is caught,
    /// logged, recorded in the stats, and converted into a skip.
    pub fn chunk_with_stats(&self, elements: &[CodeElement]) -> (Vec<Chunk>, ChunkStats) {
        let mut chunks = Vec::new();
        let mut stats = ChunkStats::new();

        log::info!("Starting chunk creation for {} element(s)", elements.len());

        for element in elements {
            match self.chunk_element(element) {
                Ok(chunk) => {
                    chunks.push(chunk);
                    stats.processed += 1;
                }
                Err(reason) => {
                    log::warn!("Skipping element '{}': {reason}", element.name);
                    stats.add_error(format!("{}: {reason}", element.name));
                }
            }
        }

        stats.produced = chunks.len();
        log::info!(
            "Chunk creation finished. Processed: {}, skipped: {}, total chunks: {}",
            stats.processed,
            stats.skipped,
            stats.produced
        );

        (chunks, stats)
    }

    /// Process a single element through the resolve/retrieve/format pipeline
    fn chunk_element(&self, element: &CodeElement) -> Result<Chunk> {
        let location = element
            .location
            .as_ref()
            .filter(|loc| !loc.file.is_empty())
            .ok_or_else(|| ChunkerError::MissingLocation(element.id.clone()))?;
        let start_line = location
            .start_line
            .ok_or_else(|| ChunkerError::MissingLocation(element.id.clone()))?;

        // Checked before invoking the retriever so a missing source file
        // yields one clear diagnostic instead of a retriever error.
        let full_path = self.source_root.join(&location.file);
        if !full_path.is_file() {
            return Err(ChunkerError::NotFound(full_path));
        }

        let end_line = location
            .end_line
            .ok_or_else(|| ChunkerError::MissingLocation(element.id.clone()))?;

        let snippet = retrieve_snippet(&full_path, start_line, end_line)?;
        format_element_to_chunk(element, &snippet)
    }
}

/// Format a code element and its retrieved snippet into a chunk
///
/// The text body concatenates, in fixed order: a `File:` line, a `Kind:`
/// line, a `Template:` line, a `Brief:` line, a `Docs:` section (optional
/// lines omitted when absent), a separator, then a fenced code block tagged
/// with a language hint derived from the source file's extension. All labels
/// are attached here; the descriptions arrive label-free from the parser.
///
/// # Errors
///
/// [`ChunkerError::MissingLocation`] when the element's location is absent or
/// incomplete; the orchestrator never passes such an element.
pub fn format_element_to_chunk(element: &CodeElement, snippet: &str) -> Result<Chunk> {
    let location = element
        .location
        .as_ref()
        .filter(|loc| loc.is_complete())
        .ok_or_else(|| ChunkerError::MissingLocation(element.id.clone()))?;
    // is_complete() guarantees both lines.
    let (start_line, end_line) = match (location.start_line, location.end_line) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ChunkerError::MissingLocation(element.id.clone())),
    };

    let mut parts: Vec<String> = Vec::new();
    parts.push(format!("File: {}", location.file));
    parts.push(format!("Kind: {}", element.kind));
    if let Some(template) = &element.template_params {
        parts.push(format!("Template: {template}"));
    }
    if let Some(brief) = &element.brief_description {
        parts.push(format!("Brief: {brief}"));
    }
    if let Some(detailed) = &element.detailed_description {
        parts.push(format!("Docs: {detailed}"));
    }

    let hint = Language::from_path(&location.file).fence_hint();
    parts.push("\n---\nCode:".to_string());
    parts.push(format!("```{hint}\n{snippet}\n```"));

    let metadata = ChunkMetadata {
        id: element.id.clone(),
        name: element.name.clone(),
        kind: element.kind.as_str().to_string(),
        file_path: location.file.clone(),
        start_line,
        end_line,
        brief_description: element.brief_description.clone().unwrap_or_default(),
        detailed_description: element.detailed_description.clone().unwrap_or_default(),
        template_params: element.template_params.clone().unwrap_or_default(),
    };

    Ok(Chunk::new(parts.join("\n"), metadata))
}

/// Diagnostics for one chunking batch
#[derive(Debug, Clone, Default)]
pub struct ChunkStats {
    /// Elements successfully turned into chunks
    pub processed: usize,

    /// Elements skipped because of missing locations or retrieval failures
    pub skipped: usize,

    /// Total chunks produced
    pub produced: usize,

    /// Per-element skip reasons, in input order
    pub errors: Vec<String>,
}

impl ChunkStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: String) {
        self.skipped += 1;
        self.errors.push(error);
    }
}

impl std::fmt::Display for ChunkStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed: {} | Skipped: {} | Chunks: {}",
            self.processed, self.skipped, self.produced
        )
    }
}

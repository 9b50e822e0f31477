//! # Doxchunk Code Chunker
//!
//! Pairs Doxygen-derived code elements with their exact source text and
//! formats each pair into a self-contained chunk for embedding pipelines.
//!
//! ## Architecture
//!
//! ```text
//! [CodeElement] (from doxchunk-doxygen-parser)
//!     │
//!     ├──> Location checks (file, start line, end line all present)
//!     │
//!     ├──> Path resolution (source_root / location.file)
//!     │
//!     ├──> Snippet retrieval (exact inclusive line range)
//!     │
//!     └──> Chunk formatting
//!          ├─> Text: header lines + fenced code block
//!          └─> Metadata: schema-stable flat record keyed by element id
//! ```
//!
//! Every per-element failure is logged, counted, and converted into a skip;
//! a single bad element never aborts the batch.
//!
//! ## Example
//!
//! ```no_run
//! use doxchunk_code_chunker::CodeChunker;
//! use doxchunk_doxygen_parser::parse_file;
//!
//! let elements = parse_file("xml/classllvm_1_1Value.xml");
//! let chunker = CodeChunker::new("data/llvm-project");
//! let chunks = chunker.chunk(&elements);
//! for chunk in &chunks {
//!     println!("{}", chunk.metadata.id);
//! }
//! ```

mod chunker;
mod error;
mod language;
mod retriever;
mod types;

pub use chunker::{format_element_to_chunk, ChunkStats, CodeChunker};
pub use error::{ChunkerError, Result};
pub use language::Language;
pub use retriever::retrieve_snippet;
pub use types::{Chunk, ChunkMetadata};

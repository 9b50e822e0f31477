//! # Doxchunk Doxygen Parser
//!
//! Extracts structural metadata from Doxygen-generated compound XML files.
//!
//! Doxygen emits one XML document per compound entity (class, struct,
//! namespace, file). This crate walks the `compounddef`/`memberdef` tree of
//! such a document and produces an ordered list of [`CodeElement`] values:
//! one per compound definition plus one per non-private member, each carrying
//! the element's kind, flattened documentation, reconstructed template
//! signature, and source location.
//!
//! The parser is deliberately tolerant of schema variability: Doxygen's XML
//! shape differs by compound kind and by Doxygen version, so every field
//! lookup is a total function returning an `Option`. Only structural
//! malformation (unreadable file, broken XML) is reported as an error.
//!
//! ## Example
//!
//! ```rust
//! use doxchunk_doxygen_parser::parse_str;
//!
//! let xml = r#"<doxygen><compounddef id="c1" kind="class" language="C++">
//!   <compoundname>Point</compoundname>
//!   <location file="point.h" line="3" bodystart="3" bodyend="9"/>
//! </compounddef></doxygen>"#;
//!
//! let elements = parse_str(xml).unwrap();
//! assert_eq!(elements[0].name, "Point");
//! ```

mod error;
mod model;
mod parse;

pub use error::{ParseError, Result};
pub use model::{CodeElement, CodeLocation, ElementKind, ElementOrigin};
pub use parse::{parse_file, parse_str, try_parse_file};

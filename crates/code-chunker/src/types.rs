use serde::{Deserialize, Serialize};

/// A formatted text+metadata record pairing one code element's documentation
/// with its exact source text
///
/// Terminal artifact of the pipeline; the embedding step consumes it as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Fully formatted text: header lines plus a fenced code block
    pub text: String,

    /// Flat metadata record mirroring every field used in the text
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(text: String, metadata: ChunkMetadata) -> Self {
        Self { text, metadata }
    }
}

/// Schema-stable metadata for a chunk
///
/// Serializes to a flat string-keyed map. Every key is always present:
/// optional description fields default to the empty string rather than being
/// omitted, so the schema is identical across elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Doxygen element id — the join key back to the input element
    pub id: String,

    /// Element name
    pub name: String,

    /// Element kind (Doxygen kind string)
    pub kind: String,

    /// Source-tree-relative file path
    pub file_path: String,

    /// Start line (1-indexed)
    pub start_line: u32,

    /// End line (1-indexed, inclusive)
    pub end_line: u32,

    /// Brief description, empty when the element has none
    #[serde(default)]
    pub brief_description: String,

    /// Detailed description, empty when the element has none
    #[serde(default)]
    pub detailed_description: String,

    /// Template signature, empty when the element has none
    #[serde(default)]
    pub template_params: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_metadata_serializes_to_flat_map() {
        let metadata = ChunkMetadata {
            id: "f1".to_string(),
            name: "foo".to_string(),
            kind: "function".to_string(),
            file_path: "a.cpp".to_string(),
            start_line: 3,
            end_line: 5,
            ..Default::default()
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["id"], "f1");
        assert_eq!(json["start_line"], 3);
        // Absent descriptions serialize as empty strings, keeping keys stable.
        assert_eq!(json["brief_description"], "");
        assert_eq!(json["template_params"], "");
    }
}

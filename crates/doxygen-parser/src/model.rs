use serde::{Deserialize, Serialize};

/// Source position of a documented element
///
/// Doxygen omits body line information for some compound kinds, so both line
/// fields are optional. Lines are 1-indexed and inclusive; placeholder values
/// (`0`, `-1`) are normalized to `None` at parse time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeLocation {
    /// Path relative to the source tree root
    pub file: String,

    /// Declaration line (1-indexed)
    pub start_line: Option<u32>,

    /// End-of-body line (1-indexed, inclusive)
    pub end_line: Option<u32>,
}

impl CodeLocation {
    /// Create a new location
    #[must_use]
    pub const fn new(file: String, start_line: Option<u32>, end_line: Option<u32>) -> Self {
        Self {
            file,
            start_line,
            end_line,
        }
    }

    /// Check whether the location carries everything needed to slice a file
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.file.is_empty() && self.start_line.is_some() && self.end_line.is_some()
    }
}

/// Kind of a documented element, as reported by Doxygen
///
/// Doxygen's kind set is open-ended; kinds we do not special-case are kept
/// verbatim in [`ElementKind::Other`] so they round-trip losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Function,
    Class,
    Struct,
    Interface,
    Enum,
    Namespace,
    Variable,
    Typedef,
    Define,
    File,
    Example,
    Other(String),
}

impl ElementKind {
    /// Map a Doxygen kind attribute to an element kind
    #[must_use]
    pub fn from_doxygen(kind: &str) -> Self {
        match kind {
            "function" => Self::Function,
            "class" => Self::Class,
            "struct" => Self::Struct,
            "interface" => Self::Interface,
            "enum" => Self::Enum,
            "namespace" => Self::Namespace,
            "variable" => Self::Variable,
            "typedef" => Self::Typedef,
            "define" => Self::Define,
            "file" => Self::File,
            "example" => Self::Example,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the Doxygen kind string back
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Namespace => "namespace",
            Self::Variable => "variable",
            Self::Typedef => "typedef",
            Self::Define => "define",
            Self::File => "file",
            Self::Example => "example",
            Self::Other(kind) => kind,
        }
    }

    /// Check if this kind describes a compound definition rather than a member
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Struct
                | Self::Interface
                | Self::Enum
                | Self::Namespace
                | Self::File
                | Self::Example
        )
    }

    /// Check if this kind describes a class-like body worth extracting whole
    #[must_use]
    pub const fn is_class_like(&self) -> bool {
        matches!(
            self,
            Self::Class | Self::Struct | Self::Interface | Self::Enum | Self::Example
        )
    }
}

impl From<String> for ElementKind {
    fn from(kind: String) -> Self {
        Self::from_doxygen(&kind)
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an element was read from a compound definition or from a member
/// definition nested inside one
///
/// Some kinds appear on both sides (an enum can be its own compound or a
/// member of a class), so the kind alone cannot recover this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementOrigin {
    Compound,
    Member,
}

/// One documented unit extracted from a Doxygen XML file
///
/// `id` and `name` are always non-empty; definitions missing either are
/// dropped during parsing and never reach downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeElement {
    /// Doxygen-assigned unique identifier, used as the chunk join key
    pub id: String,

    /// Element name (qualified for compounds, bare for members)
    pub name: String,

    /// Element kind
    pub kind: ElementKind,

    /// Whether the element is a compound definition or a member
    pub origin: ElementOrigin,

    /// Source language tag from the compound definition
    pub language: Option<String>,

    /// Flattened brief description
    pub brief_description: Option<String>,

    /// Flattened detailed description; for members this embeds the declared
    /// signature alongside the documentation text
    pub detailed_description: Option<String>,

    /// Source location, when Doxygen reported one
    pub location: Option<CodeLocation>,

    /// Reconstructed template signature, e.g. `template <typename T>`
    pub template_params: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(ElementKind::from_doxygen("class"), ElementKind::Class);
        assert_eq!(ElementKind::Class.as_str(), "class");
        assert_eq!(
            ElementKind::from_doxygen("friend"),
            ElementKind::Other("friend".to_string())
        );
        assert_eq!(ElementKind::from_doxygen("friend").as_str(), "friend");
    }

    #[test]
    fn test_kind_is_compound() {
        assert!(ElementKind::Class.is_compound());
        assert!(ElementKind::Namespace.is_compound());
        assert!(ElementKind::File.is_compound());
        assert!(!ElementKind::Function.is_compound());
        assert!(!ElementKind::Variable.is_compound());
    }

    #[test]
    fn test_kind_is_class_like() {
        assert!(ElementKind::Class.is_class_like());
        assert!(ElementKind::Struct.is_class_like());
        assert!(!ElementKind::Namespace.is_class_like());
        assert!(!ElementKind::File.is_class_like());
    }

    #[test]
    fn test_location_completeness() {
        let complete = CodeLocation::new("a.cpp".to_string(), Some(3), Some(5));
        assert!(complete.is_complete());

        let no_end = CodeLocation::new("a.cpp".to_string(), Some(3), None);
        assert!(!no_end.is_complete());

        let no_file = CodeLocation::new(String::new(), Some(3), Some(5));
        assert!(!no_file.is_complete());
    }
}

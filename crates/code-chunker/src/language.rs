use std::path::Path;

/// Source language, detected from a file extension
///
/// Used only to tag the fenced code block in chunk text; detection is a
/// best-effort hint, never a hard requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    C,
    Cpp,
    Python,
    Rust,
    JavaScript,
    TypeScript,
    Go,
    Java,
    Unknown,
}

impl Language {
    /// Detect language from a file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "c" => Self::C,
            "h" | "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" | "inc" => Self::Cpp,
            "py" | "pyw" => Self::Python,
            "rs" => Self::Rust,
            "js" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "go" => Self::Go,
            "java" => Self::Java,
            _ => Self::Unknown,
        }
    }

    /// Detect language from a file path
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }

    /// Fence hint for a markdown code block; empty for unknown languages
    #[must_use]
    pub const fn fence_hint(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Go => "go",
            Self::Java => "java",
            Self::Unknown => "",
        }
    }
}

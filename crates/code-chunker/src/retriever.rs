use crate::error::{ChunkerError, Result};
use std::path::Path;

/// Retrieve the exact text spanning an inclusive 1-based line range
///
/// Reads the file as UTF-8 (undecodable bytes are substituted, never fatal),
/// slices lines `start_line..=end_line`, preserves all interior line breaks,
/// and strips the single trailing line break after the last line.
///
/// Pure function: no caching, no side effects. Callers resolve the path.
///
/// # Errors
///
/// - [`ChunkerError::InvalidRange`] when either line is below 1 or the range
///   is inverted — checked before touching the filesystem.
/// - [`ChunkerError::NotFound`] when the file does not exist.
/// - [`ChunkerError::OutOfRange`] when either line exceeds the file's length.
pub fn retrieve_snippet(path: impl AsRef<Path>, start_line: u32, end_line: u32) -> Result<String> {
    let path = path.as_ref();

    if start_line < 1 || end_line < 1 {
        return Err(ChunkerError::InvalidRange {
            start: start_line,
            end: end_line,
        });
    }
    if end_line < start_line {
        return Err(ChunkerError::InvalidRange {
            start: start_line,
            end: end_line,
        });
    }

    let raw = std::fs::read(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ChunkerError::NotFound(path.to_path_buf())
        } else {
            ChunkerError::Io(err)
        }
    })?;
    let content = String::from_utf8_lossy(&raw);

    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let line_count = lines.len();

    if start_line as usize > line_count || end_line as usize > line_count {
        return Err(ChunkerError::OutOfRange {
            start: start_line,
            end: end_line,
            line_count,
            path: path.to_path_buf(),
        });
    }

    let snippet = lines[(start_line as usize - 1)..(end_line as usize)].concat();
    match snippet.strip_suffix('\n') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(snippet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str =
        "#include <iostream>\n\nint add(int a, int b) {\n    return a + b;\n}\n// trailing comment\n";

    fn sample_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_retrieve_exact_range() {
        let file = sample_file();
        let snippet = retrieve_snippet(file.path(), 3, 5).unwrap();
        assert_eq!(snippet, "int add(int a, int b) {\n    return a + b;\n}");
        assert_eq!(snippet.lines().count(), 3);
    }

    #[test]
    fn test_retrieve_single_line() {
        let file = sample_file();
        let snippet = retrieve_snippet(file.path(), 4, 4).unwrap();
        assert_eq!(snippet, "    return a + b;");
    }

    #[test]
    fn test_retrieve_last_line_has_no_trailing_newline() {
        let file = sample_file();
        let snippet = retrieve_snippet(file.path(), 6, 6).unwrap();
        assert_eq!(snippet, "// trailing comment");
    }

    #[test]
    fn test_zero_start_is_invalid_range() {
        let file = sample_file();
        let result = retrieve_snippet(file.path(), 0, 5);
        assert!(matches!(
            result,
            Err(ChunkerError::InvalidRange { start: 0, end: 5 })
        ));
    }

    #[test]
    fn test_inverted_range_is_invalid() {
        let file = sample_file();
        let result = retrieve_snippet(file.path(), 5, 3);
        assert!(matches!(
            result,
            Err(ChunkerError::InvalidRange { start: 5, end: 3 })
        ));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = retrieve_snippet("does_not_exist.cpp", 1, 1);
        assert!(matches!(result, Err(ChunkerError::NotFound(_))));
    }

    #[test]
    fn test_range_beyond_file_is_out_of_range() {
        let file = sample_file();
        let result = retrieve_snippet(file.path(), 9999, 10005);
        assert!(matches!(
            result,
            Err(ChunkerError::OutOfRange { line_count: 6, .. })
        ));
    }

    #[test]
    fn test_file_without_final_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"one\ntwo").unwrap();
        let snippet = retrieve_snippet(file.path(), 1, 2).unwrap();
        assert_eq!(snippet, "one\ntwo");
    }

    #[test]
    fn test_undecodable_bytes_are_substituted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"valid line\n\xFF\xFEbroken\n").unwrap();
        let snippet = retrieve_snippet(file.path(), 1, 1).unwrap();
        assert_eq!(snippet, "valid line");

        // The broken line is still retrievable, with replacement characters.
        let broken = retrieve_snippet(file.path(), 2, 2).unwrap();
        assert!(broken.contains("broken"));
    }
}

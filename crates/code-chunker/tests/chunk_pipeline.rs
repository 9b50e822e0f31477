//! End-to-end tests: Doxygen XML -> elements -> chunks against a real
//! temporary source tree.

use doxchunk_code_chunker::CodeChunker;
use doxchunk_doxygen_parser::{parse_str, CodeElement, CodeLocation, ElementKind, ElementOrigin};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

const A_CPP: &str = "// a.cpp\n\nint foo() {\n  return 1;\n}\n// end\n";

const FOO_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<doxygen>
  <compounddef id="a_8cpp" kind="file" language="C++">
    <compoundname>a.cpp</compoundname>
    <sectiondef kind="func">
      <memberdef kind="function" id="f1" prot="public">
        <type>int</type>
        <definition>int foo</definition>
        <argsstring>()</argsstring>
        <name>foo</name>
        <location file="a.cpp" line="3" bodystart="3" bodyend="5"/>
      </memberdef>
    </sectiondef>
  </compounddef>
</doxygen>
"#;

fn source_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.cpp"), A_CPP).unwrap();
    dir
}

fn function_element(id: &str, file: &str, start: Option<u32>, end: Option<u32>) -> CodeElement {
    CodeElement {
        id: id.to_string(),
        name: format!("fn_{id}"),
        kind: ElementKind::Function,
        origin: ElementOrigin::Member,
        language: Some("C++".to_string()),
        brief_description: None,
        detailed_description: None,
        location: Some(CodeLocation::new(file.to_string(), start, end)),
        template_params: None,
    }
}

#[test]
fn one_function_compound_round_trips_to_one_chunk() {
    let dir = source_tree();

    let elements = parse_str(FOO_XML).unwrap();
    // The file compound plus the function member.
    assert_eq!(elements.len(), 2);

    let function = &elements[1];
    assert_eq!(function.id, "f1");
    assert_eq!(function.name, "foo");
    assert_eq!(function.kind, ElementKind::Function);
    let location = function.location.as_ref().unwrap();
    assert_eq!(location.file, "a.cpp");
    assert_eq!(location.start_line, Some(3));
    assert_eq!(location.end_line, Some(5));

    let chunker = CodeChunker::new(dir.path());
    let (chunks, stats) = chunker.chunk_with_stats(&elements);

    // The file compound carries no location, so only the function chunks.
    assert_eq!(chunks.len(), 1);
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.skipped, 1);

    let chunk = &chunks[0];
    assert_eq!(chunk.metadata.id, "f1");
    assert_eq!(chunk.metadata.start_line, 3);
    assert_eq!(chunk.metadata.end_line, 5);
    assert!(chunk.text.contains("```cpp\nint foo() {\n  return 1;\n}\n```"));
}

#[test]
fn output_never_exceeds_input_and_join_keys_are_unique() {
    let dir = source_tree();

    let elements = vec![
        function_element("f1", "a.cpp", Some(3), Some(5)),
        function_element("f2", "a.cpp", Some(1), Some(2)),
        function_element("f3", "a.cpp", None, Some(5)),
        function_element("f4", "missing.cpp", Some(1), Some(2)),
    ];

    let chunker = CodeChunker::new(dir.path());
    let chunks = chunker.chunk(&elements);

    assert!(chunks.len() <= elements.len());
    assert_eq!(chunks.len(), 2);

    let by_id: HashMap<&str, _> = chunks
        .iter()
        .map(|chunk| (chunk.metadata.id.as_str(), chunk))
        .collect();
    assert_eq!(by_id.len(), chunks.len());
    assert!(by_id.contains_key("f1"));
    assert!(by_id.contains_key("f2"));
}

#[test]
fn elements_with_incomplete_locations_are_skipped_not_fatal() {
    let dir = source_tree();

    let mut no_location = function_element("n1", "a.cpp", Some(1), Some(1));
    no_location.location = None;

    let elements = vec![
        no_location,
        function_element("n2", "a.cpp", None, Some(4)),
        function_element("n3", "a.cpp", Some(2), None),
        function_element("n4", "a.cpp", Some(9999), Some(10005)),
    ];

    let chunker = CodeChunker::new(dir.path());
    let (chunks, stats) = chunker.chunk_with_stats(&elements);

    assert!(chunks.is_empty());
    assert_eq!(stats.skipped, 4);
    assert_eq!(stats.errors.len(), 4);
}

#[test]
fn missing_source_file_is_reported_before_retrieval() {
    let dir = source_tree();
    let elements = vec![function_element("m1", "nope/missing.cpp", Some(1), Some(1))];

    let chunker = CodeChunker::new(dir.path());
    let (chunks, stats) = chunker.chunk_with_stats(&elements);

    assert!(chunks.is_empty());
    assert_eq!(stats.skipped, 1);
    assert!(stats.errors[0].contains("not found"));
}

#[test]
fn snippet_line_count_matches_requested_range() {
    let dir = source_tree();
    let elements = vec![function_element("r1", "a.cpp", Some(3), Some(5))];

    let chunker = CodeChunker::new(dir.path());
    let chunks = chunker.chunk(&elements);

    let text = &chunks[0].text;
    let code = text
        .split("```cpp\n")
        .nth(1)
        .and_then(|rest| rest.strip_suffix("\n```"))
        .unwrap();
    assert_eq!(code.lines().count(), 3);
    assert!(!code.ends_with('\n'));
}

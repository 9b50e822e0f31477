use crate::error::{ParseError, Result};
use crate::model::{CodeElement, CodeLocation, ElementKind, ElementOrigin};
use roxmltree::{Document, Node};
use std::path::Path;

/// Parse a Doxygen compound XML file, logging and swallowing failures
///
/// Returns the extracted elements in document order. Any structural failure
/// (missing file, unreadable file, malformed XML) is logged and results in an
/// empty vec, so one broken document never aborts a multi-file batch.
pub fn parse_file(path: impl AsRef<Path>) -> Vec<CodeElement> {
    let path = path.as_ref();
    match try_parse_file(path) {
        Ok(elements) => elements,
        Err(err) => {
            log::error!("Failed to parse {}: {err}", path.display());
            Vec::new()
        }
    }
}

/// Parse a Doxygen compound XML file
///
/// Distinguishes a missing file ([`ParseError::NotFound`]) from an unreadable
/// one ([`ParseError::Io`]) and from malformed XML ([`ParseError::Xml`]).
pub fn try_parse_file(path: impl AsRef<Path>) -> Result<Vec<CodeElement>> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ParseError::NotFound(path.to_path_buf())
        } else {
            ParseError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })?;
    let text = String::from_utf8_lossy(&raw);
    let elements = parse_str(&text)?;
    log::info!(
        "Parsed {}: {} element(s) extracted",
        path.display(),
        elements.len()
    );
    Ok(elements)
}

/// Parse an in-memory Doxygen compound XML document
pub fn parse_str(xml: &str) -> Result<Vec<CodeElement>> {
    let doc = Document::parse(xml)?;
    let mut elements = Vec::new();

    for compound in doc
        .descendants()
        .filter(|node| node.has_tag_name("compounddef"))
    {
        parse_compound(compound, &mut elements);
    }

    Ok(elements)
}

/// Extract the compound element and its non-private members, in document order
fn parse_compound(compound: Node<'_, '_>, out: &mut Vec<CodeElement>) {
    let language = compound.attribute("language").map(str::to_string);

    if let Some(element) = compound_element(compound, language.clone()) {
        out.push(element);
    }

    for member in compound
        .descendants()
        .filter(|node| node.has_tag_name("memberdef"))
    {
        // Only private members are dropped; protected ones stay indexed.
        if member.attribute("prot") == Some("private") {
            continue;
        }
        if let Some(element) = member_element(member, language.as_deref()) {
            out.push(element);
        }
    }
}

/// Build the element for a compound definition
///
/// Compound kinds take their name from `<compoundname>`; their descriptive
/// text is documentation only, with no signature line.
fn compound_element(compound: Node<'_, '_>, language: Option<String>) -> Option<CodeElement> {
    let id = non_empty_attribute(compound, "id");
    let kind = non_empty_attribute(compound, "kind").map(|k| ElementKind::from_doxygen(&k));
    let name = child_text(compound, "compoundname");

    let (Some(id), Some(kind), Some(name)) = (id, kind, name) else {
        log::warn!("Skipping compound definition with missing id, kind, or name");
        return None;
    };

    Some(CodeElement {
        brief_description: child_text(compound, "briefdescription"),
        detailed_description: child_text(compound, "detaileddescription"),
        location: parse_location(compound, &name),
        template_params: template_signature(compound),
        origin: ElementOrigin::Compound,
        id,
        name,
        kind,
        language,
    })
}

/// Build the element for a member definition
///
/// Member kinds take their name from the member's own `<name>` field. Their
/// descriptive text is the declared signature line followed by the flattened
/// documentation; the labels are the formatter's concern, not the parser's.
fn member_element(member: Node<'_, '_>, compound_language: Option<&str>) -> Option<CodeElement> {
    let id = non_empty_attribute(member, "id");
    let kind = non_empty_attribute(member, "kind").map(|k| ElementKind::from_doxygen(&k));
    let name = child_text(member, "name");

    let (Some(id), Some(kind), Some(name)) = (id, kind, name) else {
        log::debug!("Skipping member definition with missing id, kind, or name");
        return None;
    };

    let docs = child_text(member, "detaileddescription");
    let detailed = match (member_signature(member, &name), docs) {
        (Some(sig), Some(docs)) => Some(format!("{sig}\n{docs}")),
        (Some(sig), None) => Some(sig),
        (None, docs) => docs,
    };

    let language = member
        .attribute("language")
        .map(str::to_string)
        .or_else(|| compound_language.map(str::to_string));

    Some(CodeElement {
        brief_description: child_text(member, "briefdescription"),
        detailed_description: detailed,
        location: parse_location(member, &name),
        template_params: template_signature(member),
        origin: ElementOrigin::Member,
        id,
        name,
        kind,
        language,
    })
}

/// Reconstruct a member's declared signature from its definition fields
///
/// Prefers `<definition>` + `<argsstring>` (Doxygen's fully qualified form);
/// falls back to `<type> name` for members that carry only a type.
fn member_signature(member: Node<'_, '_>, name: &str) -> Option<String> {
    let args = child_text(member, "argsstring").unwrap_or_default();

    if let Some(definition) = child_text(member, "definition") {
        return Some(format!("{definition}{args}"));
    }

    child_text(member, "type").map(|ty| format!("{ty} {name}{args}"))
}

/// Read the `<location>` child, normalizing placeholder line values to absent
///
/// Doxygen reports "not set" lines as `0` or `-1` depending on version; any
/// value below 1 normalizes to `None`. When a reported end line precedes the
/// start line, the end is discarded so the range invariant holds.
fn parse_location(node: Node<'_, '_>, name: &str) -> Option<CodeLocation> {
    let location = child(node, "location")?;
    let file = location.attribute("file")?.to_string();

    let start_line = line_attribute(location, "line");
    let mut end_line = line_attribute(location, "bodyend");

    if let (Some(start), Some(end)) = (start_line, end_line) {
        if end < start {
            log::warn!("Discarding inverted line range {start}-{end} for '{name}' in {file}");
            end_line = None;
        }
    }

    Some(CodeLocation::new(file, start_line, end_line))
}

/// Reconstruct the `template <...>` clause from a `<templateparamlist>`
///
/// Doxygen may put the whole declaration in `<type>` (e.g. `typename T`) or
/// split it into `<type>typename</type>` and `<declname>T</declname>`; the
/// declared name is appended only when the type text does not already end
/// with it. An empty parameter list yields `None`, never an empty clause.
fn template_signature(node: Node<'_, '_>) -> Option<String> {
    let list = child(node, "templateparamlist")?;

    let mut params = Vec::new();
    for param in list.children().filter(|n| n.has_tag_name("param")) {
        let Some(ty) = child_text(param, "type") else {
            continue;
        };
        let declname = child_text(param, "declname");

        let rendered = match declname {
            Some(ref decl) if !ty.trim_end().ends_with(decl.as_str()) => format!("{ty} {decl}"),
            _ => ty,
        };
        params.push(rendered.trim().to_string());
    }

    if params.is_empty() {
        return None;
    }
    Some(format!("template <{}>", params.join(", ")))
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

/// Flatten a node's nested markup into one whitespace-normalized string
///
/// Paragraphs, parameter lists, and cross-references collapse to their text
/// content joined by single spaces. Empty results normalize to `None`.
fn flatten_text(node: Node<'_, '_>) -> Option<String> {
    let text = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return None;
    }
    Some(text)
}

/// Flattened text of a direct child tag
fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag).and_then(flatten_text)
}

fn non_empty_attribute(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a 1-based line attribute, treating values below 1 as absent
fn line_attribute(node: Node<'_, '_>, name: &str) -> Option<u32> {
    node.attribute(name)
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .and_then(|v| u32::try_from(v).ok())
}

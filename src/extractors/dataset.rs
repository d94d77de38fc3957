//! Dataset list recovery for the `json_paths` assignment
//!
//! Two tiers behind one entry point:
//! - syntax tree: tree-sitter walk over every assignment, literal strings kept
//!   verbatim and anything computed replaced by [`DYNAMIC_PATH`]
//! - text fallback: a regex over the raw source, used only when the tree has
//!   syntax errors

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};
use tree_sitter::{Node, Parser};

/// Variable the inspected scripts assign their dataset manifests to
pub const DATASET_VARIABLE: &str = "json_paths";

/// Stand-in for an entry that only exists once the script runs
pub const DYNAMIC_PATH: &str = "Dynamic Path (calculated in code)";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to load Python grammar: {0}")]
    Language(String),
    #[error("Parser produced no tree")]
    NoTree,
    #[error("Syntax error near line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

/// Which tier produced the dataset list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStrategy {
    SyntaxTree,
    TextFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub paths: Vec<String>,
    pub strategy: ExtractionStrategy,
}

/// Recovers the dataset list, falling back to text scanning on syntax errors
pub fn extract_dataset_paths(content: &str) -> DatasetPaths {
    match extract_from_syntax_tree(content) {
        Ok(paths) => {
            debug!(count = paths.len(), "Dataset paths extracted from syntax tree");
            DatasetPaths {
                paths,
                strategy: ExtractionStrategy::SyntaxTree,
            }
        }
        Err(e) => {
            warn!(error = %e, "Script did not parse cleanly, scanning {} textually", DATASET_VARIABLE);
            let paths = extract_from_text(content);
            debug!(count = paths.len(), "Dataset paths extracted by text fallback");
            DatasetPaths {
                paths,
                strategy: ExtractionStrategy::TextFallback,
            }
        }
    }
}

fn extract_from_syntax_tree(content: &str) -> Result<Vec<String>, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ParseError::Language(e.to_string()))?;

    let tree = parser.parse(content, None).ok_or(ParseError::NoTree)?;
    let root = tree.root_node();
    if root.has_error() {
        let position = first_error(root)
            .map(|n| n.start_position())
            .unwrap_or_else(|| root.start_position());
        return Err(ParseError::Syntax {
            line: position.row + 1,
            column: position.column + 1,
        });
    }

    let source = content.as_bytes();
    let mut paths = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.kind() == "assignment" && assigns_dataset_variable(node, source) {
            if let Some(list) = assigned_value(node).filter(|v| v.kind() == "list") {
                collect_list_items(list, source, &mut paths);
            }
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    Ok(paths)
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

fn assigns_dataset_variable(node: Node, source: &[u8]) -> bool {
    node.child_by_field_name("left")
        .filter(|left| left.kind() == "identifier")
        .and_then(|left| left.utf8_text(source).ok())
        .map(|name| name == DATASET_VARIABLE)
        .unwrap_or(false)
}

/// Final right-hand side, following chained assignments like `a = b = [...]`
fn assigned_value(node: Node) -> Option<Node> {
    let mut value = node.child_by_field_name("right")?;
    while value.kind() == "assignment" {
        value = value.child_by_field_name("right")?;
    }
    Some(value)
}

fn collect_list_items(list: Node, source: &[u8], paths: &mut Vec<String>) {
    let mut cursor = list.walk();
    for item in list.named_children(&mut cursor) {
        if item.kind() == "comment" {
            continue;
        }
        match string_literal_value(item, source) {
            Some(value) => paths.push(value),
            None => paths.push(DYNAMIC_PATH.to_string()),
        }
    }
}

/// Value of a plain string literal; `None` for f-strings, bytes and non-strings
fn string_literal_value(node: Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => single_string_value(node, source),
        "concatenated_string" => {
            let mut cursor = node.walk();
            let parts: Option<Vec<String>> = node
                .named_children(&mut cursor)
                .filter(|part| part.kind() != "comment")
                .map(|part| single_string_value(part, source))
                .collect();
            parts.map(|p| p.concat())
        }
        "parenthesized_expression" => {
            let inner = node.named_child(0)?;
            string_literal_value(inner, source)
        }
        _ => None,
    }
}

fn single_string_value(node: Node, source: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }

    let mut start = None;
    let mut end = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "interpolation" => return None,
            "string_start" => start = Some(child),
            "string_end" => end = Some(child),
            _ => {}
        }
    }
    let (start, end) = (start?, end?);

    let opener = start.utf8_text(source).ok()?;
    let prefix = opener.trim_end_matches(['\'', '"']).to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') {
        return None;
    }

    let raw = std::str::from_utf8(source.get(start.end_byte()..end.start_byte())?).ok()?;
    if prefix.contains('r') {
        Some(raw.to_string())
    } else {
        Some(unescape(raw))
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn list_block_regex() -> &'static Regex {
    static LIST_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    LIST_BLOCK_REGEX.get_or_init(|| {
        Regex::new(&format!(r"(?s){}\s*=\s*\[(.*?)\]", DATASET_VARIABLE)).expect("valid regex")
    })
}

/// Line-oriented scan of the first `json_paths = [...]` span.
///
/// Only `'`, `,` and spaces are stripped from each line, so double-quoted
/// entries keep their quotes and paths ending in those characters are clipped.
fn extract_from_text(content: &str) -> Vec<String> {
    let Some(block) = list_block_regex().captures(content).and_then(|c| c.get(1)) else {
        return Vec::new();
    };

    block
        .as_str()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_matches(|c| matches!(c, '\'' | ',' | ' ')))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

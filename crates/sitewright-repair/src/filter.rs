//! Commentary filter: strips non-code prose from raw generation output
//!
//! Applied as an ordered list of pattern rules:
//! 1. markdown fence lines are removed
//! 2. conversational sentences are removed; a sentence sharing a line with
//!    code is cut at the code boundary rather than dropping the line
//! 3. the text is re-anchored to begin at the first line matching a valid
//!    leading-token pattern
//!
//! The filter is best effort: text without any recognizable anchor passes
//! through the re-anchor rule unmodified.

use regex::Regex;
use sitewright_validation::is_conversational_line;
use std::sync::OnceLock;

/// Tokens a source file may legitimately begin with.
const ANCHOR_TOKENS: &[&str] = &[
    "import ",
    "'use client'",
    "\"use client\"",
    "export ",
    "function ",
    "const ",
];

fn embedded_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(import\s|export\s|function\s|const\s|'use client')"#)
            .expect("embedded code pattern is valid")
    })
}

/// The ordered pattern rules. Order matters: commentary removal may expose
/// the anchor line the final rule cuts to.
const FILTER_RULES: &[(&str, fn(&str) -> String)] = &[
    ("strip_fences", strip_fences),
    ("strip_commentary", strip_commentary),
    ("reanchor", reanchor),
];

/// Strips conversational text and fence markers from raw generation output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentaryFilter;

impl CommentaryFilter {
    pub fn new() -> Self {
        Self
    }

    /// Run the ordered rule list over the raw text.
    pub fn filter(&self, text: &str) -> String {
        FILTER_RULES
            .iter()
            .fold(text.to_string(), |acc, (name, rule)| {
                let out = rule(&acc);
                if out != acc {
                    tracing::debug!("filter rule {} modified text", name);
                }
                out
            })
    }
}

fn strip_fences(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect();
    rejoin(text, lines)
}

fn strip_commentary(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .filter_map(|line| {
            if !is_conversational_line(line) {
                return Some(line);
            }
            // Commentary sharing a line with code is cut at the code boundary
            embedded_code_re()
                .find(line)
                .map(|m| &line[m.start()..])
        })
        .collect();
    rejoin(text, lines)
}

fn reanchor(text: &str) -> String {
    let anchor = text.lines().position(|line| {
        let trimmed = line.trim_start();
        ANCHOR_TOKENS.iter().any(|token| trimmed.starts_with(token))
    });

    match anchor {
        Some(0) | None => text.to_string(),
        Some(index) => {
            let lines: Vec<&str> = text.lines().skip(index).collect();
            rejoin(text, lines)
        }
    }
}

fn rejoin(original: &str, lines: Vec<&str>) -> String {
    let mut joined = lines.join("\n");
    if original.ends_with('\n') && !joined.is_empty() {
        joined.push('\n');
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_fence_markers() {
        let raw = "```jsx\nimport React from 'react';\nfunction Hero() {}\n```\n";
        let filtered = CommentaryFilter::new().filter(raw);
        assert!(!filtered.contains("```"));
        assert!(filtered.contains("import React"));
    }

    #[test]
    fn test_strips_leading_commentary_lines() {
        let raw = "Here's the component you asked for:\n\nimport React from 'react';\nfunction Hero() {}\n";
        let filtered = CommentaryFilter::new().filter(raw);
        assert!(!filtered.contains("Here's"));
        assert!(filtered.starts_with("import React"));
    }

    #[test]
    fn test_commentary_sharing_a_line_with_code_is_cut_not_dropped() {
        let raw = "I notice that this works. import React from 'react';\nfunction Hero() {}\n";
        let filtered = CommentaryFilter::new().filter(raw);
        assert!(!filtered.contains("I notice"));
        assert!(filtered.contains("import React from 'react';"));
    }

    #[test]
    fn test_reanchors_past_non_code_preamble() {
        let raw = "Component for the hero section\n\nimport React from 'react';\n";
        let filtered = CommentaryFilter::new().filter(raw);
        assert!(filtered.starts_with("import React"));
    }

    #[test]
    fn test_no_anchor_leaves_text_unmodified() {
        let raw = "just some plain prose\nwith no code at all\n";
        let filtered = CommentaryFilter::new().filter(raw);
        assert_eq!(filtered, raw);
    }

    #[test]
    fn test_clean_code_passes_through() {
        let raw = "import React from 'react';\n\nfunction Hero() {\n  return <div />;\n}\n";
        assert_eq!(CommentaryFilter::new().filter(raw), raw);
    }

    #[test]
    fn test_trailing_commentary_removed() {
        let raw = "import React from 'react';\nfunction Hero() {}\n\nThis component uses a bold layout.\n";
        let filtered = CommentaryFilter::new().filter(raw);
        assert!(!filtered.contains("bold layout"));
    }
}

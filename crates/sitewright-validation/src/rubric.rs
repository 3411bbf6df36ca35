//! Declarative check table shared by the completeness and quality passes
//!
//! Each check is a `{name, predicate, weight}` tuple over an [`ArtifactView`].
//! The structural validator folds the table into a weighted completeness
//! verdict; individual predicates are also reachable for targeted use (the
//! repair engine consults landmark predicates to stay non-destructive).

use sitewright_core::ComponentKind;

/// An artifact's text paired with the kind it claims to implement.
///
/// Landmark predicates need the kind to know which identifier the source must
/// declare and default-export.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactView<'a> {
    pub text: &'a str,
    pub kind: ComponentKind,
}

impl<'a> ArtifactView<'a> {
    pub fn new(text: &'a str, kind: ComponentKind) -> Self {
        Self { text, kind }
    }
}

/// One weighted structural check
pub struct CheckSpec {
    pub name: &'static str,
    pub weight: f32,
    pub predicate: fn(&ArtifactView<'_>) -> bool,
}

/// The full weighted check set: five structural landmarks plus balanced-markup
/// and non-truncation hygiene. Weights sum to 100.
pub const STRUCTURAL_CHECKS: &[CheckSpec] = &[
    CheckSpec {
        name: "import_header",
        weight: 15.0,
        predicate: has_import_header,
    },
    CheckSpec {
        name: "component_declaration",
        weight: 20.0,
        predicate: has_component_declaration,
    },
    CheckSpec {
        name: "render_block",
        weight: 20.0,
        predicate: has_render_block,
    },
    CheckSpec {
        name: "metadata_export",
        weight: 15.0,
        predicate: has_metadata_export,
    },
    CheckSpec {
        name: "default_export",
        weight: 15.0,
        predicate: has_default_export,
    },
    CheckSpec {
        name: "balanced_markup",
        weight: 10.0,
        predicate: has_balanced_markup,
    },
    CheckSpec {
        name: "not_truncated",
        weight: 5.0,
        predicate: is_not_truncated,
    },
];

/// Landmark (1): the artifact opens with an import statement or an
/// interactivity directive.
pub fn has_import_header(view: &ArtifactView<'_>) -> bool {
    match view.text.lines().find(|line| !line.trim().is_empty()) {
        Some(first) => {
            let first = first.trim_start();
            first.starts_with("import ")
                || first.starts_with("'use client'")
                || first.starts_with("\"use client\"")
        }
        None => false,
    }
}

/// Landmark (2): a component declaration whose identifier matches the kind.
pub fn has_component_declaration(view: &ArtifactView<'_>) -> bool {
    let ident = view.kind.identifier();
    view.text.contains(&format!("function {}", ident))
        || view.text.contains(&format!("const {} =", ident))
}

/// Landmark (3): a render/return block.
pub fn has_render_block(view: &ArtifactView<'_>) -> bool {
    view.text.contains("return (") || view.text.contains("return <")
}

/// Landmark (4): a metadata descriptor export carrying all five fields.
pub fn has_metadata_export(view: &ArtifactView<'_>) -> bool {
    view.text.contains("export const metadata")
        && ["type:", "name:", "description:", "category:", "icon:"]
            .iter()
            .all(|field| view.text.contains(field))
}

/// Landmark (5): a default export referencing the declared identifier.
pub fn has_default_export(view: &ArtifactView<'_>) -> bool {
    let ident = view.kind.identifier();
    view.text.contains(&format!("export default {}", ident))
        || view.text.contains(&format!("export default function {}", ident))
}

/// Structural delimiters pair up. JSX well-formedness beyond brace/paren
/// parity is the hosting registry's concern.
pub fn has_balanced_markup(view: &ArtifactView<'_>) -> bool {
    let opens = view.text.matches('{').count();
    let closes = view.text.matches('}').count();
    let paren_opens = view.text.matches('(').count();
    let paren_closes = view.text.matches(')').count();
    opens == closes && paren_opens == paren_closes
}

/// The text does not end mid-statement.
pub fn is_not_truncated(view: &ArtifactView<'_>) -> bool {
    let trimmed = view.text.trim_end();
    if trimmed.ends_with("...") || trimmed.ends_with(',') {
        return false;
    }
    matches!(
        trimmed.chars().last(),
        Some(';') | Some('}') | Some(')') | Some('>')
    )
}

/// Conversational openers the generation service tends to wrap code in.
const CONVERSATIONAL_OPENERS: &[&str] = &[
    "i notice",
    "i've",
    "i have",
    "i'll",
    "i will",
    "here's",
    "here is",
    "sure,",
    "sure!",
    "certainly",
    "let me",
    "this component",
    "this code",
    "note:",
    "of course",
    "below is",
    "as requested",
];

/// Whether a line reads as model commentary rather than source code.
pub fn is_conversational_line(line: &str) -> bool {
    let lowered = line.trim().to_lowercase();
    CONVERSATIONAL_OPENERS
        .iter()
        .any(|opener| lowered.starts_with(opener))
}

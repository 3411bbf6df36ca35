//! Icon reference validation
//!
//! Rewrites an artifact's icon-import list against the configured catalog:
//! allow-listed identifiers are kept, brand names with a synonym are
//! substituted throughout the artifact, and unknown identifiers are dropped
//! from the import. Pure and idempotent; no external calls.

use regex::Regex;
use sitewright_core::IconCatalog;
use std::sync::OnceLock;

fn icon_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^import\s*\{([^}]*)\}\s*from\s*['"]lucide-react['"];?\s*$"#)
            .expect("icon import pattern is valid")
    })
}

/// Deterministic allow-list/substitution pass over icon references.
pub struct IconReferenceValidator {
    catalog: IconCatalog,
}

impl IconReferenceValidator {
    pub fn new(catalog: IconCatalog) -> Self {
        Self { catalog }
    }

    /// Validate every icon reference in the artifact's import list.
    ///
    /// Returns the rewritten artifact. Re-applying to already-validated text
    /// is a no-op.
    pub fn validate(&self, text: &str) -> String {
        let mut substitutions: Vec<(String, String)> = Vec::new();

        let rewritten = icon_import_re().replace_all(text, |caps: &regex::Captures<'_>| {
            let mut kept: Vec<String> = Vec::new();

            for raw in caps[1].split(',') {
                let icon = raw.trim();
                if icon.is_empty() {
                    continue;
                }

                if self.catalog.is_allowed(icon) {
                    if !kept.iter().any(|k| k == icon) {
                        kept.push(icon.to_string());
                    }
                } else if let Some(substitute) = self.catalog.substitute(icon) {
                    tracing::debug!("Substituting icon {} -> {}", icon, substitute);
                    substitutions.push((icon.to_string(), substitute.to_string()));
                    if !kept.iter().any(|k| k == substitute) {
                        kept.push(substitute.to_string());
                    }
                } else {
                    tracing::debug!("Dropping unknown icon {}", icon);
                }
            }

            if kept.is_empty() {
                String::new()
            } else {
                format!("import {{ {} }} from 'lucide-react';", kept.join(", "))
            }
        });

        // Substituted brand names are replaced wherever the body references them
        let mut result = rewritten.into_owned();
        for (from, to) in substitutions {
            let usage_re = Regex::new(&format!(r"\b{}\b", regex::escape(&from)))
                .expect("icon identifier pattern is valid");
            result = usage_re.replace_all(&result, to.as_str()).into_owned();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> IconReferenceValidator {
        IconReferenceValidator::new(IconCatalog::default())
    }

    #[test]
    fn test_allowed_icons_kept() {
        let text = "import { Menu, X, Search } from 'lucide-react';\nfunction Header() {}";
        let result = validator().validate(text);
        assert!(result.contains("Menu"));
        assert!(result.contains("Search"));
    }

    #[test]
    fn test_brand_icon_substituted_throughout() {
        let text = "import { Spotify, Mail } from 'lucide-react';\n\
                    <a href=\"#\"><Spotify size={20} /></a>\n";
        let result = validator().validate(text);
        assert!(result.contains("Music"));
        assert!(!result.contains("Spotify"));
        assert!(result.contains("<Music size={20} />"));
    }

    #[test]
    fn test_unknown_icon_dropped() {
        let text = "import { FooBarIcon, Mail } from 'lucide-react';\n";
        let result = validator().validate(text);
        assert!(!result.contains("FooBarIcon"));
        assert!(result.contains("Mail"));
    }

    #[test]
    fn test_all_unknown_drops_import_line() {
        let text = "import { FooBarIcon } from 'lucide-react';\nfunction Footer() {}";
        let result = validator().validate(text);
        assert!(!result.contains("lucide-react"));
        assert!(result.contains("function Footer"));
    }

    #[test]
    fn test_substitution_does_not_duplicate_existing_import() {
        let text = "import { Music, Spotify } from 'lucide-react';\n";
        let result = validator().validate(text);
        assert_eq!(result.matches("Music").count(), 1);
    }

    #[test]
    fn test_idempotent() {
        let text = "import { Spotify, FooBarIcon, Menu } from 'lucide-react';\n\
                    <Spotify />\n";
        let once = validator().validate(text);
        let twice = validator().validate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_icon_import_is_a_noop() {
        let text = "import React from 'react';\nfunction Header() {}";
        assert_eq!(validator().validate(text), text);
    }
}

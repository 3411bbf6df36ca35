//! Repair engine: the rule table composed into one pass

use sitewright_core::{ComponentKind, IconCatalog, RepairConfig};

use crate::rules::{RepairContext, REPAIR_RULES};

/// Applies the full repair rule table, in fixed order, to an artifact.
///
/// The composition is idempotent: repairing already-repaired text returns it
/// unchanged. A rule finding nothing to change is a silent no-op, never an
/// error.
pub struct RepairEngine {
    catalog: IconCatalog,
    config: RepairConfig,
}

impl RepairEngine {
    pub fn new(catalog: IconCatalog, config: RepairConfig) -> Self {
        Self { catalog, config }
    }

    /// Run every repair rule over the artifact, in table order.
    pub fn repair(&self, kind: ComponentKind, text: &str) -> String {
        let ctx = RepairContext {
            kind,
            catalog: &self.catalog,
            min_content_len: self.config.min_content_len,
        };

        REPAIR_RULES.iter().fold(text.to_string(), |acc, rule| {
            let out = (rule.apply)(&ctx, &acc);
            if out != acc {
                tracing::debug!("repair rule {} modified {} artifact", rule.name, kind);
            }
            out
        })
    }
}

impl Default for RepairEngine {
    fn default() -> Self {
        Self::new(IconCatalog::default(), RepairConfig::default())
    }
}

//! Predefined fallback design strategy
//!
//! Returned whenever strategy planning cannot recover a usable JSON object
//! from the generation service. Covers every component kind so a degraded run
//! can still generate a full site.

use sitewright_core::{ComponentKind, ComponentPlan, DesignMethod, DesignStrategy, Priority};

/// The fixed fallback strategy.
pub fn fallback_strategy() -> DesignStrategy {
    let mut strategy = DesignStrategy {
        approach: "clean conversion-focused layout".to_string(),
        style_direction: "modern, generous whitespace, strong typographic hierarchy".to_string(),
        color_story: "neutral surfaces with a single saturated accent".to_string(),
        design_system: "theme tokens with utility classes".to_string(),
        ..Default::default()
    };

    let plans = [
        (
            ComponentKind::Header,
            Priority::Critical,
            "Sticky navigation with logo, primary links and a call-to-action button",
            vec!["responsive mobile menu", "skip-to-content link"],
        ),
        (
            ComponentKind::Hero,
            Priority::Critical,
            "One bold value proposition above the fold with a primary action",
            vec!["headline and supporting copy", "primary and secondary buttons"],
        ),
        (
            ComponentKind::Footer,
            Priority::High,
            "Compact footer with navigation columns and social links",
            vec!["social icon row", "copyright line"],
        ),
        (
            ComponentKind::Features,
            Priority::High,
            "Three-up grid of product capabilities with icons",
            vec!["icon per feature", "short benefit copy"],
        ),
        (
            ComponentKind::Pricing,
            Priority::Medium,
            "Tiered pricing cards with a highlighted recommended plan",
            vec!["feature checklists", "plan CTA buttons"],
        ),
        (
            ComponentKind::Testimonials,
            Priority::Medium,
            "Customer quotes with names and roles",
            vec!["quote cards", "attribution line"],
        ),
        (
            ComponentKind::Cta,
            Priority::Medium,
            "Full-width closing call to action",
            vec!["single focused action"],
        ),
        (
            ComponentKind::Blog,
            Priority::Low,
            "Recent posts grid with dates and excerpts",
            vec!["post cards", "read-more links"],
        ),
    ];

    for (kind, priority, intent, requirements) in plans {
        strategy.component_plans.insert(
            kind,
            ComponentPlan {
                priority,
                method: DesignMethod::Hybrid,
                template_choice: None,
                customization_level: "moderate".to_string(),
                creativity_focus: "clarity over novelty".to_string(),
                design_intent: intent.to_string(),
                technical_requirements: requirements.into_iter().map(String::from).collect(),
                reason: "fallback strategy default".to_string(),
            },
        );
    }

    strategy
}

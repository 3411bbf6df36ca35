//! Core type definitions for Sitewright generation runs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed set of website component kinds Sitewright can generate.
///
/// `ALL` is the canonical generation order; the orchestration driver never
/// processes kinds in any other sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Header,
    Footer,
    Hero,
    Features,
    Pricing,
    Testimonials,
    Cta,
    Blog,
}

impl ComponentKind {
    /// Canonical generation order for a full-site run.
    pub const ALL: [ComponentKind; 8] = [
        ComponentKind::Header,
        ComponentKind::Footer,
        ComponentKind::Hero,
        ComponentKind::Features,
        ComponentKind::Pricing,
        ComponentKind::Testimonials,
        ComponentKind::Cta,
        ComponentKind::Blog,
    ];

    /// The source identifier an artifact must declare and default-export.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::Footer => "Footer",
            Self::Hero => "Hero",
            Self::Features => "Features",
            Self::Pricing => "Pricing",
            Self::Testimonials => "Testimonials",
            Self::Cta => "Cta",
            Self::Blog => "Blog",
        }
    }

    /// The metadata category this kind belongs to.
    ///
    /// Values are drawn from [`ComponentKind::ALLOWED_CATEGORIES`]; the repair
    /// pass normalizes any other category value back to this one.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Header | Self::Footer => "layout",
            Self::Hero | Self::Features | Self::Pricing | Self::Testimonials | Self::Cta => {
                "marketing"
            }
            Self::Blog => "content",
        }
    }

    /// The closed set of metadata category values.
    pub const ALLOWED_CATEGORIES: [&'static str; 3] = ["layout", "marketing", "content"];
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Footer => write!(f, "footer"),
            Self::Hero => write!(f, "hero"),
            Self::Features => write!(f, "features"),
            Self::Pricing => write!(f, "pricing"),
            Self::Testimonials => write!(f, "testimonials"),
            Self::Cta => write!(f, "cta"),
            Self::Blog => write!(f, "blog"),
        }
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "footer" => Ok(Self::Footer),
            "hero" => Ok(Self::Hero),
            "features" => Ok(Self::Features),
            "pricing" => Ok(Self::Pricing),
            "testimonials" => Ok(Self::Testimonials),
            "cta" => Ok(Self::Cta),
            "blog" => Ok(Self::Blog),
            _ => Err(format!("Invalid component kind: {}", s)),
        }
    }
}

/// Priority a component plan assigns to its kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical = 0,
    High = 1,
    #[default]
    Medium = 2,
    Low = 3,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" | "0" => Ok(Self::Critical),
            "high" | "1" => Ok(Self::High),
            "medium" | "2" => Ok(Self::Medium),
            "low" | "3" => Ok(Self::Low),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

/// How a component should be produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignMethod {
    /// Start from a known template shape
    Template,
    /// Template skeleton with custom styling
    #[default]
    Hybrid,
    /// Fully custom generation
    Custom,
}

impl std::fmt::Display for DesignMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template => write!(f, "template"),
            Self::Hybrid => write!(f, "hybrid"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for DesignMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "hybrid" => Ok(Self::Hybrid),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Invalid design method: {}", s)),
        }
    }
}

/// Orchestration mode for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationMode {
    /// Generate the full component set from scratch
    #[default]
    FullSite,
    /// Regenerate components against an existing artifact set
    Refresh,
}

impl std::fmt::Display for OrchestrationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullSite => write!(f, "full_site"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

impl std::str::FromStr for OrchestrationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full_site" | "full-site" | "full" => Ok(Self::FullSite),
            "refresh" => Ok(Self::Refresh),
            _ => Err(format!("Invalid orchestration mode: {}", s)),
        }
    }
}

/// Per-component generation plan within a [`DesignStrategy`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentPlan {
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub method: DesignMethod,
    #[serde(default)]
    pub template_choice: Option<String>,
    #[serde(default)]
    pub customization_level: String,
    #[serde(default)]
    pub creativity_focus: String,
    #[serde(default)]
    pub design_intent: String,
    #[serde(default)]
    pub technical_requirements: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

/// Site-wide design strategy produced once per orchestration run.
///
/// Immutable after planning; every attempt for every component kind reads the
/// same strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignStrategy {
    #[serde(default)]
    pub approach: String,
    #[serde(default)]
    pub style_direction: String,
    #[serde(default)]
    pub color_story: String,
    #[serde(default)]
    pub design_system: String,
    #[serde(default)]
    pub component_plans: HashMap<ComponentKind, ComponentPlan>,
}

impl DesignStrategy {
    /// Look up the plan for a component kind.
    pub fn plan_for(&self, kind: ComponentKind) -> Option<&ComponentPlan> {
        self.component_plans.get(&kind)
    }
}

/// Context about the site being generated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteContext {
    pub name: String,
    pub industry: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
}

impl SiteContext {
    pub fn new(name: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
            description: None,
            audience: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

/// Everything one generation attempt needs, created fresh per attempt.
///
/// `prior_artifact` carries the previous attempt's rejected text so the next
/// generation can be biased toward improvement.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    pub kind: ComponentKind,
    pub strategy: &'a DesignStrategy,
    pub site: &'a SiteContext,
    pub attempt: u32,
    pub prior_artifact: Option<&'a str>,
}

/// Terminal result for one component kind within a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentOutcome {
    pub kind: ComponentKind,
    pub accepted: bool,
    pub attempts_used: u32,
    pub final_score: f32,
    /// The persisted artifact text; `None` when the component exhausted all
    /// attempts without producing any output.
    pub artifact: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_roundtrip() {
        for kind in ComponentKind::ALL {
            let parsed: ComponentKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_component_kind_order_is_fixed() {
        assert_eq!(ComponentKind::ALL[0], ComponentKind::Header);
        assert_eq!(ComponentKind::ALL[1], ComponentKind::Footer);
        assert_eq!(ComponentKind::ALL[7], ComponentKind::Blog);
    }

    #[test]
    fn test_categories_are_allowed() {
        for kind in ComponentKind::ALL {
            assert!(ComponentKind::ALLOWED_CATEGORIES.contains(&kind.category()));
        }
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical < Priority::High);
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn test_strategy_plan_lookup() {
        let mut strategy = DesignStrategy::default();
        strategy.component_plans.insert(
            ComponentKind::Hero,
            ComponentPlan {
                design_intent: "Bold opening statement".to_string(),
                ..Default::default()
            },
        );

        assert!(strategy.plan_for(ComponentKind::Hero).is_some());
        assert!(strategy.plan_for(ComponentKind::Footer).is_none());
    }

    #[test]
    fn test_site_context_builder() {
        let site = SiteContext::new("Acme", "software")
            .with_description("Developer tools")
            .with_audience("engineers");

        assert_eq!(site.name, "Acme");
        assert_eq!(site.description.as_deref(), Some("Developer tools"));
        assert_eq!(site.audience.as_deref(), Some("engineers"));
    }

    #[test]
    fn test_plan_deserializes_with_missing_fields() {
        let plan: ComponentPlan = serde_json::from_str(r#"{"priority": "high"}"#).unwrap();
        assert_eq!(plan.priority, Priority::High);
        assert_eq!(plan.method, DesignMethod::Hybrid);
        assert!(plan.technical_requirements.is_empty());
    }
}

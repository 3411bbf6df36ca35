//! Icon catalog configuration
//!
//! The catalog is explicit configuration handed to the icon validator and the
//! prompt builder. The allow-list enumerates every icon identifier the hosting
//! registry can resolve; the synonym table maps brand and proprietary names to
//! generic equivalents; the recommendation map is used only when constructing
//! generation prompts, never for enforcement.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ComponentKind;

/// Icon allow-list, synonym table and per-kind recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconCatalog {
    /// Master allow-list of resolvable icon identifiers
    #[serde(default = "default_allowed")]
    pub allowed: Vec<String>,

    /// Brand/proprietary name → generic equivalent
    #[serde(default = "default_synonyms")]
    pub synonyms: HashMap<String, String>,

    /// Recommended subset per component kind, for prompt construction only
    #[serde(default = "default_recommended")]
    pub recommended: HashMap<ComponentKind, Vec<String>>,
}

impl IconCatalog {
    /// Whether an icon identifier is resolvable as-is.
    pub fn is_allowed(&self, icon: &str) -> bool {
        self.allowed.iter().any(|a| a == icon)
    }

    /// Generic substitute for a brand/proprietary identifier, if one exists.
    pub fn substitute(&self, icon: &str) -> Option<&str> {
        self.synonyms.get(icon).map(String::as_str)
    }

    /// Recommended icons for a component kind (prompt construction only).
    pub fn recommended_for(&self, kind: ComponentKind) -> &[String] {
        self.recommended
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for IconCatalog {
    fn default() -> Self {
        Self {
            allowed: default_allowed(),
            synonyms: default_synonyms(),
            recommended: default_recommended(),
        }
    }
}

fn default_allowed() -> Vec<String> {
    [
        "ArrowRight",
        "ArrowUpRight",
        "Award",
        "BarChart",
        "Calendar",
        "Camera",
        "Check",
        "CheckCircle",
        "ChevronDown",
        "ChevronRight",
        "Clock",
        "CreditCard",
        "Facebook",
        "Github",
        "Globe",
        "Heart",
        "Home",
        "Image",
        "Instagram",
        "Layers",
        "Linkedin",
        "Mail",
        "MapPin",
        "Menu",
        "MessageCircle",
        "MessageSquare",
        "Music",
        "Phone",
        "Play",
        "Quote",
        "Search",
        "Send",
        "Settings",
        "Shield",
        "ShoppingCart",
        "Sparkles",
        "Star",
        "Twitter",
        "User",
        "Users",
        "Video",
        "X",
        "Youtube",
        "Zap",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_synonyms() -> HashMap<String, String> {
    [
        ("Spotify", "Music"),
        ("SoundCloud", "Music"),
        ("WhatsApp", "MessageCircle"),
        ("Telegram", "Send"),
        ("Discord", "MessageSquare"),
        ("Slack", "MessageSquare"),
        ("TikTok", "Video"),
        ("Vimeo", "Video"),
        ("Twitch", "Play"),
        ("Pinterest", "Image"),
        ("Snapchat", "Camera"),
        ("Dribbble", "Image"),
        ("Behance", "Image"),
        ("Medium", "Quote"),
        ("Reddit", "MessageCircle"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_recommended() -> HashMap<ComponentKind, Vec<String>> {
    let rec = |icons: &[&str]| icons.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    [
        (ComponentKind::Header, rec(&["Menu", "X", "Search", "User"])),
        (
            ComponentKind::Footer,
            rec(&["Twitter", "Facebook", "Instagram", "Linkedin", "Youtube", "Mail"]),
        ),
        (
            ComponentKind::Hero,
            rec(&["ArrowRight", "Play", "Sparkles", "Star"]),
        ),
        (
            ComponentKind::Features,
            rec(&["Zap", "Shield", "Layers", "Globe", "CheckCircle"]),
        ),
        (
            ComponentKind::Pricing,
            rec(&["Check", "X", "CreditCard", "Star"]),
        ),
        (
            ComponentKind::Testimonials,
            rec(&["Quote", "Star", "User", "Users"]),
        ),
        (
            ComponentKind::Cta,
            rec(&["ArrowRight", "ArrowUpRight", "Send", "Zap"]),
        ),
        (
            ComponentKind::Blog,
            rec(&["Calendar", "Clock", "User", "ChevronRight"]),
        ),
    ]
    .into_iter()
    .collect()
}

//! Prompt builder for artifact generation
//!
//! Constructs prompts that give the generation service:
//! - The component kind and its declared identifier
//! - Site context and the run-wide design strategy
//! - The per-component plan (intent, method, technical requirements)
//! - The recommended icon subset for the kind
//! - The prior rejected artifact as improvement context on retries

use sitewright_core::{ComponentPlan, GenerationContext, IconCatalog};

/// System prompt fixing the output contract for every artifact call.
pub fn build_system_prompt() -> String {
    "You are an expert frontend engineer generating production React components.\n\
     Respond with exactly one complete component source file and nothing else:\n\
     no explanations, no markdown fences, no commentary before or after the code.\n\
     Every file must contain: import statements, a function component declaration,\n\
     a return block with JSX, an `export const metadata` object with fields\n\
     type, name, description, category and icon, and a default export of the\n\
     component. Style with CSS custom properties (var(--token)) and responsive\n\
     utility classes, and include accessible markup."
        .to_string()
}

/// Build the user prompt for one generation attempt.
///
/// On attempt 1 this describes the component from scratch; on later attempts
/// the prior rejected artifact is appended so the service is biased toward
/// improving it rather than starting over.
pub fn build_artifact_prompt(ctx: &GenerationContext<'_>, catalog: &IconCatalog) -> String {
    let mut prompt = String::new();

    // Component section
    prompt.push_str("## COMPONENT\n\n");
    prompt.push_str(&format!(
        "Generate the `{}` component (kind: {}) for the site below.\n",
        ctx.kind.identifier(),
        ctx.kind
    ));
    prompt.push_str(&format!(
        "The component function and its default export must both be named `{}`.\n\n",
        ctx.kind.identifier()
    ));

    // Site section
    prompt.push_str("## SITE\n\n");
    prompt.push_str(&format!("**Name:** {}\n", ctx.site.name));
    prompt.push_str(&format!("**Industry:** {}\n", ctx.site.industry));
    if let Some(description) = &ctx.site.description {
        prompt.push_str(&format!("**Description:** {}\n", description));
    }
    if let Some(audience) = &ctx.site.audience {
        prompt.push_str(&format!("**Audience:** {}\n", audience));
    }
    prompt.push('\n');

    // Strategy section
    prompt.push_str("## DESIGN STRATEGY\n\n");
    if !ctx.strategy.approach.is_empty() {
        prompt.push_str(&format!("**Approach:** {}\n", ctx.strategy.approach));
    }
    if !ctx.strategy.style_direction.is_empty() {
        prompt.push_str(&format!("**Style:** {}\n", ctx.strategy.style_direction));
    }
    if !ctx.strategy.color_story.is_empty() {
        prompt.push_str(&format!("**Color story:** {}\n", ctx.strategy.color_story));
    }
    if !ctx.strategy.design_system.is_empty() {
        prompt.push_str(&format!("**Design system:** {}\n", ctx.strategy.design_system));
    }
    prompt.push('\n');

    // Plan section
    if let Some(plan) = ctx.strategy.plan_for(ctx.kind) {
        push_plan(&mut prompt, plan);
    }

    // Icon section (recommendation only, enforcement happens in repair)
    let icons = catalog.recommended_for(ctx.kind);
    if !icons.is_empty() {
        prompt.push_str("## ICONS\n\n");
        prompt.push_str(&format!(
            "Import icons from 'lucide-react', choosing from: {}\n\n",
            icons.join(", ")
        ));
    }

    // Improvement context on retries
    if ctx.attempt > 1 {
        if let Some(prior) = ctx.prior_artifact {
            prompt.push_str("## PREVIOUS ATTEMPT\n\n");
            prompt.push_str(&format!(
                "Attempt {} of this component was rejected by quality checks. \
                 Improve on it: keep what works, complete what is missing, and \
                 fix structural problems.\n\n",
                ctx.attempt - 1
            ));
            prompt.push_str("```\n");
            prompt.push_str(prior);
            prompt.push_str("\n```\n\n");
        }
    }

    // Output contract
    prompt.push_str("## OUTPUT\n\n");
    prompt.push_str("Return only the complete source file for this component.\n");

    prompt
}

fn push_plan(prompt: &mut String, plan: &ComponentPlan) {
    prompt.push_str("## PLAN\n\n");
    prompt.push_str(&format!("**Priority:** {}\n", plan.priority));
    prompt.push_str(&format!("**Method:** {}\n", plan.method));
    if let Some(template) = &plan.template_choice {
        prompt.push_str(&format!("**Template:** {}\n", template));
    }
    if !plan.customization_level.is_empty() {
        prompt.push_str(&format!("**Customization:** {}\n", plan.customization_level));
    }
    if !plan.creativity_focus.is_empty() {
        prompt.push_str(&format!("**Creativity focus:** {}\n", plan.creativity_focus));
    }
    if !plan.design_intent.is_empty() {
        prompt.push_str(&format!("**Intent:** {}\n", plan.design_intent));
    }
    if !plan.technical_requirements.is_empty() {
        prompt.push_str("\n**Technical requirements:**\n");
        for requirement in &plan.technical_requirements {
            prompt.push_str(&format!("- {}\n", requirement));
        }
    }
    prompt.push('\n');
}

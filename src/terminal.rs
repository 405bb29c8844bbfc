//! Terminal rendering
//!
//! Lays out chat turns for the REPL.

use colored::Colorize;

use crate::content::{RenderedBlock, Span};
use crate::conversation::{ChatMessage, Role};

/// Render one chat turn with a role/time header
pub fn render_message(message: &ChatMessage) -> String {
    let time = message.local_time();
    let header = match message.role() {
        Role::User => format!("you · {}", time).green().bold().to_string(),
        Role::Assistant => format!("assistant · {}", time).cyan().bold().to_string(),
    };
    format!("{}\n{}", header, render_block(&message.render()))
}

/// Render a classified reply body
pub fn render_block(block: &RenderedBlock) -> String {
    let mut out = Vec::new();

    match block {
        RenderedBlock::MealPlan(plan) => {
            out.push(title(block));
            if let Some(summary) = &plan.summary {
                out.push(summary.clone());
            }
            out.extend(plan.meals.iter().map(|meal| format!("  ▸ {}", meal)));
        }
        RenderedBlock::Recipe(recipe) => {
            out.push(title(block));
            out.push(recipe.paragraphs.join("\n\n"));
        }
        RenderedBlock::Nutrition(facts) => {
            out.push(title(block));
            let paragraphs: Vec<String> = facts.paragraphs.iter().map(|p| styled(p)).collect();
            out.push(paragraphs.join("\n\n"));
        }
        RenderedBlock::Plain(text) => out.push(text.clone()),
    }

    if let Some(label) = block.copy_label() {
        out.push(format!("({} with /copy)", label).dimmed().to_string());
    }

    out.retain(|line| !line.is_empty());
    out.join("\n")
}

fn title(block: &RenderedBlock) -> String {
    block.title().unwrap_or_default().bold().underline().to_string()
}

fn styled(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match (span.strong, span.emphasis) {
            (true, true) => span.text.bold().italic().to_string(),
            (true, false) => span.text.bold().to_string(),
            (false, true) => span.text.italic().to_string(),
            (false, false) => span.text.clone(),
        })
        .collect()
}

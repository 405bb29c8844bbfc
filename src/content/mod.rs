//! Reply Classification
//!
//! The assistant answers with a lightweight markup convention: a leading
//! `### <Heading>` line picks a display template, and `**bold**` /
//! `*italic*` markers style nutrition facts. [`classify`] maps a reply to
//! one [`RenderedBlock`] variant.
//!
//! Precedence, first match wins:
//!
//! 1. `### Meal Plan` - calorie summary plus numbered meal entries
//! 2. `### Recipe` (and `### Recipe Confirmation`) - title plus paragraphs
//! 3. `### Nutritional Content` - title plus styled paragraphs
//! 4. anything else - plain text

mod inline;

pub use inline::{parse_inline, Span};

use serde::Serialize;

const CALORIES_MARKER: &str = "**Recommended daily calories**";
const NUTRITION_TITLE_PREFIX: &str = "### Nutritional Content of ";
const HEADING_MARKER: &str = "### ";

/// Display template chosen from a reply's leading text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentKind {
    MealPlan,
    Recipe,
    Nutrition,
    Plain,
}

impl ContentKind {
    /// Heading prefixes in precedence order
    const PREFIXES: [(&'static str, ContentKind); 3] = [
        ("### Meal Plan", ContentKind::MealPlan),
        ("### Recipe", ContentKind::Recipe),
        ("### Nutritional Content", ContentKind::Nutrition),
    ];

    pub fn detect(content: &str) -> Self {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| content.starts_with(prefix))
            .map(|(_, kind)| *kind)
            .unwrap_or(ContentKind::Plain)
    }

    /// Label of the copy action, if the template offers one
    pub fn copy_label(&self) -> Option<&'static str> {
        match self {
            ContentKind::MealPlan => Some("Copy Meal Plan"),
            ContentKind::Recipe => Some("Copy Recipe"),
            ContentKind::Nutrition => Some("Copy Nutritional Content"),
            ContentKind::Plain => None,
        }
    }
}

/// A reply laid out for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RenderedBlock {
    MealPlan(MealPlan),
    Recipe(Recipe),
    Nutrition(NutritionFacts),
    Plain(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlan {
    /// The `**Recommended daily calories**` line, when the reply has one
    pub summary: Option<String>,
    /// Lines starting with a digit and a dot, in reply order
    pub meals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub title: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionFacts {
    pub title: String,
    pub paragraphs: Vec<Vec<Span>>,
}

impl MealPlan {
    pub const TITLE: &'static str = "Meal Plan";
}

impl RenderedBlock {
    pub fn kind(&self) -> ContentKind {
        match self {
            RenderedBlock::MealPlan(_) => ContentKind::MealPlan,
            RenderedBlock::Recipe(_) => ContentKind::Recipe,
            RenderedBlock::Nutrition(_) => ContentKind::Nutrition,
            RenderedBlock::Plain(_) => ContentKind::Plain,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            RenderedBlock::MealPlan(_) => Some(MealPlan::TITLE),
            RenderedBlock::Recipe(recipe) => Some(&recipe.title),
            RenderedBlock::Nutrition(facts) => Some(&facts.title),
            RenderedBlock::Plain(_) => None,
        }
    }

    pub fn copy_label(&self) -> Option<&'static str> {
        self.kind().copy_label()
    }
}

/// Classify an assistant reply and lay it out
pub fn classify(content: &str) -> RenderedBlock {
    match ContentKind::detect(content) {
        ContentKind::MealPlan => RenderedBlock::MealPlan(meal_plan(content)),
        ContentKind::Recipe => RenderedBlock::Recipe(recipe(content)),
        ContentKind::Nutrition => RenderedBlock::Nutrition(nutrition(content)),
        ContentKind::Plain => RenderedBlock::Plain(content.to_string()),
    }
}

fn meal_plan(content: &str) -> MealPlan {
    let summary = content
        .lines()
        .find(|line| line.starts_with(CALORIES_MARKER))
        .map(str::to_string);
    let meals = content
        .lines()
        .filter(|line| is_numbered(line))
        .map(str::to_string)
        .collect();

    MealPlan { summary, meals }
}

fn recipe(content: &str) -> Recipe {
    let (heading, body) = split_heading(content);
    Recipe {
        title: heading.replacen(HEADING_MARKER, "", 1).trim().to_string(),
        paragraphs: paragraphs(body),
    }
}

fn nutrition(content: &str) -> NutritionFacts {
    let (heading, body) = split_heading(content);
    let title = heading
        .strip_prefix(NUTRITION_TITLE_PREFIX)
        .or_else(|| heading.strip_prefix(HEADING_MARKER))
        .unwrap_or(heading)
        .trim()
        .to_string();

    NutritionFacts {
        title,
        paragraphs: paragraphs(body).iter().map(|p| parse_inline(p)).collect(),
    }
}

/// `^\d\.` over ASCII digits
fn is_numbered(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_digit() && bytes[1] == b'.'
}

fn split_heading(content: &str) -> (&str, &str) {
    match content.split_once('\n') {
        Some((heading, body)) => (heading.trim_end_matches('\r'), body),
        None => (content, ""),
    }
}

/// Split on blank-line boundaries, keeping each paragraph's lines verbatim
fn paragraphs(body: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join("\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEAL_PLAN: &str = "### Meal Plan\n\n\
        **Recommended daily calories**: 2400 kcal\n\n\
        1. Breakfast: oats with berries\n\
        2. Lunch: grilled chicken salad\n\
        3. Dinner: salmon and rice\n\n\
        Drink plenty of water.";

    #[test]
    fn test_detect_precedence() {
        assert_eq!(ContentKind::detect(MEAL_PLAN), ContentKind::MealPlan);
        assert_eq!(ContentKind::detect("### Recipe\n\nx"), ContentKind::Recipe);
        assert_eq!(
            ContentKind::detect("### Recipe Confirmation\n\nShall I fetch it?"),
            ContentKind::Recipe
        );
        assert_eq!(
            ContentKind::detect("### Nutritional Content of Apple\n\nx"),
            ContentKind::Nutrition
        );
        assert_eq!(ContentKind::detect("Hello there"), ContentKind::Plain);
        // Prefix must lead the reply
        assert_eq!(ContentKind::detect(" ### Recipe"), ContentKind::Plain);
        assert_eq!(ContentKind::detect(""), ContentKind::Plain);
    }

    #[test]
    fn test_meal_plan_extraction() {
        let RenderedBlock::MealPlan(plan) = classify(MEAL_PLAN) else {
            panic!("expected a meal plan");
        };
        assert_eq!(plan.summary.as_deref(), Some("**Recommended daily calories**: 2400 kcal"));
        assert_eq!(
            plan.meals,
            vec![
                "1. Breakfast: oats with berries",
                "2. Lunch: grilled chicken salad",
                "3. Dinner: salmon and rice",
            ]
        );
    }

    #[test]
    fn test_meal_plan_without_calories_or_meals() {
        let RenderedBlock::MealPlan(plan) =
            classify("### Meal Plan\n\nRecommended daily calories: N/A\n\nNo valid plan found.")
        else {
            panic!("expected a meal plan");
        };
        assert_eq!(plan.summary, None);
        assert!(plan.meals.is_empty());

        let RenderedBlock::MealPlan(plan) = classify("### Meal Plan") else {
            panic!("expected a meal plan");
        };
        assert_eq!(plan.summary, None);
        assert!(plan.meals.is_empty());
    }

    #[test]
    fn test_meal_lines_need_single_digit_then_dot() {
        let RenderedBlock::MealPlan(plan) =
            classify("### Meal Plan\n1.a\n10. snack\n 2. indented\n3) paren\n4.")
        else {
            panic!("expected a meal plan");
        };
        assert_eq!(plan.meals, vec!["1.a", "4."]);
    }

    #[test]
    fn test_recipe_title_and_paragraphs() {
        let content = "### Recipe  \n\nIngredients:\n- 2 chicken breasts\n  - skinless\n\n\n\
                       Steps:\n1. Season.\n2. Grill.\n\n";
        let RenderedBlock::Recipe(recipe) = classify(content) else {
            panic!("expected a recipe");
        };
        assert_eq!(recipe.title, "Recipe");
        assert_eq!(
            recipe.paragraphs,
            vec![
                "Ingredients:\n- 2 chicken breasts\n  - skinless".to_string(),
                "Steps:\n1. Season.\n2. Grill.".to_string(),
            ]
        );
    }

    #[test]
    fn test_recipe_confirmation_title() {
        let RenderedBlock::Recipe(recipe) =
            classify("### Recipe Confirmation\n\nDo you want the full chicken curry recipe?")
        else {
            panic!("expected a recipe");
        };
        assert_eq!(recipe.title, "Recipe Confirmation");
        assert_eq!(recipe.paragraphs.len(), 1);
    }

    #[test]
    fn test_recipe_with_no_body() {
        let RenderedBlock::Recipe(recipe) = classify("### Recipe") else {
            panic!("expected a recipe");
        };
        assert_eq!(recipe.title, "Recipe");
        assert!(recipe.paragraphs.is_empty());
    }

    #[test]
    fn test_nutrition_title_and_styling() {
        let content = "### Nutritional Content of Chicken Breast\n\n\
                       **Calories**: 165 kcal\n**Protein**: 31 g\n\n\
                       *Values per 100 g*";
        let RenderedBlock::Nutrition(facts) = classify(content) else {
            panic!("expected nutrition facts");
        };
        assert_eq!(facts.title, "Chicken Breast");
        assert_eq!(facts.paragraphs.len(), 2);
        assert_eq!(facts.paragraphs[0][0], Span::strong("Calories"));
        assert_eq!(facts.paragraphs[0][1], Span::plain(": 165 kcal\n"));
        assert_eq!(facts.paragraphs[1], vec![Span::emphasis("Values per 100 g")]);
        assert!(facts
            .paragraphs
            .iter()
            .flatten()
            .all(|span| !span.text.contains('*')));
    }

    #[test]
    fn test_nutrition_without_of_form() {
        let RenderedBlock::Nutrition(facts) = classify("### Nutritional Content\n") else {
            panic!("expected nutrition facts");
        };
        assert_eq!(facts.title, "Nutritional Content");
        assert!(facts.paragraphs.is_empty());
    }

    #[test]
    fn test_plain_keeps_content() {
        let content = "I don't have enough information to answer. Can you clarify?";
        assert_eq!(classify(content), RenderedBlock::Plain(content.to_string()));
    }

    #[test]
    fn test_block_metadata() {
        let block = classify(MEAL_PLAN);
        assert_eq!(block.title(), Some("Meal Plan"));
        assert_eq!(block.copy_label(), Some("Copy Meal Plan"));

        let block = classify("### Recipe\n\nx");
        assert_eq!(block.copy_label(), Some("Copy Recipe"));

        let block = classify("plain");
        assert_eq!(block.title(), None);
        assert_eq!(block.copy_label(), None);
    }
}

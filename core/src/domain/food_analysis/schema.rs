use thiserror::Error;

use crate::domain::food_analysis::{entities::AnalyzedFood, helpers::extract_json_candidates};

/// Instruction sent along with every image.
pub const FOOD_ANALYSIS_PROMPT: &str = r#"Analyze this food image and provide its nutritional facts using this json format "{ \"food\": \"Red Apple\", \"nutritional_facts_per_gram\": { \"calories\": 0.475, \"carbohydrates\": { \"total\": 0.125, \"sugars\": 0.095, \"dietary_fiber\": 0.02 }, \"protein\": 0.0025, \"fat\": 0.0015, \"vitamin_c\": \"0.07% RDI\", \"potassium_mg\": 0.975, \"water_content\": \"85%\" } }" if no object reply with none."#;

/// What the model answers when it sees no food.
pub const NO_FOOD_REPLY: &str = "none";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplyParseError {
    #[error("reply contains no JSON object")]
    NoJsonObject,

    #[error("reply JSON is malformed: {0}")]
    MalformedJson(String),

    #[error("reply does not match the nutrition schema: {0}")]
    SchemaMismatch(String),
}

/// Reads a model reply as nutrition data.
///
/// Fails closed: a reply is accepted only when a JSON object in it
/// deserializes into [`AnalyzedFood`] and passes [`validate_analyzed_food`].
/// Fields outside the schema are dropped.
pub fn parse_analysis_reply(reply: &str) -> Result<AnalyzedFood, ReplyParseError> {
    let candidates = extract_json_candidates(reply);
    if candidates.is_empty() {
        return Err(ReplyParseError::NoJsonObject);
    }

    let mut last_error = ReplyParseError::NoJsonObject;
    for candidate in candidates {
        let value: serde_json::Value = match serde_json::from_str(candidate) {
            Ok(value) => value,
            Err(e) => {
                last_error = ReplyParseError::MalformedJson(e.to_string());
                continue;
            }
        };

        let analyzed = serde_json::from_value::<AnalyzedFood>(value)
            .map_err(|e| ReplyParseError::SchemaMismatch(e.to_string()))
            .and_then(|analyzed| validate_analyzed_food(&analyzed).map(|_| analyzed));

        match analyzed {
            Ok(analyzed) => return Ok(analyzed),
            Err(e) => last_error = e,
        }
    }

    Err(last_error)
}

pub fn validate_analyzed_food(analyzed: &AnalyzedFood) -> Result<(), ReplyParseError> {
    if analyzed.food.trim().is_empty() {
        return Err(ReplyParseError::SchemaMismatch(
            "food name is empty".to_string(),
        ));
    }

    let facts = &analyzed.nutritional_facts_per_gram;
    let amounts = [
        ("calories", facts.calories),
        ("carbohydrates.total", facts.carbohydrates.total),
        ("carbohydrates.sugars", facts.carbohydrates.sugars),
        ("carbohydrates.dietary_fiber", facts.carbohydrates.dietary_fiber),
        ("protein", facts.protein),
        ("fat", facts.fat),
        ("potassium_mg", facts.potassium_mg),
    ];

    for (field, amount) in amounts {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ReplyParseError::SchemaMismatch(format!(
                "{} must be a non-negative number, got {}",
                field, amount
            )));
        }
    }

    Ok(())
}

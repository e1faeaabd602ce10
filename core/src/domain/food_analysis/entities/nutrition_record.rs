use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::food_analysis::value_objects::FRESHNESS_WINDOW_MS;

/// The latest analyzed food, stored at path `food`.
///
/// Overwritten on every successful analysis; there is no history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionRecord {
    #[schema(example = "Red Apple")]
    pub food: String,
    pub nutritional_facts_per_gram: NutritionalFacts,
    /// Creation time, epoch milliseconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionalFacts {
    #[schema(example = 0.475)]
    pub calories: f64,
    pub carbohydrates: Carbohydrates,
    pub protein: f64,
    pub fat: f64,
    #[schema(example = "0.07% RDI")]
    pub vitamin_c: String,
    pub potassium_mg: f64,
    #[schema(example = "85%")]
    pub water_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Carbohydrates {
    pub total: f64,
    pub sugars: f64,
    pub dietary_fiber: f64,
}

/// Food facts exactly as the model is asked to reply with them, before the
/// record gets its timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedFood {
    pub food: String,
    pub nutritional_facts_per_gram: NutritionalFacts,
}

impl AnalyzedFood {
    pub fn recorded_at(self, timestamp: i64) -> NutritionRecord {
        NutritionRecord {
            food: self.food,
            nutritional_facts_per_gram: self.nutritional_facts_per_gram,
            timestamp,
        }
    }
}

impl NutritionRecord {
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.timestamp)
    }

    /// Fresh while strictly younger than the freshness window.
    pub fn is_fresh_at(&self, now_ms: i64) -> bool {
        self.age_ms(now_ms) < FRESHNESS_WINDOW_MS
    }

    /// Instant (epoch ms) at which the record becomes stale.
    pub fn stale_at(&self) -> i64 {
        self.timestamp.saturating_add(FRESHNESS_WINDOW_MS)
    }
}

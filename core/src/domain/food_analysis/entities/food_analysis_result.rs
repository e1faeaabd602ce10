use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::NutritionRecord;

pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse JSON response";

/// What came out of one image analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FoodAnalysisResult {
    /// The reply was valid nutrition data and has been stored.
    Recorded(NutritionRecord),
    /// The reply could not be read as nutrition data; nothing was stored.
    Unparsed { raw: String, error: String },
}

impl FoodAnalysisResult {
    pub fn unparsed(raw: String) -> Self {
        Self::Unparsed {
            raw,
            error: PARSE_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn record(&self) -> Option<&NutritionRecord> {
        match self {
            Self::Recorded(record) => Some(record),
            Self::Unparsed { .. } => None,
        }
    }
}

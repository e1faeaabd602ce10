use serde_json::Value;

use crate::domain::food_analysis::entities::NutritionRecord;

/// Local state of the food record subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodDataState {
    pub food_data: Option<NutritionRecord>,
    pub is_data_valid: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for FoodDataState {
    fn default() -> Self {
        Self {
            food_data: None,
            is_data_valid: false,
            loading: true,
            error: None,
        }
    }
}

impl FoodDataState {
    /// Applies a pushed value. Values that are not a nutrition record read as
    /// no record at all.
    pub fn on_value(&mut self, value: Option<Value>, now_ms: i64) {
        self.food_data = value.and_then(|value| {
            serde_json::from_value::<NutritionRecord>(value)
                .inspect_err(|e| tracing::warn!(error = %e, "Ignoring malformed food record"))
                .ok()
        });
        self.error = None;
        self.loading = false;
        self.refresh(now_ms);
    }

    pub fn on_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Re-evaluates freshness of the cached record.
    pub fn refresh(&mut self, now_ms: i64) {
        self.is_data_valid = self
            .food_data
            .as_ref()
            .is_some_and(|record| record.is_fresh_at(now_ms));
    }

    /// The record to display: only while it is fresh.
    pub fn visible_record(&self) -> Option<&NutritionRecord> {
        self.food_data.as_ref().filter(|_| self.is_data_valid)
    }

    /// A record exists but is too old to display.
    pub fn is_stale(&self) -> bool {
        self.food_data.is_some() && !self.is_data_valid
    }

    /// When the displayed record goes stale, if one is displayed.
    pub fn fresh_until(&self) -> Option<i64> {
        self.visible_record().map(NutritionRecord::stale_at)
    }
}

/// Local state of the scale weight subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleWeightState {
    /// Grams; `0` until a numeric reading arrives.
    pub weight: f64,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ScaleWeightState {
    fn default() -> Self {
        Self {
            weight: 0.0,
            loading: true,
            error: None,
        }
    }
}

impl ScaleWeightState {
    pub fn on_value(&mut self, value: Option<Value>) {
        self.weight = value
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|w| w.is_finite())
            .unwrap_or(0.0);
        self.error = None;
        self.loading = false;
    }

    pub fn on_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }
}

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    dashboard::state::{FoodDataState, ScaleWeightState},
    food_analysis::entities::NutritionRecord,
};

// Reference daily values, 2000 kcal diet.
pub const DAILY_CALORIES_KCAL: f64 = 2000.0;
pub const DAILY_CARBOHYDRATES_G: f64 = 300.0;
pub const DAILY_PROTEIN_G: f64 = 50.0;
pub const DAILY_FAT_G: f64 = 65.0;

pub const GAUGE_MAX_WEIGHT_G: f64 = 500.0;
pub const GAUGE_BANDS_G: [(f64, f64); 4] =
    [(0.0, 150.0), (150.0, 250.0), (250.0, 350.0), (350.0, 500.0)];

pub const EMPTY_NUTRITION_MESSAGE: &str = "Connect ESP-cam to see nutrition data";
pub const SCALE_ERROR_MESSAGE: &str = "Error connecting to scale";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Amount {
    pub value: f64,
    #[schema(example = "95.0 kcal")]
    pub display: String,
}

impl Amount {
    fn new(value: f64, unit: &str) -> Self {
        let separator = if unit == "kcal" { " " } else { "" };
        Self {
            value,
            display: format!("{:.1}{}{}", value, separator, unit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyValue {
    /// Share of the reference daily value, unbounded
    pub percent: f64,
    /// `percent` capped at 100, for progress bars
    pub progress: f64,
}

impl DailyValue {
    fn of(amount: f64, reference: f64) -> Self {
        let percent = amount / reference * 100.0;
        Self {
            percent,
            progress: percent.min(100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyValues {
    pub calories: DailyValue,
    pub carbohydrates: DailyValue,
    pub protein: DailyValue,
    pub fat: DailyValue,
}

/// Nutrition facts of the current record, scaled to the weight on the scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionFactsView {
    pub food: String,
    pub weight: Amount,
    pub calories: Amount,
    pub carbohydrates: Amount,
    pub sugars: Amount,
    pub dietary_fiber: Amount,
    pub protein: Amount,
    pub fat: Amount,
    pub potassium: Amount,
    pub vitamin_c: String,
    pub water_content: String,
    pub daily_values: DailyValues,
    /// Analysis time, `HH:MM` UTC
    #[schema(example = "14:05")]
    pub analyzed_at: String,
}

impl NutritionFactsView {
    pub fn render(record: &NutritionRecord, weight: f64) -> Self {
        let multiplier = scale_multiplier(weight);
        let facts = &record.nutritional_facts_per_gram;

        let calories = facts.calories * multiplier;
        let carbohydrates = facts.carbohydrates.total * multiplier;
        let protein = facts.protein * multiplier;
        let fat = facts.fat * multiplier;

        Self {
            food: record.food.clone(),
            weight: Amount::new(multiplier, "g"),
            calories: Amount::new(calories, "kcal"),
            carbohydrates: Amount::new(carbohydrates, "g"),
            sugars: Amount::new(facts.carbohydrates.sugars * multiplier, "g"),
            dietary_fiber: Amount::new(facts.carbohydrates.dietary_fiber * multiplier, "g"),
            protein: Amount::new(protein, "g"),
            fat: Amount::new(fat, "g"),
            potassium: Amount::new(facts.potassium_mg * multiplier, "mg"),
            vitamin_c: facts.vitamin_c.clone(),
            water_content: facts.water_content.clone(),
            daily_values: DailyValues {
                calories: DailyValue::of(calories, DAILY_CALORIES_KCAL),
                carbohydrates: DailyValue::of(carbohydrates, DAILY_CARBOHYDRATES_G),
                protein: DailyValue::of(protein, DAILY_PROTEIN_G),
                fat: DailyValue::of(fat, DAILY_FAT_G),
            },
            analyzed_at: format_clock(record.timestamp),
        }
    }
}

/// Grams to multiply per-gram facts by; anything unusable counts as empty.
fn scale_multiplier(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

fn format_clock(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeightGaugeView {
    pub weight: Amount,
    pub max_weight: f64,
    /// Needle position in `[0, 1]`
    pub fraction: f64,
    /// Index into [`GAUGE_BANDS_G`] of the highlighted band
    pub band: usize,
}

impl WeightGaugeView {
    pub fn render(weight: f64) -> Self {
        let weight = if weight.is_finite() { weight } else { 0.0 };
        let clamped = weight.clamp(0.0, GAUGE_MAX_WEIGHT_G);
        let band = GAUGE_BANDS_G
            .iter()
            .position(|(_, upper)| clamped < *upper)
            .unwrap_or(GAUGE_BANDS_G.len() - 1);

        Self {
            weight: Amount::new(weight, "g"),
            max_weight: GAUGE_MAX_WEIGHT_G,
            fraction: clamped / GAUGE_MAX_WEIGHT_G,
            band,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NutritionPanel {
    Loading,
    Empty { message: String },
    Facts(NutritionFactsView),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScalePanel {
    Connecting,
    Error { message: String, detail: String },
    Gauge(WeightGaugeView),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    pub nutrition: NutritionPanel,
    /// A record exists but is older than the freshness window
    pub is_stale: bool,
    pub scale: ScalePanel,
}

impl DashboardView {
    pub fn render(food: &FoodDataState, scale: &ScaleWeightState) -> Self {
        let nutrition = if food.loading {
            NutritionPanel::Loading
        } else {
            match food.visible_record() {
                Some(record) => {
                    NutritionPanel::Facts(NutritionFactsView::render(record, scale.weight))
                }
                None => NutritionPanel::Empty {
                    message: EMPTY_NUTRITION_MESSAGE.to_string(),
                },
            }
        };

        let scale_panel = if scale.loading {
            ScalePanel::Connecting
        } else if let Some(detail) = &scale.error {
            ScalePanel::Error {
                message: SCALE_ERROR_MESSAGE.to_string(),
                detail: detail.clone(),
            }
        } else {
            ScalePanel::Gauge(WeightGaugeView::render(scale.weight))
        };

        Self {
            nutrition,
            is_stale: food.is_stale(),
            scale: scale_panel,
        }
    }
}

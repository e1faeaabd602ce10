pub mod food_analysis_result;
pub mod nutrition_record;

pub use food_analysis_result::*;
pub use nutrition_record::*;

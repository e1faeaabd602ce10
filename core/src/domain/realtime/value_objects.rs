use std::fmt;

pub const FOOD_PATH: &str = "food";
pub const SCALE_WEIGHT_PATH: &str = "scale/weight";

/// Hierarchical key addressing a JSON value in the realtime database,
/// stored without leading or trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath(String);

impl StorePath {
    /// Latest nutrition record.
    pub fn food() -> Self {
        Self(FOOD_PATH.to_string())
    }

    /// Latest scale reading, in grams.
    pub fn scale_weight() -> Self {
        Self(SCALE_WEIGHT_PATH.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

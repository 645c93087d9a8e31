//! Volume unit conversion between milliliters and fluid ounces.

pub const ML_PER_FL_OZ: f64 = 29.5735;

/// Milliliters to fluid ounces, rounded to 2 decimals on the ounce side.
pub fn ml_to_oz(ml: f64) -> f64 {
    round2(ml / ML_PER_FL_OZ)
}

pub fn oz_to_ml(oz: f64) -> f64 {
    oz * ML_PER_FL_OZ
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

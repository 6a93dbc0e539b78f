//! Z-scores against the WHO child growth standards
//!
//! Backs `d2:zScoreWFA`, `d2:zScoreHFA` and `d2:zScoreWFH`. A measurement
//! between two standard deviation lines is interpolated linearly, one beyond
//! the outermost lines scores ±3.5.

mod tables;

use tables::{
    HEIGHT_FOR_AGE_BOYS, HEIGHT_FOR_AGE_GIRLS, WEIGHT_FOR_AGE_BOYS, WEIGHT_FOR_AGE_GIRLS,
    WEIGHT_FOR_HEIGHT_BOYS, WEIGHT_FOR_HEIGHT_GIRLS,
};

/// A table row: the age or height, then the measurements at -3 to +3
/// standard deviations
type Row = (f32, [f32; 7]);

/// Score beyond the outermost standard deviation lines
const OUTSIDE: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthIndicator {
    WeightForAge,
    HeightForAge,
    WeightForHeight,
}

impl GrowthIndicator {
    fn table(self, gender: Gender) -> &'static [Row] {
        match (self, gender) {
            (Self::WeightForAge, Gender::Female) => &WEIGHT_FOR_AGE_GIRLS,
            (Self::WeightForAge, Gender::Male) => &WEIGHT_FOR_AGE_BOYS,
            (Self::HeightForAge, Gender::Female) => &HEIGHT_FOR_AGE_GIRLS,
            (Self::HeightForAge, Gender::Male) => &HEIGHT_FOR_AGE_BOYS,
            (Self::WeightForHeight, Gender::Female) => &WEIGHT_FOR_HEIGHT_GIRLS,
            (Self::WeightForHeight, Gender::Male) => &WEIGHT_FOR_HEIGHT_BOYS,
        }
    }

    /// Ages are whole months, heights come in steps of 0.5 cm
    fn row_key(self, parameter: f64) -> f32 {
        match self {
            Self::WeightForAge | Self::HeightForAge => parameter.round() as f32,
            Self::WeightForHeight => ((parameter * 2.0).round() / 2.0) as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// `male`, `m`, `boy` and `b` in any letter case are male, every other
    /// code is female
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        if ["male", "m", "boy", "b"]
            .iter()
            .any(|male| code.eq_ignore_ascii_case(male))
        {
            Self::Male
        } else {
            Self::Female
        }
    }
}

/// The z-score of `measurement` for a child of `gender` at `parameter` (age
/// in months or height in cm), rounded to two decimals. `None` when the
/// tables have no row for the parameter or the measurement is NaN.
pub fn z_score(
    indicator: GrowthIndicator,
    gender: Gender,
    parameter: f64,
    measurement: f64,
) -> Option<f64> {
    if measurement.is_nan() {
        return None;
    }
    let key = indicator.row_key(parameter);
    let (_, lines) = indicator
        .table(gender)
        .iter()
        .find(|(row_key, _)| *row_key == key)?;
    let score = score(lines, measurement as f32);
    Some((score * 100.0).round() / 100.0)
}

fn score(lines: &[f32; 7], measurement: f32) -> f64 {
    if measurement < lines[0] {
        return -OUTSIDE;
    }
    if measurement > lines[6] {
        return OUTSIDE;
    }
    // index of the last line at or below the measurement
    let lower = lines.partition_point(|&line| line <= measurement) - 1;
    let base = lower as f64 - 3.0;
    if lines[lower] == measurement {
        return base;
    }
    let (low, high) = (lines[lower], lines[lower + 1]);
    base + f64::from((measurement - low) / (high - low))
}

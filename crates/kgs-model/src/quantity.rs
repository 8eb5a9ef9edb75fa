use serde::{Deserialize, Serialize};

use crate::source::FullNameRef;

/// A single value or a min/max range with units, as used for age and weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValueOrRange {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<FullNameRef>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value_unit: Option<FullNameRef>,
    #[serde(default)]
    pub min_value_unit: Option<FullNameRef>,
}

fn number_display(value: Option<f64>) -> Option<String> {
    let value = value?;
    if value.fract() == 0.0 {
        Some(format!("{value:.0}"))
    } else {
        Some(format!("{value:.2}"))
    }
}

fn unit_name(unit: Option<&FullNameRef>) -> &str {
    unit.and_then(|u| u.full_name.as_deref()).unwrap_or("")
}

impl QuantitativeValueOrRange {
    pub fn single(value: f64, unit: Option<FullNameRef>) -> Self {
        Self {
            value: Some(value),
            unit,
            ..Self::default()
        }
    }

    pub fn range(min: Option<f64>, max: Option<f64>, unit: Option<FullNameRef>) -> Self {
        Self {
            min_value: min,
            max_value: max,
            min_value_unit: unit.clone(),
            max_value_unit: unit,
            ..Self::default()
        }
    }

    /// Human readable form, e.g. `"12 days"`, `"2.50 g"` or `"10 - 20 weeks"`.
    pub fn display_string(&self) -> String {
        if let Some(value) = number_display(self.value) {
            return match &self.unit {
                Some(unit) => format!("{value} {}", unit.full_name.as_deref().unwrap_or("")),
                None => value,
            }
            .trim()
            .to_string();
        }

        let same_unit = match (&self.min_value_unit, &self.max_value_unit) {
            (None, None) => true,
            (Some(min), Some(max)) => min == max,
            _ => false,
        };
        let min_unit = if same_unit {
            ""
        } else {
            unit_name(self.min_value_unit.as_ref())
        };
        let raw = format!(
            "{} {} - {} {}",
            number_display(self.min_value).unwrap_or_default(),
            min_unit,
            number_display(self.max_value).unwrap_or_default(),
            unit_name(self.max_value_unit.as_ref()),
        );
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

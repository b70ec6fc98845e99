use crate::indicator::Indicator;
use core_types::{FormulaSet, Period};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of every indicator of a `RiskEngine`, together with the inputs
/// that shaped them.
///
/// This struct is the data transfer object handed to presentation layers.
/// Indicator values that are not finite serialize as the strings `"NaN"`,
/// `"inf"` and `"-inf"`, so a report reads back exactly as it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub period: Period,
    pub formula_set: FormulaSet,
    /// Annualized, as supplied to the engine.
    pub risk_free_rate: f64,
    pub period_count: usize,
    #[serde(with = "indicator_values")]
    pub indicators: BTreeMap<String, f64>,
}

impl RiskReport {
    /// Looks up one indicator by name.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.indicators.get(name).copied()
    }

    /// Keeps only the listed indicators. An empty list keeps everything.
    pub fn retain(&mut self, selected: &[Indicator]) {
        if selected.is_empty() {
            return;
        }
        self.indicators
            .retain(|name, _| selected.iter().any(|indicator| indicator.name() == name));
    }
}

/// Non-finite values as string labels, finite ones as plain JSON numbers.
mod indicator_values {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    const NAN: &str = "NaN";
    const INFINITY: &str = "inf";
    const NEG_INFINITY: &str = "-inf";

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        Number(f64),
        Label(String),
    }

    impl From<f64> for Encoded {
        fn from(value: f64) -> Self {
            if value.is_nan() {
                Encoded::Label(NAN.to_string())
            } else if value == f64::INFINITY {
                Encoded::Label(INFINITY.to_string())
            } else if value == f64::NEG_INFINITY {
                Encoded::Label(NEG_INFINITY.to_string())
            } else {
                Encoded::Number(value)
            }
        }
    }

    pub fn serialize<S>(values: &BTreeMap<String, f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            values
                .iter()
                .map(|(name, value)| (name, Encoded::from(*value))),
        )
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        BTreeMap::<String, Encoded>::deserialize(deserializer)?
            .into_iter()
            .map(|(name, encoded)| {
                let value = match encoded {
                    Encoded::Number(value) => value,
                    Encoded::Label(label) => match label.as_str() {
                        NAN => f64::NAN,
                        INFINITY => f64::INFINITY,
                        NEG_INFINITY => f64::NEG_INFINITY,
                        other => {
                            return Err(D::Error::custom(format!(
                                "indicator '{name}' has invalid value '{other}'"
                            )));
                        }
                    },
                };
                Ok((name, value))
            })
            .collect()
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LeafPredictionOption {
    #[strum(
        message = "Target Mean",
        detailed_message = "Predict the running mean of the targets seen at the leaf."
    )]
    Mean,
    #[strum(
        message = "Perceptron",
        detailed_message = "Predict with a linear perceptron per target."
    )]
    Perceptron,
    #[default]
    #[strum(
        message = "Adaptive",
        detailed_message = "Track faded errors of perceptron and mean, pick the lower per target."
    )]
    Adaptive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::{EnumMessage, IntoEnumIterator};

    #[test]
    fn default_is_adaptive() {
        assert_eq!(LeafPredictionOption::default(), LeafPredictionOption::Adaptive);
    }

    #[test]
    fn kebab_case_names_round_trip() {
        for option in LeafPredictionOption::iter() {
            let name: &'static str = option.into();
            assert_eq!(LeafPredictionOption::from_str(name).unwrap(), option);
        }
        assert_eq!(LeafPredictionOption::Perceptron.to_string(), "perceptron");
    }

    #[test]
    fn serde_uses_kebab_case() {
        let v = serde_json::to_value(LeafPredictionOption::Mean).unwrap();
        assert_eq!(v, serde_json::json!("mean"));
    }

    #[test]
    fn messages_are_available() {
        assert_eq!(
            LeafPredictionOption::Adaptive.get_message(),
            Some("Adaptive")
        );
        assert!(
            LeafPredictionOption::Mean
                .get_detailed_message()
                .is_some()
        );
    }
}

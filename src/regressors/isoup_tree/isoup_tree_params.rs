use crate::regressors::isoup_tree::LeafPredictionOption;
use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_learning_ratio_perceptron() -> f64 {
    0.02
}
fn default_learning_ratio_decay() -> f64 {
    0.001
}
fn default_learning_ratio_const() -> bool {
    true
}
fn default_random_seed() -> u64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PerceptronOptions {
    #[serde(default = "default_learning_ratio_perceptron")]
    #[schemars(
        title = "Learning ratio",
        description = "Perceptron learning ratio (or base ratio when decaying).",
        range(min = 0.0),
        default = "default_learning_ratio_perceptron"
    )]
    pub learning_ratio_perceptron: f64,

    #[serde(default = "default_learning_ratio_decay")]
    #[schemars(
        title = "Learning ratio decay",
        description = "Decay multiplier applied per unit of weight seen by a leaf.",
        range(min = 0.0),
        default = "default_learning_ratio_decay"
    )]
    pub learning_ratio_decay: f64,

    #[serde(default = "default_learning_ratio_const")]
    #[schemars(
        title = "Constant learning ratio?",
        description = "Keep the learning ratio fixed instead of decaying it.",
        default = "default_learning_ratio_const"
    )]
    pub learning_ratio_const: bool,
}
impl Default for PerceptronOptions {
    fn default() -> Self {
        Self {
            learning_ratio_perceptron: default_learning_ratio_perceptron(),
            learning_ratio_decay: default_learning_ratio_decay(),
            learning_ratio_const: default_learning_ratio_const(),
        }
    }
}

impl PerceptronOptions {
    /// Learning ratio for a leaf that has seen `weight_seen` units of weight.
    pub fn learning_ratio(&self, weight_seen: f64) -> f64 {
        if self.learning_ratio_const {
            self.learning_ratio_perceptron
        } else {
            self.learning_ratio_perceptron / (1.0 + weight_seen * self.learning_ratio_decay)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct IsoupTreeParams {
    #[serde(default)]
    #[schemars(skip)]
    pub leaf_prediction: LeafPredictionOption,

    #[serde(default)]
    #[schemars(
        title = "Nominal attributes",
        description = "Indices of the features to treat as nominal."
    )]
    pub nominal_attributes: Option<Vec<usize>>,

    #[serde(default = "default_random_seed")]
    #[schemars(
        title = "Seed",
        description = "Tree-level seed; each node derives its own PRNG seed from it.",
        default = "default_random_seed"
    )]
    pub random_seed: u64,

    #[serde(default)]
    #[schemars(skip)]
    pub perceptron: PerceptronOptions,
}
impl Default for IsoupTreeParams {
    fn default() -> Self {
        Self {
            leaf_prediction: LeafPredictionOption::default(),
            nominal_attributes: None,
            random_seed: default_random_seed(),
            perceptron: PerceptronOptions::default(),
        }
    }
}

impl IsoupTreeParams {
    pub fn is_nominal_attribute(&self, index: usize) -> bool {
        self.nominal_attributes
            .as_ref()
            .is_some_and(|indices| indices.contains(&index))
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("failed to parse iSOUP-Tree parameters")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read parameters from '{}'", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("invalid parameters in '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use schemars::schema_for;
    use serde_json::{Value, json};
    use std::io::Write;

    fn root_props_of<T: JsonSchema>() -> Value {
        let root = schema_for!(T);
        let v = serde_json::to_value(root).expect("schema to JSON");
        v.get("schema")
            .cloned()
            .unwrap_or(v)
            .get("properties")
            .cloned()
            .unwrap_or_else(|| json!({}))
    }

    #[test]
    fn default_functions_are_expected() {
        assert_relative_eq!(default_learning_ratio_perceptron(), 0.02);
        assert_relative_eq!(default_learning_ratio_decay(), 0.001);
        assert!(default_learning_ratio_const());
        assert_eq!(default_random_seed(), 1);
    }

    #[test]
    fn constant_learning_ratio_ignores_weight_seen() {
        let opts = PerceptronOptions::default();
        assert_relative_eq!(opts.learning_ratio(0.0), 0.02);
        assert_relative_eq!(opts.learning_ratio(1e6), 0.02);
    }

    #[test]
    fn decaying_learning_ratio() {
        let opts = PerceptronOptions {
            learning_ratio_perceptron: 0.5,
            learning_ratio_decay: 0.1,
            learning_ratio_const: false,
        };
        assert_relative_eq!(opts.learning_ratio(0.0), 0.5);
        assert_relative_eq!(opts.learning_ratio(10.0), 0.25);
    }

    #[test]
    fn nominal_lookup() {
        let mut p = IsoupTreeParams::default();
        assert!(!p.is_nominal_attribute(0));
        p.nominal_attributes = Some(vec![1, 3]);
        assert!(p.is_nominal_attribute(3));
        assert!(!p.is_nominal_attribute(2));
    }

    #[test]
    fn serde_missing_fields_apply_defaults() {
        let p: IsoupTreeParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p, IsoupTreeParams::default());
    }

    #[test]
    fn serde_reads_nested_options() {
        let p = IsoupTreeParams::from_json_str(
            r#"{
                "leaf_prediction": "perceptron",
                "nominal_attributes": [0],
                "perceptron": { "learning_ratio_const": false }
            }"#,
        )
        .unwrap();
        assert_eq!(p.leaf_prediction, LeafPredictionOption::Perceptron);
        assert!(!p.perceptron.learning_ratio_const);
        assert_relative_eq!(p.perceptron.learning_ratio_perceptron, 0.02);
        assert!(p.is_nominal_attribute(0));
    }

    #[test]
    fn invalid_json_reports_context() {
        let err = IsoupTreeParams::from_json_str("{ not json").unwrap_err();
        assert!(err.to_string().contains("iSOUP-Tree parameters"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "random_seed": 99, "leaf_prediction": "mean" }}"#).unwrap();
        let p = IsoupTreeParams::from_json_file(file.path()).unwrap();
        assert_eq!(p.random_seed, 99);
        assert_eq!(p.leaf_prediction, LeafPredictionOption::Mean);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IsoupTreeParams::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read parameters"));
    }

    #[test]
    fn schema_skips_nested_choice_fields() {
        let props = root_props_of::<IsoupTreeParams>();
        let obj = props.as_object().expect("props object");
        assert!(!obj.contains_key("leaf_prediction"));
        assert!(!obj.contains_key("perceptron"));
        for key in ["nominal_attributes", "random_seed"] {
            assert!(obj.contains_key(key), "missing key in schema: {key}");
        }
    }

    #[test]
    fn schema_contains_titles_ranges_and_defaults() {
        let props = root_props_of::<PerceptronOptions>();
        let obj = props.as_object().unwrap();

        let lr = obj
            .get("learning_ratio_perceptron")
            .unwrap()
            .as_object()
            .unwrap();
        assert!(lr.get("title").is_some());
        assert_eq!(lr.get("minimum").and_then(Value::as_f64), Some(0.0));
        assert_eq!(lr.get("default").and_then(Value::as_f64), Some(0.02));

        let c = obj.get("learning_ratio_const").unwrap().as_object().unwrap();
        assert_eq!(c.get("default").and_then(Value::as_bool), Some(true));
    }
}

//! Recruitment risk classifier
//!
//! The classifier is trained elsewhere and shipped as a JSON logistic
//! regression over `(positive_events, negative_events)`. It is loaded once
//! at startup and shared read-only by every request.

use std::path::Path;

use anyhow::{Context, Result};
use employee_events::ModelInput;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Two-class probabilistic classifier over [`ModelInput`] rows
pub trait Classifier: Send + Sync {
    /// `[P(class 0), P(class 1)]` for every input row, in order
    fn predict_proba(&self, inputs: &[ModelInput]) -> Vec<[f64; 2]>;
}

/// Positive-class probability (column 1) for every row
pub fn positive_class(classifier: &dyn Classifier, inputs: &[ModelInput]) -> Vec<f64> {
    classifier
        .predict_proba(inputs)
        .into_iter()
        .map(|[_, positive]| positive)
        .collect()
}

/// Logistic regression: `p = sigmoid(intercept + coefficients · features)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    /// Feature names in training order
    pub features: Vec<String>,
    pub intercept: f64,
    pub coefficients: [f64; 2],
}

impl LogisticModel {
    fn validate(&self) -> Result<()> {
        let expected: Vec<&str> = ModelInput::FEATURES.to_vec();
        if self.features != expected {
            anyhow::bail!(
                "Model features {:?} do not match expected input columns {:?}",
                self.features,
                expected
            );
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            anyhow::bail!("Model parameters must be finite numbers");
        }
        Ok(())
    }

    fn probability(&self, features: [f64; 2]) -> f64 {
        let z = self.intercept
            + self.coefficients[0] * features[0]
            + self.coefficients[1] * features[1];
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, inputs: &[ModelInput]) -> Vec<[f64; 2]> {
        inputs
            .iter()
            .map(|input| {
                let p = self.probability(input.features());
                [1.0 - p, p]
            })
            .collect()
    }
}

/// Load and validate the classifier file
pub fn load_model(path: &Path) -> Result<LogisticModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {}", path.display()))?;
    let model: LogisticModel = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse model file {}", path.display()))?;
    model
        .validate()
        .with_context(|| format!("Invalid model file {}", path.display()))?;

    info!(
        intercept = model.intercept,
        coefficients = ?model.coefficients,
        "Loaded classifier from {}",
        path.display()
    );
    Ok(model)
}

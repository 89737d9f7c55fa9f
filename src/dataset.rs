//! Attention weight dataset
//!
//! An [`Example`] pairs a fixed input token sequence with a scripted output
//! sequence. Every output step carries a dense weight vector aligned
//! index-for-index with the input tokens.
//!
//! ## Normalization
//!
//! Vectors are normalized once, when the example is built. Authoring defects
//! (length mismatch, non-positive sum, out-of-range values or target indices)
//! never fail construction: they degrade to a uniform distribution or are
//! rescaled away, and are recorded as [`DatasetIssue`]s for reporting.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Split a paragraph into input tokens.
///
/// Splits on single spaces only, so punctuation stays attached
/// (`"station,"`, `"bat."`).
pub fn split_paragraph(text: &str) -> Vec<String> {
    text.split(' ').map(str::to_string).collect()
}

/// Rescale a vector so it sums to 1.0.
///
/// Negative and non-finite entries count as zero, so every result lies in
/// [0, 1]. Falls back to a uniform distribution when nothing positive is left.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let clamped: Vec<f64> = weights.iter().map(|&w| non_negative(w)).collect();
    let sum: f64 = clamped.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        let uniform = 1.0 / weights.len() as f64;
        return weights.iter().map(|_| uniform).collect();
    }
    clamped.iter().map(|w| w / sum).collect()
}

fn non_negative(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

/// One output token and the attention it paid to each input token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionStep {
    /// The generated output token
    pub output_token: String,
    /// Normalized weights, one per input token
    pub weights: Vec<f64>,
}

/// A named scenario: input paragraph plus scripted output steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// Unique identifier (e.g. `"attention-context"`)
    pub id: String,
    /// Display name shown on the scenario button
    pub name: String,
    /// Input tokens, identified only by position
    pub input_tokens: Vec<String>,
    /// Output steps in generation order
    pub output_steps: Vec<AttentionStep>,
}

impl Example {
    /// Number of input tokens
    pub fn n_inputs(&self) -> usize {
        self.input_tokens.len()
    }

    /// Number of output steps
    pub fn n_steps(&self) -> usize {
        self.output_steps.len()
    }

    /// Index of the final output step, if there is one
    pub fn last_step_index(&self) -> Option<usize> {
        self.output_steps.len().checked_sub(1)
    }

    /// Get a step by index
    pub fn step(&self, idx: usize) -> Option<&AttentionStep> {
        self.output_steps.get(idx)
    }

    /// Get the weight vector of a step
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        self.output_steps.get(idx).map(|s| s.weights.as_slice())
    }
}

/// A data-authoring defect found while building an example
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetIssue {
    /// Dense vector length differs from the input length; replaced by uniform
    LengthMismatch {
        example: String,
        step: usize,
        expected: usize,
        actual: usize,
    },
    /// Raw weights summed to zero or less; replaced by uniform
    NonPositiveSum { example: String, step: usize },
    /// A raw weight outside [0, 1]; kept and rescaled with the rest of the vector
    WeightOutOfRange {
        example: String,
        step: usize,
        token: usize,
        value: f64,
    },
    /// A sparse target pointing past the input sequence; ignored
    TargetOutOfRange {
        example: String,
        step: usize,
        token: usize,
    },
    /// A sparse target key that is not an index; ignored
    InvalidTargetKey {
        example: String,
        step: usize,
        key: String,
    },
    /// Second example with an id already in use; dropped
    DuplicateId { example: String },
}

impl fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                example,
                step,
                expected,
                actual,
            } => write!(
                f,
                "{example} step {step}: {actual} weights for {expected} input tokens (using uniform)"
            ),
            Self::NonPositiveSum { example, step } => {
                write!(f, "{example} step {step}: weights sum to <= 0 (using uniform)")
            }
            Self::WeightOutOfRange {
                example,
                step,
                token,
                value,
            } => write!(
                f,
                "{example} step {step}: weight {value} for token {token} is outside [0, 1]"
            ),
            Self::TargetOutOfRange {
                example,
                step,
                token,
            } => write!(f, "{example} step {step}: target index {token} out of range"),
            Self::InvalidTargetKey { example, step, key } => {
                write!(f, "{example} step {step}: target key '{key}' is not an index")
            }
            Self::DuplicateId { example } => write!(f, "duplicate example id '{example}'"),
        }
    }
}

/// Builds an [`Example`], normalizing each step as it is added
#[derive(Debug)]
pub struct ExampleBuilder {
    id: String,
    name: String,
    input_tokens: Vec<String>,
    steps: Vec<AttentionStep>,
    issues: Vec<DatasetIssue>,
}

impl ExampleBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input_tokens: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input_tokens,
            steps: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Add a step from sparse `(input index, raw weight)` targets.
    ///
    /// Repeated indices accumulate. Indices past the input are ignored.
    pub fn sparse_step(mut self, output_token: impl Into<String>, targets: &[(usize, f64)]) -> Self {
        let step = self.steps.len();
        let mut raw = vec![0.0; self.input_tokens.len()];
        for &(token, value) in targets {
            match raw.get_mut(token) {
                Some(slot) => {
                    self.check_range(step, token, value);
                    *slot += value;
                }
                None => self.issues.push(DatasetIssue::TargetOutOfRange {
                    example: self.id.clone(),
                    step,
                    token,
                }),
            }
        }
        self.push_normalized(output_token.into(), raw);
        self
    }

    /// Add a step from a dense raw weight vector
    pub fn dense_step(mut self, output_token: impl Into<String>, weights: Vec<f64>) -> Self {
        let step = self.steps.len();
        let expected = self.input_tokens.len();
        let raw = if weights.len() == expected {
            for (token, &value) in weights.iter().enumerate() {
                self.check_range(step, token, value);
            }
            weights
        } else {
            self.issues.push(DatasetIssue::LengthMismatch {
                example: self.id.clone(),
                step,
                expected,
                actual: weights.len(),
            });
            vec![0.0; expected]
        };
        self.push_normalized(output_token.into(), raw);
        self
    }

    /// Finish the example, returning it with any authoring issues found
    pub fn build(self) -> (Example, Vec<DatasetIssue>) {
        let example = Example {
            id: self.id,
            name: self.name,
            input_tokens: self.input_tokens,
            output_steps: self.steps,
        };
        (example, self.issues)
    }

    fn check_range(&mut self, step: usize, token: usize, value: f64) {
        if !(0.0..=1.0).contains(&value) {
            self.issues.push(DatasetIssue::WeightOutOfRange {
                example: self.id.clone(),
                step,
                token,
                value,
            });
        }
    }

    fn push_normalized(&mut self, output_token: String, raw: Vec<f64>) {
        let step = self.steps.len();
        let sum: f64 = raw.iter().map(|&w| non_negative(w)).sum();
        // A length mismatch already produced an all-zero vector and its own issue.
        let already_reported = matches!(
            self.issues.last(),
            Some(DatasetIssue::LengthMismatch { step: s, .. }) if *s == step
        );
        if sum <= 0.0 && !already_reported {
            self.issues.push(DatasetIssue::NonPositiveSum {
                example: self.id.clone(),
                step,
            });
        }
        self.steps.push(AttentionStep {
            output_token,
            weights: normalize(&raw),
        });
    }
}

/// Raw JSON structure for loading
#[derive(Debug, Deserialize)]
struct DatasetFile {
    examples: Vec<ExampleFile>,
}

#[derive(Debug, Deserialize)]
struct ExampleFile {
    id: String,
    name: String,
    #[serde(default)]
    input_tokens: Option<Vec<String>>,
    #[serde(default)]
    input_text: Option<String>,
    output_steps: Vec<StepFile>,
}

#[derive(Debug, Deserialize)]
struct StepFile {
    #[serde(alias = "output_word")]
    output_token: String,
    weights: WeightSpec,
}

/// Either a dense vector or a sparse `{"index": weight}` map
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WeightSpec {
    Dense(Vec<f64>),
    Sparse(BTreeMap<String, f64>),
}

/// The immutable set of examples available to a session
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    examples: Vec<Arc<Example>>,
    issues: Vec<DatasetIssue>,
}

impl Dataset {
    /// Create a dataset, dropping any example whose id is already taken
    pub fn new(examples: Vec<Example>, mut issues: Vec<DatasetIssue>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(examples.len());
        for example in examples {
            if seen.insert(example.id.clone()) {
                kept.push(Arc::new(example));
            } else {
                issues.push(DatasetIssue::DuplicateId {
                    example: example.id,
                });
            }
        }
        for issue in &issues {
            warn!("Dataset: {}", issue);
        }
        Self {
            examples: kept,
            issues,
        }
    }

    /// Collect built examples and their issues into a dataset
    pub fn from_builders(builders: Vec<ExampleBuilder>) -> Self {
        let mut examples = Vec::with_capacity(builders.len());
        let mut issues = Vec::new();
        for builder in builders {
            let (example, found) = builder.build();
            examples.push(example);
            issues.extend(found);
        }
        Self::new(examples, issues)
    }

    /// Load dataset from JSON file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {path}"))?;
        let dataset = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse dataset {path}"))?;
        info!(
            "Loaded {} examples from {} ({} issues)",
            dataset.len(),
            path,
            dataset.issues.len()
        );
        Ok(dataset)
    }

    /// Parse a dataset from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(json)?;
        let mut builders = Vec::with_capacity(file.examples.len());

        for raw in file.examples {
            let input_tokens = match (raw.input_tokens, raw.input_text) {
                (Some(tokens), _) => tokens,
                (None, Some(text)) => split_paragraph(&text),
                (None, None) => {
                    anyhow::bail!("Example '{}' has neither input_tokens nor input_text", raw.id)
                }
            };

            let mut builder = ExampleBuilder::new(raw.id, raw.name, input_tokens);
            for step in raw.output_steps {
                builder = match step.weights {
                    WeightSpec::Dense(weights) => builder.dense_step(step.output_token, weights),
                    WeightSpec::Sparse(map) => {
                        let step_idx = builder.steps.len();
                        let mut targets = Vec::with_capacity(map.len());
                        for (key, value) in map {
                            match key.trim().parse::<usize>() {
                                Ok(token) => targets.push((token, value)),
                                Err(_) => builder.issues.push(DatasetIssue::InvalidTargetKey {
                                    example: builder.id.clone(),
                                    step: step_idx,
                                    key,
                                }),
                            }
                        }
                        builder.sparse_step(step.output_token, &targets)
                    }
                };
            }
            builders.push(builder);
        }

        Ok(Self::from_builders(builders))
    }

    /// The built-in scenarios over the fixed English paragraph
    pub fn builtin() -> Self {
        crate::builtin::dataset()
    }

    /// Look up an example by id
    pub fn get(&self, id: &str) -> Option<Arc<Example>> {
        self.examples.iter().find(|e| e.id == id).cloned()
    }

    /// All examples, in authoring order
    pub fn examples(&self) -> &[Arc<Example>] {
        &self.examples
    }

    /// Authoring issues found during construction
    pub fn issues(&self) -> &[DatasetIssue] {
        &self.issues
    }

    /// Number of examples
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Check if the dataset has no examples
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

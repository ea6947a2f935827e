//! The trained regression model artifact.
//!
//! The artifact is opaque to the rest of the system: its whole contract
//! is `predict(vector of 5 floats) -> float`. Two serialized shapes are
//! supported, a linear model and an averaged regression forest; both
//! declare and validate their feature count at load time.

use aq_core::FEATURE_COUNT;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::{ArtifactError, ArtifactResult};

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model expects {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },

    #[error("Forest has no trees")]
    EmptyForest,

    #[error("Malformed tree {tree}: node index {node} out of range")]
    MalformedTree { tree: usize, node: usize },

    #[error("Non-finite model output: {value}")]
    NonFiniteOutput { value: f64 },
}

/// A loaded regression model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear(LinearModel),
    Forest(ForestModel),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    pub n_features: usize,
    pub trees: Vec<Tree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

/// Binary decision tree node. A split sends `features[feature] <=
/// threshold` left, everything else right; traversal starts at node 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl RegressionModel {
    /// Structural checks run once at load time.
    pub fn validate(&self) -> ModelResult<()> {
        match self {
            RegressionModel::Linear(linear) => {
                if linear.coefficients.len() != FEATURE_COUNT {
                    return Err(ModelError::FeatureCount {
                        expected: FEATURE_COUNT,
                        got: linear.coefficients.len(),
                    });
                }
            }
            RegressionModel::Forest(forest) => {
                if forest.n_features != FEATURE_COUNT {
                    return Err(ModelError::FeatureCount {
                        expected: FEATURE_COUNT,
                        got: forest.n_features,
                    });
                }
                if forest.trees.is_empty() {
                    return Err(ModelError::EmptyForest);
                }
                for (tree_idx, tree) in forest.trees.iter().enumerate() {
                    if tree.nodes.is_empty() {
                        return Err(ModelError::MalformedTree {
                            tree: tree_idx,
                            node: 0,
                        });
                    }
                    for node in &tree.nodes {
                        if let TreeNode::Split {
                            feature,
                            left,
                            right,
                            ..
                        } = node
                        {
                            if *feature >= forest.n_features
                                || *left >= tree.nodes.len()
                                || *right >= tree.nodes.len()
                            {
                                return Err(ModelError::MalformedTree {
                                    tree: tree_idx,
                                    node: (*left).max(*right),
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Run one forward inference over a feature vector in canonical
    /// order.
    pub fn predict(&self, features: &[f64]) -> ModelResult<f64> {
        if features.len() != FEATURE_COUNT {
            return Err(ModelError::FeatureCount {
                expected: FEATURE_COUNT,
                got: features.len(),
            });
        }

        let output = match self {
            RegressionModel::Linear(linear) => {
                let mut acc = linear.intercept;
                for (coefficient, value) in linear.coefficients.iter().zip(features) {
                    acc += coefficient * value;
                }
                acc
            }
            RegressionModel::Forest(forest) => {
                let mut sum = 0.0;
                for (tree_idx, tree) in forest.trees.iter().enumerate() {
                    sum += eval_tree(tree, tree_idx, features)?;
                }
                sum / forest.trees.len() as f64
            }
        };

        if !output.is_finite() {
            return Err(ModelError::NonFiniteOutput { value: output });
        }
        Ok(output)
    }
}

fn eval_tree(tree: &Tree, tree_idx: usize, features: &[f64]) -> ModelResult<f64> {
    let mut index = 0;
    // A well-formed tree terminates within nodes.len() hops; the bound
    // turns an index cycle into an error instead of a hang.
    for _ in 0..tree.nodes.len() {
        match &tree.nodes[index] {
            TreeNode::Leaf { value } => return Ok(*value),
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                index = if features[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
            }
        }
    }
    Err(ModelError::MalformedTree {
        tree: tree_idx,
        node: index,
    })
}

/// Load and validate the model artifact.
pub fn load_model(path: &Path) -> ArtifactResult<RegressionModel> {
    if !path.exists() {
        return Err(ArtifactError::Missing {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let model: RegressionModel = serde_json::from_str(&content)?;
    model.validate()?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> RegressionModel {
        RegressionModel::Linear(LinearModel {
            intercept: 10.0,
            coefficients: vec![1.0, 0.5, 0.2, 2.0, 0.1],
        })
    }

    #[test]
    fn linear_predict() {
        let model = linear();
        model.validate().unwrap();
        let out = model.predict(&[1.0, 2.0, 5.0, 3.0, 10.0]).unwrap();
        assert!((out - (10.0 + 1.0 + 1.0 + 1.0 + 6.0 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn feature_count_is_checked() {
        let model = linear();
        assert!(matches!(
            model.predict(&[1.0, 2.0]),
            Err(ModelError::FeatureCount { expected: 5, got: 2 })
        ));

        let bad = RegressionModel::Linear(LinearModel {
            intercept: 0.0,
            coefficients: vec![1.0; 3],
        });
        assert!(bad.validate().is_err());
    }

    #[test]
    fn forest_predict_averages_trees() {
        let tree = |value: f64| Tree {
            nodes: vec![TreeNode::Leaf { value }],
        };
        let model = RegressionModel::Forest(ForestModel {
            n_features: 5,
            trees: vec![tree(40.0), tree(60.0)],
        });
        model.validate().unwrap();
        let out = model.predict(&[0.0; 5]).unwrap();
        assert_eq!(out, 50.0);
    }

    #[test]
    fn forest_split_routes_by_threshold() {
        let model = RegressionModel::Forest(ForestModel {
            n_features: 5,
            trees: vec![Tree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 3,
                        threshold: 25.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { value: 30.0 },
                    TreeNode::Leaf { value: 120.0 },
                ],
            }],
        });
        model.validate().unwrap();
        assert_eq!(model.predict(&[0.0, 0.0, 0.0, 25.0, 0.0]).unwrap(), 30.0);
        assert_eq!(model.predict(&[0.0, 0.0, 0.0, 25.1, 0.0]).unwrap(), 120.0);
    }

    #[test]
    fn cyclic_tree_is_rejected() {
        let model = RegressionModel::Forest(ForestModel {
            n_features: 5,
            trees: vec![Tree {
                nodes: vec![TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 0,
                }],
            }],
        });
        // Structurally valid indices, but traversal never reaches a leaf.
        model.validate().unwrap();
        assert!(matches!(
            model.predict(&[0.0; 5]),
            Err(ModelError::MalformedTree { .. })
        ));
    }

    #[test]
    fn artifact_roundtrip() {
        let json = serde_json::to_string(&linear()).unwrap();
        let back: RegressionModel = serde_json::from_str(&json).unwrap();
        back.validate().unwrap();
    }
}

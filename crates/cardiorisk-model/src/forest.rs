//! Random forest of decision trees

use crate::classifier::{check_row, Classifier};
use cardiorisk_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of classes every leaf must describe
const NUM_CLASSES: usize = 2;

/// A node of a fitted decision tree.
///
/// Nodes are stored flat; children are referenced by index and always come
/// after their parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TreeNode {
    /// Go `left` when `row[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },

    /// Per-class sample counts or weights reaching this leaf
    Leaf { value: Vec<f64> },
}

/// One fitted decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Check structure and normalise leaf values into distributions
    fn validate(mut self, width: usize) -> Result<Self> {
        let len = self.nodes.len();
        if len == 0 {
            return Err(Error::artifact("decision tree has no nodes"));
        }

        for (idx, node) in self.nodes.iter_mut().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= width {
                        return Err(Error::artifact(format!(
                            "node {} splits on feature {} but the model has {}",
                            idx, feature, width
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(Error::artifact(format!("node {} has a NaN threshold", idx)));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= len {
                            return Err(Error::artifact(format!(
                                "node {} has invalid child index {}",
                                idx, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != NUM_CLASSES {
                        return Err(Error::artifact(format!(
                            "leaf {} has {} classes, expected {}",
                            idx,
                            value.len(),
                            NUM_CLASSES
                        )));
                    }
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(Error::artifact(format!(
                            "leaf {} has negative or non-finite values",
                            idx
                        )));
                    }
                    let total: f64 = value.iter().sum();
                    if total <= 0.0 {
                        return Err(Error::artifact(format!("leaf {} is empty", idx)));
                    }
                    value.iter_mut().for_each(|v| *v /= total);
                }
            }
        }

        Ok(self)
    }

    /// Walk the tree and return the leaf's class distribution
    fn leaf_distribution(&self, row: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

/// Fitted random forest parameters, as stored in a model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestSpec {
    pub trees: Vec<DecisionTree>,
}

/// Forest classifier averaging per-tree class distributions
#[derive(Debug, Clone)]
pub struct RandomForest {
    name: String,
    feature_names: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Build and validate a forest from its artifact parameters
    pub fn new(
        name: impl Into<String>,
        feature_names: Vec<String>,
        spec: RandomForestSpec,
    ) -> Result<Self> {
        if spec.trees.is_empty() {
            return Err(Error::artifact("random forest has no trees"));
        }

        let width = feature_names.len();
        let trees = spec
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, tree)| {
                tree.validate(width).map_err(|e| match e {
                    Error::Artifact(msg) => Error::artifact(format!("tree {}: {}", i, msg)),
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.into(),
            feature_names,
            trees,
        })
    }
}

impl Classifier for RandomForest {
    fn predict(&self, row: &[f64]) -> Result<u8> {
        let proba = self.predict_proba(row)?;
        // ties go to the first class
        Ok(u8::from(proba[1] > proba[0]))
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>> {
        check_row(row, self.feature_names.len())?;

        let mut sum = vec![0.0; NUM_CLASSES];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.leaf_distribution(row)) {
                *acc += p;
            }
        }

        let n = self.trees.len() as f64;
        Ok(sum.into_iter().map(|s| s / n).collect())
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::canonical_feature_names;

    fn stump(feature: usize, threshold: f64, left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf {
                    value: left.to_vec(),
                },
                TreeNode::Leaf {
                    value: right.to_vec(),
                },
            ],
        }
    }

    #[test]
    fn test_single_stump() {
        let forest = RandomForest::new(
            "rf",
            canonical_feature_names(),
            RandomForestSpec {
                trees: vec![stump(11, 0.5, [30.0, 10.0], [5.0, 15.0])],
            },
        )
        .unwrap();

        let mut row = [0.0; 13];
        assert_eq!(forest.predict_proba(&row).unwrap(), vec![0.75, 0.25]);
        assert_eq!(forest.predict(&row).unwrap(), 0);

        // threshold boundary goes left
        row[11] = 0.5;
        assert_eq!(forest.predict(&row).unwrap(), 0);

        row[11] = 2.0;
        assert_eq!(forest.predict_proba(&row).unwrap(), vec![0.25, 0.75]);
        assert_eq!(forest.predict(&row).unwrap(), 1);
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = RandomForest::new(
            "rf",
            canonical_feature_names(),
            RandomForestSpec {
                trees: vec![
                    stump(0, 50.0, [1.0, 0.0], [0.0, 1.0]),
                    stump(4, 250.0, [1.0, 0.0], [1.0, 1.0]),
                ],
            },
        )
        .unwrap();

        let mut row = [0.0; 13];
        row[0] = 63.0;
        row[4] = 233.0;
        // tree 1 -> [0, 1], tree 2 -> [1, 0]
        assert_eq!(forest.predict_proba(&row).unwrap(), vec![0.5, 0.5]);
        assert_eq!(forest.predict(&row).unwrap(), 0);
    }

    #[test]
    fn test_rejects_backward_child() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf {
                    value: vec![1.0, 0.0],
                },
            ],
        };
        let err = RandomForest::new(
            "rf",
            canonical_feature_names(),
            RandomForestSpec { trees: vec![tree] },
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid child index"), "{}", err);
    }

    #[test]
    fn test_rejects_bad_feature_and_leaves() {
        let names = canonical_feature_names;

        let bad_feature = stump(13, 0.0, [1.0, 0.0], [0.0, 1.0]);
        assert!(RandomForest::new("rf", names(), RandomForestSpec { trees: vec![bad_feature] }).is_err());

        let empty_leaf = stump(0, 0.0, [0.0, 0.0], [0.0, 1.0]);
        assert!(RandomForest::new("rf", names(), RandomForestSpec { trees: vec![empty_leaf] }).is_err());

        let negative_leaf = stump(0, 0.0, [-1.0, 2.0], [0.0, 1.0]);
        assert!(RandomForest::new("rf", names(), RandomForestSpec { trees: vec![negative_leaf] }).is_err());

        assert!(RandomForest::new("rf", names(), RandomForestSpec { trees: vec![] }).is_err());
    }

    #[test]
    fn test_tree_from_yaml() {
        let yaml = r#"
trees:
  - nodes:
      - { type: split, feature: 2, threshold: 1.5, left: 1, right: 2 }
      - { type: leaf, value: [8, 2] }
      - { type: leaf, value: [1, 9] }
"#;
        let spec: RandomForestSpec = serde_yaml::from_str(yaml).unwrap();
        let forest = RandomForest::new("rf", canonical_feature_names(), spec).unwrap();

        let mut row = [0.0; 13];
        row[2] = 3.0;
        let proba = forest.predict_proba(&row).unwrap();
        assert!((proba[1] - 0.9).abs() < 1e-12);
    }
}

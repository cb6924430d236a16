//! Gradient Boosted Trees - multiclass softmax boosting
//!
//! Second-order boosting over depth-limited regression trees, one tree per
//! class per round. Split search runs over per-feature histograms whose bin
//! edges are the distinct training values (capped at `MAX_BINS`).

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::classifier::{validate_training_input, Classifier, ModelError};

pub const MAX_BINS: usize = 256;

/// Lower bound on the per-row hessian
const MIN_HESSIAN: f64 = 1e-16;

// ============================================================================
// PARAMETERS
// ============================================================================

/// GBM hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbmParams {
    /// Number of boosting rounds
    pub n_estimators: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Shrinkage applied to every leaf
    pub learning_rate: f64,
    /// Row sampling ratio per round
    pub subsample: f64,
    /// Column sampling ratio per round
    pub colsample_bytree: f64,
    /// Minimum hessian sum in a child
    pub min_child_weight: f64,
    /// Minimum gain to keep a split
    pub gamma: f64,
    /// L1 regularization on leaf weights
    pub reg_alpha: f64,
    /// L2 regularization on leaf weights
    pub reg_lambda: f64,
    pub seed: u64,
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 6,
            learning_rate: 0.3,
            subsample: 1.0,
            colsample_bytree: 1.0,
            min_child_weight: 1.0,
            gamma: 0.0,
            reg_alpha: 0.0,
            reg_lambda: 1.0,
            seed: 42,
        }
    }
}

impl std::fmt::Display for GbmParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n_estimators={} max_depth={} learning_rate={} subsample={} colsample_bytree={} \
             min_child_weight={} gamma={} reg_alpha={} reg_lambda={}",
            self.n_estimators,
            self.max_depth,
            self.learning_rate,
            self.subsample,
            self.colsample_bytree,
            self.min_child_weight,
            self.gamma,
            self.reg_alpha,
            self.reg_lambda
        )
    }
}

// ============================================================================
// TREES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Rows with `x[feature] <= threshold` go left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(Node::Split { feature, threshold, left, right }) => {
                    index = if row[*feature] <= *threshold { *left } else { *right };
                }
                Some(Node::Leaf(value)) => return *value,
                None => return 0.0,
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], index: usize) -> usize {
            match nodes.get(index) {
                Some(Node::Split { left, right, .. }) => 1 + walk(nodes, *left).max(walk(nodes, *right)),
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }

    pub fn leaves(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf(_))).count()
    }
}

// ============================================================================
// BINNING
// ============================================================================

/// Bin edges per feature plus the binned training matrix (column-major)
struct BinnedMatrix {
    edges: Vec<Vec<f64>>,
    bins: Vec<Vec<u16>>,
}

impl BinnedMatrix {
    fn new(x: &Array2<f64>) -> Self {
        let mut edges = Vec::with_capacity(x.ncols());
        let mut bins = Vec::with_capacity(x.ncols());

        for column in x.columns() {
            let mut distinct: Vec<f64> = column.iter().copied().filter(|v| !v.is_nan()).collect();
            distinct.sort_by(f64::total_cmp);
            distinct.dedup();

            let cuts = if distinct.len() > MAX_BINS {
                let last = distinct.len() - 1;
                let mut cuts: Vec<f64> = (0..MAX_BINS)
                    .map(|i| distinct[i * last / (MAX_BINS - 1)])
                    .collect();
                cuts.dedup();
                cuts
            } else {
                distinct
            };

            // Index of the first edge >= value
            let column_bins = column
                .iter()
                .map(|v| cuts.partition_point(|e| e < v).min(cuts.len().saturating_sub(1)) as u16)
                .collect();

            edges.push(cuts);
            bins.push(column_bins);
        }

        Self { edges, bins }
    }
}

// ============================================================================
// MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedTrees {
    params: GbmParams,
    n_classes: usize,
    n_features: usize,
    /// rounds[r][c] is the tree for class c in round r
    rounds: Vec<Vec<Tree>>,
}

impl GradientBoostedTrees {
    pub fn new(params: GbmParams) -> Self {
        Self {
            params,
            n_classes: 0,
            n_features: 0,
            rounds: Vec::new(),
        }
    }

    pub fn params(&self) -> &GbmParams {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        self.n_classes > 0
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_trees(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }

    pub fn rounds(&self) -> &[Vec<Tree>] {
        &self.rounds
    }

    fn raw_margins(&self, row: &[f64]) -> Vec<f64> {
        let mut margins = vec![0.0; self.n_classes];
        for round in &self.rounds {
            for (c, tree) in round.iter().enumerate() {
                margins[c] += tree.predict(row);
            }
        }
        margins
    }
}

impl Classifier for GradientBoostedTrees {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<(), ModelError> {
        validate_training_input(x, y)?;

        let n_rows = x.nrows();
        let n_features = x.ncols();
        let n_classes = y.iter().copied().max().map_or(0, |m| m + 1);
        let p = &self.params;

        log::debug!("Fitting GBM on {} rows x {} features, {} classes: {}", n_rows, n_features, n_classes, p);

        let binned = BinnedMatrix::new(x);
        let x_rows: Vec<Vec<f64>> = x.rows().into_iter().map(|r| r.to_vec()).collect();
        let mut rng = StdRng::seed_from_u64(p.seed);
        let mut margins = Array2::<f64>::zeros((n_rows, n_classes));
        let mut rounds = Vec::with_capacity(p.n_estimators);

        let n_cols = ((p.colsample_bytree * n_features as f64) as usize).clamp(1, n_features);
        let mut grad = vec![0.0; n_rows];
        let mut hess = vec![0.0; n_rows];
        let mut proba = Array2::<f64>::zeros((n_rows, n_classes));

        for _ in 0..p.n_estimators {
            for (i, row) in margins.rows().into_iter().enumerate() {
                for (c, value) in softmax(&row.to_vec()).into_iter().enumerate() {
                    proba[[i, c]] = value;
                }
            }

            let rows = sample_rows(&mut rng, n_rows, p.subsample);
            let features = sample_features(&mut rng, n_features, n_cols);

            let mut round = Vec::with_capacity(n_classes);
            for c in 0..n_classes {
                for i in 0..n_rows {
                    let pi = proba[[i, c]];
                    let target = if y[i] == c { 1.0 } else { 0.0 };
                    grad[i] = pi - target;
                    hess[i] = (2.0 * pi * (1.0 - pi)).max(MIN_HESSIAN);
                }

                let tree = TreeBuilder {
                    params: p,
                    binned: &binned,
                    grad: &grad,
                    hess: &hess,
                    features: &features,
                }
                .build(rows.clone());

                for (i, row) in x_rows.iter().enumerate() {
                    margins[[i, c]] += tree.predict(row);
                }
                round.push(tree);
            }
            rounds.push(round);
        }

        self.n_classes = n_classes;
        self.n_features = n_features;
        self.rounds = rounds;
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        if !self.is_fitted() {
            return Err(ModelError::NotTrained);
        }
        if x.ncols() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                actual: x.ncols(),
            });
        }

        let mut out = Array2::<f64>::zeros((x.nrows(), self.n_classes));
        for (i, row) in x.rows().into_iter().enumerate() {
            let row = row.to_vec();
            for (c, value) in softmax(&self.raw_margins(&row)).into_iter().enumerate() {
                out[[i, c]] = value;
            }
        }
        Ok(out)
    }
}

// ============================================================================
// TREE BUILDING
// ============================================================================

struct TreeBuilder<'a> {
    params: &'a GbmParams,
    binned: &'a BinnedMatrix,
    grad: &'a [f64],
    hess: &'a [f64],
    features: &'a [usize],
}

struct BestSplit {
    gain: f64,
    feature: usize,
    bin: u16,
}

impl TreeBuilder<'_> {
    fn build(&self, rows: Vec<usize>) -> Tree {
        let mut tree = Tree::default();
        self.grow(&mut tree, rows, 0);
        tree
    }

    fn grow(&self, tree: &mut Tree, rows: Vec<usize>, depth: usize) -> usize {
        let g: f64 = rows.iter().map(|&i| self.grad[i]).sum();
        let h: f64 = rows.iter().map(|&i| self.hess[i]).sum();
        let index = tree.nodes.len();

        let split = if depth < self.params.max_depth && rows.len() > 1 {
            self.best_split(&rows, g, h)
        } else {
            None
        };

        let Some(split) = split else {
            tree.nodes.push(Node::Leaf(self.leaf_weight(g, h)));
            return index;
        };

        let column = &self.binned.bins[split.feature];
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            rows.into_iter().partition(|&i| column[i] <= split.bin);

        // Placeholder until children are placed
        tree.nodes.push(Node::Leaf(0.0));
        let left = self.grow(tree, left_rows, depth + 1);
        let right = self.grow(tree, right_rows, depth + 1);
        tree.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: self.binned.edges[split.feature][split.bin as usize],
            left,
            right,
        };
        index
    }

    fn best_split(&self, rows: &[usize], g: f64, h: f64) -> Option<BestSplit> {
        let p = self.params;
        let parent = self.gain_term(g, h);
        let mut best: Option<BestSplit> = None;

        for &feature in self.features {
            let n_bins = self.binned.edges[feature].len();
            if n_bins < 2 {
                continue;
            }

            let column = &self.binned.bins[feature];
            let mut hist_g = vec![0.0; n_bins];
            let mut hist_h = vec![0.0; n_bins];
            for &i in rows {
                let b = column[i] as usize;
                hist_g[b] += self.grad[i];
                hist_h[b] += self.hess[i];
            }

            let (mut gl, mut hl) = (0.0, 0.0);
            for b in 0..n_bins - 1 {
                gl += hist_g[b];
                hl += hist_h[b];
                let (gr, hr) = (g - gl, h - hl);
                if hl < p.min_child_weight || hr < p.min_child_weight {
                    continue;
                }

                let gain = 0.5 * (self.gain_term(gl, hl) + self.gain_term(gr, hr) - parent) - p.gamma;
                if gain > 0.0 && best.as_ref().map_or(true, |s| gain > s.gain) {
                    best = Some(BestSplit { gain, feature, bin: b as u16 });
                }
            }
        }

        best
    }

    fn gain_term(&self, g: f64, h: f64) -> f64 {
        let t = soft_threshold(g, self.params.reg_alpha);
        t * t / (h + self.params.reg_lambda)
    }

    fn leaf_weight(&self, g: f64, h: f64) -> f64 {
        let denom = h + self.params.reg_lambda;
        if denom <= 0.0 {
            return 0.0;
        }
        -soft_threshold(g, self.params.reg_alpha) / denom * self.params.learning_rate
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn soft_threshold(g: f64, alpha: f64) -> f64 {
    if g > alpha {
        g - alpha
    } else if g < -alpha {
        g + alpha
    } else {
        0.0
    }
}

pub fn softmax(margins: &[f64]) -> Vec<f64> {
    let max = margins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = margins.iter().map(|m| (m - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Bernoulli row sample; never empty
fn sample_rows(rng: &mut StdRng, n_rows: usize, ratio: f64) -> Vec<usize> {
    if ratio >= 1.0 {
        return (0..n_rows).collect();
    }
    let rows: Vec<usize> = (0..n_rows).filter(|_| rng.gen_bool(ratio.max(0.0))).collect();
    if rows.is_empty() {
        (0..n_rows).collect()
    } else {
        rows
    }
}

fn sample_features(rng: &mut StdRng, n_features: usize, n_cols: usize) -> Vec<usize> {
    let mut features: Vec<usize> = (0..n_features).collect();
    if n_cols < n_features {
        features.shuffle(rng);
        features.truncate(n_cols);
        features.sort_unstable();
    }
    features
}

// ============================================================================
// TESTS
// ============================================================================

//! Pruning
//!
//! Validation driven post pruning. Starting at the root, each child subtree is
//! detached and the tree rescored; the removal is kept when the validation
//! score does not drop, otherwise the subtree is restored and pruned in turn.
//! A node left without children becomes a leaf, predicting the majority class
//! of the training rows that still reach it.
use crate::constants::{PRUNE_LOG_NODE_COUNT, PRUNE_LOG_SCORE_DELTA, UNDEFINED_CLASS};
use crate::data::Dataset;
use crate::node::Node;
use crate::tree::{Tree, ROOT_NODE};
use crate::utils::first_max_index;
use log::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Branch {
    Lesser,
    Greater,
}

impl Tree {
    /// Prune the whole tree against `validation`.
    ///
    /// * `training` - The data set the tree was grown on, used to re-label new leaves.
    /// * `validation` - Labelled data used to accept or reject each removal.
    ///
    /// Returns the number of nodes removed.
    pub fn prune(&mut self, training: &Dataset, validation: &Dataset) -> usize {
        self.prune_node(ROOT_NODE, training, validation)
    }

    fn prune_node(&mut self, node_idx: usize, training: &Dataset, validation: &Dataset) -> usize {
        // The lesser side is resolved first, so its outcome changes the
        // baseline the greater side is compared against.
        let removed = self.prune_branch(node_idx, Branch::Lesser, training, validation)
            + self.prune_branch(node_idx, Branch::Greater, training, validation);

        let needs_label = self
            .nodes
            .get(&node_idx)
            .map_or(false, |n| !n.is_leaf && !n.has_children());
        if needs_label {
            let prediction = self.guess_node_class(node_idx, training);
            // An undefined class is left off the node, it would not survive a JSON round trip.
            if prediction.is_nan() {
                warn!("node {} has no children and no class to predict", node_idx);
            } else if let Some(node) = self.nodes.get_mut(&node_idx) {
                debug!("node {} is now a leaf predicting {}", node_idx, prediction);
                node.make_leaf(prediction);
            }
        }
        removed
    }

    fn prune_branch(&mut self, node_idx: usize, branch: Branch, training: &Dataset, validation: &Dataset) -> usize {
        let child_idx = match self.nodes.get(&node_idx).and_then(|n| self.child(n, branch)) {
            Some(c) => c,
            None => return 0,
        };

        let baseline = self.score(validation);
        self.set_child(node_idx, branch, None);
        let pruned_score = self.score(validation);

        if pruned_score >= baseline {
            let removed = self.remove_children(child_idx);
            let diff = pruned_score - baseline;
            if diff > PRUNE_LOG_SCORE_DELTA || removed > PRUNE_LOG_NODE_COUNT {
                info!("Improved score by {:.4}, dropped {} nodes", diff, removed);
            }
            removed
        } else {
            self.set_child(node_idx, branch, Some(child_idx));
            self.prune_node(child_idx, training, validation)
        }
    }

    fn child(&self, node: &Node, branch: Branch) -> Option<usize> {
        match branch {
            Branch::Lesser => node.left_child,
            Branch::Greater => node.right_child,
        }
    }

    fn set_child(&mut self, node_idx: usize, branch: Branch, child: Option<usize>) {
        if let Some(node) = self.nodes.get_mut(&node_idx) {
            match branch {
                Branch::Lesser => node.left_child = child,
                Branch::Greater => node.right_child = child,
            }
        }
    }

    /// Majority class of the training rows that would reach `node_idx`.
    ///
    /// A row reaches the node when, at every ancestor on the path up to the
    /// root, its value on the ancestor's split feature falls on the side the
    /// path takes. Ties go to the class seen first in the training data.
    pub fn guess_node_class(&self, node_idx: usize, training: &Dataset) -> f32 {
        let node = match self.nodes.get(&node_idx) {
            Some(n) => n,
            None => {
                warn!("Can't guess class of node {}, it is not part of the tree", node_idx);
                return UNDEFINED_CLASS;
            }
        };
        if node.has_children() {
            warn!("Can't guess class of non-leaf node {}", node_idx);
            return UNDEFINED_CLASS;
        }
        if node.is_leaf {
            return node.prediction_value;
        }

        // (child, parent) pairs from the node up to the root.
        let mut path: Vec<(&Node, &Node)> = Vec::with_capacity(node.depth);
        let mut current = node;
        while let Some(parent_idx) = current.parent_node {
            match self.nodes.get(&parent_idx) {
                Some(parent) => {
                    path.push((current, parent));
                    current = parent;
                }
                None => break,
            }
        }
        if current.num != ROOT_NODE || current.parent_node.is_some() {
            warn!("Failed to find the root when guessing the class of node {}", node_idx);
            return UNDEFINED_CLASS;
        }

        let labels = match training.labels() {
            Some(y) => y,
            None => {
                warn!("Guessing the class of node {} requires labelled training data", node_idx);
                return UNDEFINED_CLASS;
            }
        };

        let mut counts: Vec<(f32, usize)> = training.classes().into_iter().map(|c| (c, 0)).collect();
        let mut reached = 0;
        for (i, y) in labels.iter().enumerate() {
            let row = training.row(i);
            let reaches = path.iter().all(|(child, parent)| {
                row.get(parent.split_feature)
                    .map_or(false, |v| child.accepts(parent, *v))
            });
            if reaches {
                reached += 1;
                if let Some((_, n)) = counts.iter_mut().find(|(c, _)| c == y) {
                    *n += 1;
                }
            }
        }
        if reached == 0 {
            warn!("No training rows reach node {}, using the first class", node_idx);
        }

        let n: Vec<usize> = counts.iter().map(|(_, n)| *n).collect();
        first_max_index(&n).map_or(UNDEFINED_CLASS, |i| counts[i].0)
    }
}

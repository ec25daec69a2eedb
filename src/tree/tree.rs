use crate::constants::UNDEFINED_CLASS;
use crate::data::Dataset;
use crate::node::{Node, NodeType};
use crate::splitter::{SplitInfo, Splitter};
use hashbrown::HashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::fmt::{self, Display};

/// Index of the root in the node map.
pub const ROOT_NODE: usize = 0;

/// Binary decision tree stored as a map of nodes keyed by their number.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Tree {
    pub nodes: HashMap<usize, Node>,
    pub depth: usize,
    next_num: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A tree holding only an untrained root.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_NODE, Node::new(ROOT_NODE, 0, NodeType::Root, None));
        Tree {
            nodes,
            depth: 0,
            next_num: ROOT_NODE + 1,
        }
    }

    /// Grow the tree on a labelled data set, replacing any previous structure.
    /// Returns the number of nodes created.
    pub fn fit<S: Splitter>(&mut self, data: &Dataset, splitter: &S) -> usize {
        *self = Tree::new();
        self.split_node(ROOT_NODE, data, 0, splitter)
    }

    /// Recursively split `node_idx` until every population is pure.
    fn split_node<S: Splitter>(&mut self, node_idx: usize, data: &Dataset, depth: usize, splitter: &S) -> usize {
        if data.is_empty() {
            warn!("No rows left in training set at node {}", node_idx);
            return 0;
        }
        self.depth = max(self.depth, depth);

        if data.is_pure() {
            if let Some(node) = self.nodes.get_mut(&node_idx) {
                node.make_leaf(data.label(0).unwrap_or(UNDEFINED_CLASS));
            }
            return 1;
        }

        let split_info = match splitter.best_split(data) {
            Some(s) => s,
            None => {
                // Identical feature rows with conflicting labels.
                let majority = data.majority_class().unwrap_or(UNDEFINED_CLASS);
                debug!(
                    "node {} cannot be split ({} rows), predicting {}",
                    node_idx,
                    data.rows(),
                    majority
                );
                if let Some(node) = self.nodes.get_mut(&node_idx) {
                    node.make_leaf(majority);
                }
                return 1;
            }
        };

        if let Some(node) = self.nodes.get_mut(&node_idx) {
            node.make_parent_node(&split_info);
        }
        let SplitInfo { lesser, greater, .. } = split_info;

        let mut n_nodes = 1;
        if !lesser.is_empty() {
            let child = self.add_child(node_idx, NodeType::Lesser, depth + 1);
            n_nodes += self.split_node(child, &lesser, depth + 1, splitter);
        }
        drop(lesser);
        if !greater.is_empty() {
            let child = self.add_child(node_idx, NodeType::Greater, depth + 1);
            n_nodes += self.split_node(child, &greater, depth + 1, splitter);
        }
        n_nodes
    }

    fn add_child(&mut self, parent: usize, node_type: NodeType, depth: usize) -> usize {
        let num = self.next_num;
        self.next_num += 1;
        self.nodes.insert(num, Node::new(num, depth, node_type, Some(parent)));
        if let Some(p) = self.nodes.get_mut(&parent) {
            match node_type {
                NodeType::Greater => p.right_child = Some(num),
                _ => p.left_child = Some(num),
            }
        }
        num
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(&ROOT_NODE)
    }

    /// Drop a node and everything below it from the map.
    /// Returns the number of nodes removed.
    pub fn remove_children(&mut self, node_idx: usize) -> usize {
        match self.nodes.remove(&node_idx) {
            Some(removed_node) => {
                1 + removed_node.left_child.map_or(0, |c| self.remove_children(c))
                    + removed_node.right_child.map_or(0, |c| self.remove_children(c))
            }
            None => 0,
        }
    }

    /// Number of nodes reachable from `node_idx`, including itself.
    pub fn count_nodes(&self, node_idx: usize) -> usize {
        match self.nodes.get(&node_idx) {
            Some(node) => {
                1 + node.left_child.map_or(0, |c| self.count_nodes(c))
                    + node.right_child.map_or(0, |c| self.count_nodes(c))
            }
            None => 0,
        }
    }

    /// Number of nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        self.count_nodes(ROOT_NODE)
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.values().filter(|n| n.is_leaf).count()
    }
}

impl Display for Tree {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut print_buffer: Vec<usize> = vec![ROOT_NODE];
        let mut r = String::new();
        while let Some(idx) = print_buffer.pop() {
            let node = match self.nodes.get(&idx) {
                Some(n) => n,
                None => continue,
            };
            r += format!("{}{}\n", "      ".repeat(node.depth).as_str(), node).as_str();
            if !node.is_leaf {
                if let Some(right) = node.right_child {
                    print_buffer.push(right);
                }
                if let Some(left) = node.left_child {
                    print_buffer.push(left);
                }
            }
        }
        write!(f, "{}", r)
    }
}

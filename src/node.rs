use crate::splitter::SplitInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which branch of its parent a node hangs from.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum NodeType {
    Root,
    /// Reached when `value < split_value` at the parent.
    Lesser,
    /// Reached when `value >= split_value` at the parent.
    Greater,
}

/// A tree node. Children and parent are indices into the owning tree's node map,
/// the parent link is only ever followed upwards.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Node {
    pub num: usize,
    pub depth: usize,
    pub is_leaf: bool,
    pub split_feature: usize,
    pub split_value: f32,
    pub prediction_value: f32,
    pub node_type: NodeType,
    pub left_child: Option<usize>,
    pub right_child: Option<usize>,
    pub parent_node: Option<usize>,
}

impl Node {
    /// A fresh internal node without a split rule or children.
    pub fn new(num: usize, depth: usize, node_type: NodeType, parent_node: Option<usize>) -> Self {
        Node {
            num,
            depth,
            is_leaf: false,
            split_feature: 0,
            split_value: 0.0,
            prediction_value: 0.0,
            node_type,
            left_child: None,
            right_child: None,
            parent_node,
        }
    }

    pub fn is_lesser_child(&self) -> bool {
        self.node_type == NodeType::Lesser
    }

    pub fn has_children(&self) -> bool {
        self.left_child.is_some() || self.right_child.is_some()
    }

    pub fn make_leaf(&mut self, prediction_value: f32) {
        self.is_leaf = true;
        self.prediction_value = prediction_value;
    }

    /// Record the split rule; children are attached by the tree.
    pub fn make_parent_node(&mut self, split_info: &SplitInfo) {
        self.is_leaf = false;
        self.split_feature = split_info.split_feature;
        self.split_value = split_info.split_value;
    }

    /// Whether `v` satisfies the branch this node hangs from, given the parent's rule.
    pub fn accepts(&self, parent: &Node, v: f32) -> bool {
        match self.node_type {
            NodeType::Root => true,
            NodeType::Lesser => v < parent.split_value,
            NodeType::Greater => v >= parent.split_value,
        }
    }

    /// Get the child to travel down to. A missing child falls back to its
    /// sibling; `None` when the node has no children at all.
    pub fn get_child_idx(&self, v: f32) -> Option<usize> {
        if v < self.split_value {
            self.left_child.or(self.right_child)
        } else {
            self.right_child.or(self.left_child)
        }
    }
}

impl fmt::Display for Node {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_leaf {
            write!(f, "{}:leaf={}", self.num, self.prediction_value)
        } else {
            let fmt_child = |c: Option<usize>| c.map_or("-".to_string(), |c| c.to_string());
            write!(
                f,
                "{}:[{} < {}] yes={},no={}",
                self.num,
                self.split_feature,
                self.split_value,
                fmt_child(self.left_child),
                fmt_child(self.right_child),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_fallback() {
        let mut n = Node::new(0, 0, NodeType::Root, None);
        n.split_value = 5.0;
        assert_eq!(n.get_child_idx(1.0), None);

        n.right_child = Some(2);
        assert_eq!(n.get_child_idx(1.0), Some(2));
        assert_eq!(n.get_child_idx(7.0), Some(2));

        n.left_child = Some(1);
        assert_eq!(n.get_child_idx(1.0), Some(1));
        assert_eq!(n.get_child_idx(5.0), Some(2));

        n.right_child = None;
        assert_eq!(n.get_child_idx(7.0), Some(1));
    }

    #[test]
    fn test_accepts() {
        let mut parent = Node::new(0, 0, NodeType::Root, None);
        parent.split_value = 5.0;
        let lesser = Node::new(1, 1, NodeType::Lesser, Some(0));
        let greater = Node::new(2, 1, NodeType::Greater, Some(0));
        assert!(lesser.accepts(&parent, 4.9));
        assert!(!lesser.accepts(&parent, 5.0));
        assert!(greater.accepts(&parent, 5.0));
        assert!(!greater.accepts(&parent, 4.9));
        assert!(lesser.is_lesser_child());
    }

    #[test]
    fn test_display() {
        let mut n = Node::new(0, 0, NodeType::Root, None);
        n.split_value = 2.5;
        n.left_child = Some(1);
        assert_eq!(n.to_string(), "0:[0 < 2.5] yes=1,no=-");
        n.make_leaf(1.0);
        assert_eq!(n.to_string(), "0:leaf=1");
    }
}

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::types::DocId;

/// A node keyed by a numeric value; the payload is every document whose
/// field equals that key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvlNode {
    pub key: f64,
    pub docs: Vec<DocId>,
    height: i32,
    left: Option<Box<AvlNode>>,
    right: Option<Box<AvlNode>>,
}

impl AvlNode {
    fn new(key: f64, doc_id: DocId) -> Box<AvlNode> {
        Box::new(AvlNode {
            key,
            docs: vec![doc_id],
            height: 1,
            left: None,
            right: None,
        })
    }
}

/// Numeric index: self-balancing BST with equality and range lookups.
///
/// Keys are ordered with `f64::total_cmp`, so NaN inserts are well-defined
/// even though the engine never produces them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvlTree {
    root: Option<Box<AvlNode>>,
}

impl AvlTree {
    pub fn new() -> Self {
        AvlTree { root: None }
    }

    /// Insert `doc_id` under `key`; equal keys append to the existing
    /// node's payload instead of creating a new node.
    pub fn insert(&mut self, key: f64, doc_id: DocId) {
        self.root = Some(Self::insert_node(self.root.take(), key, doc_id));
    }

    fn insert_node(node: Option<Box<AvlNode>>, key: f64, doc_id: DocId) -> Box<AvlNode> {
        let Some(mut n) = node else {
            return AvlNode::new(key, doc_id);
        };

        match key.total_cmp(&n.key) {
            Ordering::Equal => {
                if !n.docs.contains(&doc_id) {
                    n.docs.push(doc_id);
                }
                n
            }
            Ordering::Less => {
                n.left = Some(Self::insert_node(n.left.take(), key, doc_id));
                Self::rebalance(n)
            }
            Ordering::Greater => {
                n.right = Some(Self::insert_node(n.right.take(), key, doc_id));
                Self::rebalance(n)
            }
        }
    }

    pub fn find(&self, key: f64) -> Option<&[DocId]> {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            match key.total_cmp(&n.key) {
                Ordering::Equal => return Some(&n.docs),
                Ordering::Less => node = n.left.as_deref(),
                Ordering::Greater => node = n.right.as_deref(),
            }
        }
        None
    }

    /// Ids with key greater than (or equal to, if `inclusive`) `key`.
    pub fn greater_than(&self, key: f64, inclusive: bool) -> Vec<DocId> {
        let mut out = Vec::new();
        Self::collect_greater(self.root.as_deref(), key, inclusive, &mut out);
        out
    }

    fn collect_greater(node: Option<&AvlNode>, key: f64, inclusive: bool, out: &mut Vec<DocId>) {
        let Some(n) = node else { return };
        let qualifies = match n.key.total_cmp(&key) {
            Ordering::Greater => true,
            Ordering::Equal => inclusive,
            Ordering::Less => false,
        };
        if qualifies {
            Self::collect_greater(n.left.as_deref(), key, inclusive, out);
            out.extend_from_slice(&n.docs);
        }
        // Anything left of a non-qualifying node is smaller still.
        Self::collect_greater(n.right.as_deref(), key, inclusive, out);
    }

    /// Ids with key less than (or equal to, if `inclusive`) `key`.
    pub fn less_than(&self, key: f64, inclusive: bool) -> Vec<DocId> {
        let mut out = Vec::new();
        Self::collect_less(self.root.as_deref(), key, inclusive, &mut out);
        out
    }

    fn collect_less(node: Option<&AvlNode>, key: f64, inclusive: bool, out: &mut Vec<DocId>) {
        let Some(n) = node else { return };
        let qualifies = match n.key.total_cmp(&key) {
            Ordering::Less => true,
            Ordering::Equal => inclusive,
            Ordering::Greater => false,
        };
        Self::collect_less(n.left.as_deref(), key, inclusive, out);
        if qualifies {
            out.extend_from_slice(&n.docs);
            Self::collect_less(n.right.as_deref(), key, inclusive, out);
        }
    }

    /// Ids with `min <= key <= max`. An inverted range is empty.
    pub fn range_search(&self, min: f64, max: f64) -> Vec<DocId> {
        if min > max {
            return Vec::new();
        }
        let mut out = Vec::new();
        Self::collect_range(self.root.as_deref(), min, max, &mut out);
        out
    }

    fn collect_range(node: Option<&AvlNode>, min: f64, max: f64, out: &mut Vec<DocId>) {
        let Some(n) = node else { return };
        if n.key.total_cmp(&min) != Ordering::Less {
            Self::collect_range(n.left.as_deref(), min, max, out);
        }
        if n.key.total_cmp(&min) != Ordering::Less && n.key.total_cmp(&max) != Ordering::Greater {
            out.extend_from_slice(&n.docs);
        }
        if n.key.total_cmp(&max) != Ordering::Greater {
            Self::collect_range(n.right.as_deref(), min, max, out);
        }
    }

    /// Remove `doc_id` from the node holding `key`; the node itself is
    /// deleted (with rebalancing) once its payload empties.
    pub fn remove_document(&mut self, doc_id: DocId, key: f64) -> bool {
        let emptied = {
            let Some(node) = Self::find_node_mut(self.root.as_deref_mut(), key) else {
                return false;
            };
            let before = node.docs.len();
            node.docs.retain(|d| *d != doc_id);
            if node.docs.len() == before {
                return false;
            }
            node.docs.is_empty()
        };

        if emptied {
            self.root = Self::remove_node(self.root.take(), key);
        }
        true
    }

    fn find_node_mut(node: Option<&mut AvlNode>, key: f64) -> Option<&mut AvlNode> {
        let mut node = node;
        while let Some(n) = node {
            match key.total_cmp(&n.key) {
                Ordering::Equal => return Some(n),
                Ordering::Less => node = n.left.as_deref_mut(),
                Ordering::Greater => node = n.right.as_deref_mut(),
            }
        }
        None
    }

    fn remove_node(node: Option<Box<AvlNode>>, key: f64) -> Option<Box<AvlNode>> {
        let mut n = node?;
        match key.total_cmp(&n.key) {
            Ordering::Less => {
                n.left = Self::remove_node(n.left.take(), key);
                Some(Self::rebalance(n))
            }
            Ordering::Greater => {
                n.right = Self::remove_node(n.right.take(), key);
                Some(Self::rebalance(n))
            }
            Ordering::Equal => match (n.left.take(), n.right.take()) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    // Replace with the in-order successor.
                    let (mut successor, rest) = Self::take_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(Self::rebalance(successor))
                }
            },
        }
    }

    fn take_min(mut node: Box<AvlNode>) -> (Box<AvlNode>, Option<Box<AvlNode>>) {
        match node.left.take() {
            None => {
                let right = node.right.take();
                (node, right)
            }
            Some(left) => {
                let (min, rest) = Self::take_min(left);
                node.left = rest;
                (min, Some(Self::rebalance(node)))
            }
        }
    }

    fn height(node: &Option<Box<AvlNode>>) -> i32 {
        node.as_ref().map(|n| n.height).unwrap_or(0)
    }

    fn balance_factor(node: &AvlNode) -> i32 {
        Self::height(&node.left) - Self::height(&node.right)
    }

    fn update_height(node: &mut AvlNode) {
        node.height = 1 + Self::height(&node.left).max(Self::height(&node.right));
    }

    fn rebalance(mut node: Box<AvlNode>) -> Box<AvlNode> {
        Self::update_height(&mut node);
        let balance = Self::balance_factor(&node);

        if balance > 1 {
            if Self::balance_factor(node.left.as_ref().unwrap()) < 0 {
                node.left = Some(Self::rotate_left(node.left.take().unwrap()));
            }
            return Self::rotate_right(node);
        }
        if balance < -1 {
            if Self::balance_factor(node.right.as_ref().unwrap()) > 0 {
                node.right = Some(Self::rotate_right(node.right.take().unwrap()));
            }
            return Self::rotate_left(node);
        }
        node
    }

    fn rotate_right(mut node: Box<AvlNode>) -> Box<AvlNode> {
        let mut left = node.left.take().unwrap();
        node.left = left.right.take();
        Self::update_height(&mut node);
        left.right = Some(node);
        Self::update_height(&mut left);
        left
    }

    fn rotate_left(mut node: Box<AvlNode>) -> Box<AvlNode> {
        let mut right = node.right.take().unwrap();
        node.right = right.left.take();
        Self::update_height(&mut node);
        right.left = Some(node);
        Self::update_height(&mut right);
        right
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(entries: &[(f64, u32)]) -> AvlTree {
        let mut tree = AvlTree::new();
        for (key, id) in entries {
            tree.insert(*key, DocId(*id));
        }
        tree
    }

    fn assert_balanced(node: Option<&AvlNode>) -> i32 {
        let Some(n) = node else { return 0 };
        let lh = assert_balanced(n.left.as_deref());
        let rh = assert_balanced(n.right.as_deref());
        assert!((lh - rh).abs() <= 1, "unbalanced at key {}", n.key);
        1 + lh.max(rh)
    }

    #[test]
    fn stays_balanced_under_sequential_inserts() {
        let mut t = AvlTree::new();
        for i in 0..128 {
            t.insert(i as f64, DocId(i + 1));
        }
        let height = assert_balanced(t.root.as_deref());
        assert!(height <= 9, "height {} too large for 128 keys", height);
    }

    #[test]
    fn equal_keys_share_a_node() {
        let t = tree(&[(10.0, 1), (10.0, 2), (10.0, 2)]);
        assert_eq!(t.find(10.0).unwrap(), &[DocId(1), DocId(2)]);
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let t = tree(&[(10.0, 1), (20.0, 2), (30.0, 3), (40.0, 4), (50.0, 5)]);
        let ids = t.range_search(20.0, 40.0);
        assert_eq!(ids, vec![DocId(2), DocId(3), DocId(4)]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let t = tree(&[(10.0, 1), (20.0, 2)]);
        assert!(t.range_search(30.0, 10.0).is_empty());
    }

    #[test]
    fn half_open_traversals() {
        let t = tree(&[(1.0, 1), (2.0, 2), (3.0, 3), (4.0, 4)]);
        assert_eq!(t.greater_than(2.0, false), vec![DocId(3), DocId(4)]);
        assert_eq!(t.greater_than(2.0, true), vec![DocId(2), DocId(3), DocId(4)]);
        assert_eq!(t.less_than(3.0, false), vec![DocId(1), DocId(2)]);
        assert_eq!(t.less_than(3.0, true), vec![DocId(1), DocId(2), DocId(3)]);
    }

    #[test]
    fn removing_last_id_deletes_the_node() {
        let mut t = tree(&[(10.0, 1), (20.0, 2), (30.0, 3)]);
        assert!(t.remove_document(DocId(2), 20.0));
        assert!(t.find(20.0).is_none());
        assert_eq!(t.range_search(0.0, 100.0), vec![DocId(1), DocId(3)]);
        assert_balanced(t.root.as_deref());
    }

    #[test]
    fn removing_one_of_many_keeps_the_node() {
        let mut t = tree(&[(10.0, 1), (10.0, 2)]);
        assert!(t.remove_document(DocId(1), 10.0));
        assert_eq!(t.find(10.0).unwrap(), &[DocId(2)]);
    }

    #[test]
    fn remove_of_unknown_key_or_id_is_false() {
        let mut t = tree(&[(10.0, 1)]);
        assert!(!t.remove_document(DocId(1), 99.0));
        assert!(!t.remove_document(DocId(9), 10.0));
    }

    #[test]
    fn delete_rebalances_a_long_spine() {
        let mut t = AvlTree::new();
        for i in 0..64 {
            t.insert(i as f64, DocId(i + 1));
        }
        for i in 0..32 {
            assert!(t.remove_document(DocId(i + 1), i as f64));
        }
        assert_balanced(t.root.as_deref());
        assert_eq!(t.range_search(0.0, 31.0), Vec::<DocId>::new());
        assert_eq!(t.find(32.0).unwrap(), &[DocId(33)]);
    }
}

//! Bounded set of borrowed names.
//!
//! Telephone parameter lists reject repeated names. [`NameSet`] records every
//! name seen so far in a red-black tree whose nodes live in a single arena
//! and refer to each other by index. Keys borrow from the parsed input and
//! are compared byte-wise.

use std::cmp::Ordering;
use std::fmt;

const PREALLOCATED_NODES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy)]
struct Node<'a> {
    key: &'a [u8],
    color: Color,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Why a name could not be added to a [`NameSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertError {
    /// The name is already present.
    Duplicate,
    /// The set holds as many names as its capacity allows.
    Full,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate => write!(f, "name already present"),
            Self::Full => write!(f, "name set is full"),
        }
    }
}

impl std::error::Error for InsertError {}

/// A set of byte-string names with a fixed maximum size.
///
/// # Examples
///
/// ```
/// use uri_pathfinder::{InsertError, NameSet};
///
/// let mut names = NameSet::with_capacity(2);
/// assert_eq!(names.insert(b"ext"), Ok(()));
/// assert_eq!(names.insert(b"ext"), Err(InsertError::Duplicate));
/// assert_eq!(names.insert(b"isub"), Ok(()));
/// assert_eq!(names.insert(b"foo"), Err(InsertError::Full));
/// ```
#[derive(Debug, Clone)]
pub struct NameSet<'a> {
    nodes: Vec<Node<'a>>,
    root: Option<usize>,
    capacity: usize,
}

impl<'a> NameSet<'a> {
    /// Creates an empty set that holds at most `capacity` names.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity.min(PREALLOCATED_NODES)),
            root: None,
            capacity,
        }
    }

    /// Returns the number of names in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the set holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the maximum number of names the set can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if `key` is in the set.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.search(key).is_ok()
    }

    /// Adds `key` to the set.
    ///
    /// A duplicate is reported even when the set is full.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::Duplicate`] if `key` is already present and
    /// [`InsertError::Full`] if the set is at capacity.
    pub fn insert(&mut self, key: &'a [u8]) -> Result<(), InsertError> {
        let Err(slot) = self.search(key) else {
            return Err(InsertError::Duplicate);
        };
        if self.nodes.len() >= self.capacity {
            return Err(InsertError::Full);
        }

        let index = self.nodes.len();
        self.nodes.push(Node {
            key,
            color: Color::Red,
            parent: slot.map(|(parent, _)| parent),
            left: None,
            right: None,
        });
        match slot {
            None => self.root = Some(index),
            Some((parent, Ordering::Less)) => self.nodes[parent].left = Some(index),
            Some((parent, _)) => self.nodes[parent].right = Some(index),
        }
        self.rebalance(index);
        Ok(())
    }

    /// Finds `key`, or the node a new leaf for it would hang from.
    fn search(&self, key: &[u8]) -> Result<usize, Option<(usize, Ordering)>> {
        let mut current = self.root;
        let mut slot = None;
        while let Some(index) = current {
            let node = &self.nodes[index];
            let ordering = key.cmp(node.key);
            current = match ordering {
                Ordering::Equal => return Ok(index),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            slot = Some((index, ordering));
        }
        Err(slot)
    }

    fn color(&self, index: Option<usize>) -> Color {
        index.map_or(Color::Black, |index| self.nodes[index].color)
    }

    fn rebalance(&mut self, mut node: usize) {
        while let Some(mut parent) = self.nodes[node].parent {
            if self.nodes[parent].color == Color::Black {
                break;
            }
            // A red node is never the root.
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };
            let parent_is_left = self.nodes[grandparent].left == Some(parent);
            let uncle = if parent_is_left {
                self.nodes[grandparent].right
            } else {
                self.nodes[grandparent].left
            };

            if self.color(uncle) == Color::Red {
                self.nodes[parent].color = Color::Black;
                if let Some(uncle) = uncle {
                    self.nodes[uncle].color = Color::Black;
                }
                self.nodes[grandparent].color = Color::Red;
                node = grandparent;
            } else if parent_is_left {
                if self.nodes[parent].right == Some(node) {
                    self.rotate_left(parent);
                    std::mem::swap(&mut node, &mut parent);
                }
                self.nodes[parent].color = Color::Black;
                self.nodes[grandparent].color = Color::Red;
                self.rotate_right(grandparent);
            } else {
                if self.nodes[parent].left == Some(node) {
                    self.rotate_right(parent);
                    std::mem::swap(&mut node, &mut parent);
                }
                self.nodes[parent].color = Color::Black;
                self.nodes[grandparent].color = Color::Red;
                self.rotate_left(grandparent);
            }
        }
        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    fn rotate_left(&mut self, pivot: usize) {
        let Some(child) = self.nodes[pivot].right else {
            return;
        };
        let inner = self.nodes[child].left;
        self.nodes[pivot].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }
        self.replace_child(pivot, child);
        self.nodes[child].left = Some(pivot);
        self.nodes[pivot].parent = Some(child);
    }

    fn rotate_right(&mut self, pivot: usize) {
        let Some(child) = self.nodes[pivot].left else {
            return;
        };
        let inner = self.nodes[child].right;
        self.nodes[pivot].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }
        self.replace_child(pivot, child);
        self.nodes[child].right = Some(pivot);
        self.nodes[pivot].parent = Some(child);
    }

    /// Puts `new` where `old` hangs from its parent (or at the root).
    fn replace_child(&mut self, old: usize, new: usize) {
        let parent = self.nodes[old].parent;
        self.nodes[new].parent = parent;
        match parent {
            None => self.root = Some(new),
            Some(parent) if self.nodes[parent].left == Some(old) => {
                self.nodes[parent].left = Some(new);
            }
            Some(parent) => self.nodes[parent].right = Some(new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks the red-black properties and returns the tree's black height.
    fn check_invariants(set: &NameSet<'_>) -> usize {
        if let Some(root) = set.root {
            assert_eq!(set.nodes[root].color, Color::Black, "root must be black");
            assert_eq!(set.nodes[root].parent, None);
        }
        check_subtree(set, set.root, None, None)
    }

    fn check_subtree(
        set: &NameSet<'_>,
        index: Option<usize>,
        low: Option<&[u8]>,
        high: Option<&[u8]>,
    ) -> usize {
        let Some(index) = index else {
            return 1;
        };
        let node = &set.nodes[index];
        if let Some(low) = low {
            assert!(node.key > low, "keys out of order");
        }
        if let Some(high) = high {
            assert!(node.key < high, "keys out of order");
        }
        for child in [node.left, node.right].into_iter().flatten() {
            assert_eq!(set.nodes[child].parent, Some(index), "broken parent link");
            if node.color == Color::Red {
                assert_eq!(set.nodes[child].color, Color::Black, "red node with red child");
            }
        }
        let left = check_subtree(set, node.left, low, Some(node.key));
        let right = check_subtree(set, node.right, Some(node.key), high);
        assert_eq!(left, right, "unequal black heights");
        left + usize::from(node.color == Color::Black)
    }

    #[test]
    fn empty_set() {
        let set = NameSet::with_capacity(4);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.capacity(), 4);
        assert!(!set.contains(b"ext"));
    }

    #[test]
    fn rejects_duplicates() {
        let mut set = NameSet::with_capacity(4);
        assert_eq!(set.insert(b"foo"), Ok(()));
        assert_eq!(set.insert(b"foo"), Err(InsertError::Duplicate));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let mut set = NameSet::with_capacity(4);
        assert_eq!(set.insert(b"foo"), Ok(()));
        assert_eq!(set.insert(b"FOO"), Ok(()));
    }

    #[test]
    fn prefix_names_are_distinct() {
        let mut set = NameSet::with_capacity(4);
        assert_eq!(set.insert(b"param1"), Ok(()));
        assert_eq!(set.insert(b"param"), Ok(()));
        assert_eq!(set.insert(b"param12"), Ok(()));
        assert!(set.contains(b"param"));
        assert!(!set.contains(b"para"));
    }

    #[test]
    fn full_set_rejects_new_names() {
        let mut set = NameSet::with_capacity(1);
        assert_eq!(set.insert(b"a"), Ok(()));
        assert_eq!(set.insert(b"b"), Err(InsertError::Full));
    }

    #[test]
    fn full_set_still_reports_duplicates() {
        let mut set = NameSet::with_capacity(1);
        assert_eq!(set.insert(b"a"), Ok(()));
        assert_eq!(set.insert(b"a"), Err(InsertError::Duplicate));
    }

    #[test]
    fn zero_capacity_accepts_nothing() {
        let mut set = NameSet::with_capacity(0);
        assert_eq!(set.insert(b"a"), Err(InsertError::Full));
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let names: Vec<String> = (0..500).map(|i| format!("param{i:04}")).collect();
        let mut set = NameSet::with_capacity(names.len());
        for name in &names {
            set.insert(name.as_bytes()).unwrap();
        }
        let black_height = check_invariants(&set);
        // A red-black tree of n nodes has black height at most log2(n + 1) + 1.
        assert!(black_height <= 10);
        assert!(names.iter().all(|name| set.contains(name.as_bytes())));
    }

    #[test]
    fn descending_inserts_stay_balanced() {
        let names: Vec<String> = (0..300).rev().map(|i| format!("{i:03}")).collect();
        let mut set = NameSet::with_capacity(1000);
        for name in &names {
            set.insert(name.as_bytes()).unwrap();
            check_invariants(&set);
        }
        assert_eq!(set.len(), 300);
    }

    #[test]
    fn scattered_inserts_stay_balanced() {
        // Multiplying by a unit modulo a prime visits every residue once.
        let names: Vec<String> = (0..997u32).map(|i| format!("n{}", (i * 389) % 997)).collect();
        let mut set = NameSet::with_capacity(1000);
        for name in &names {
            set.insert(name.as_bytes()).unwrap();
        }
        check_invariants(&set);
        for name in &names {
            assert_eq!(set.insert(name.as_bytes()), Err(InsertError::Duplicate));
        }
        assert_eq!(set.len(), 997);
    }
}

//! OrderedMap implementation
//!
//! Unbalanced BST whose operations charge a per-map comparison counter.

use std::borrow::Borrow;
use std::cell::Cell;
use std::fmt;
use std::mem;

use super::iter::Iter;
use super::node::{Link, Node};

/// Branch taken while descending towards a key
enum Step {
    Left,
    Right,
    Here,
}

/// Generic binary search tree keyed by `K`
///
/// ## Comparison accounting
///
/// | Operation    | Charge per visited node                          |
/// |--------------|--------------------------------------------------|
/// | `insert`     | 2 (equality, then direction)                     |
/// | `find`       | 2, or 1 on the matching node                     |
/// | `erase`      | 1 (direction by two `<` tests, equal otherwise)  |
/// | `range_apply`| 3 (go left?, in range?, go right?)               |
///
/// Reaching an empty link is free. The counter is shared by every
/// operation on the map until `reset_metrics` zeroes it.
pub struct OrderedMap<K, V> {
    root: Link<K, V>,
    len: usize,
    comparisons: Cell<u64>,
}

#[inline]
fn tick(counter: &Cell<u64>) {
    counter.set(counter.get() + 1);
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            comparisons: Cell::new(0),
        }
    }

    /// Insert a new key
    ///
    /// Returns `false` without touching the tree if `key` is already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let counter = &self.comparisons;
        let mut slot = &mut self.root;

        while let Some(node) = slot {
            tick(counter);
            if key == node.key {
                return false;
            }
            tick(counter);
            slot = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        *slot = Some(Node::leaf(key, value));
        self.len += 1;
        true
    }

    /// Look up the value stored under `key`
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root.as_deref();

        while let Some(node) = cur {
            let node_key: &Q = node.key.borrow();
            tick(&self.comparisons);
            if key == node_key {
                return Some(&node.value);
            }
            tick(&self.comparisons);
            cur = if key < node_key {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }

        None
    }

    /// Look up the value stored under `key` for in-place mutation
    ///
    /// Charged exactly like `find`.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let counter = &self.comparisons;
        let mut cur = self.root.as_deref_mut();

        while let Some(node) = cur {
            let node_key: &Q = node.key.borrow();
            tick(counter);
            if key == node_key {
                return Some(&mut node.value);
            }
            tick(counter);
            cur = if key < node_key {
                node.left.as_deref_mut()
            } else {
                node.right.as_deref_mut()
            };
        }

        None
    }

    /// Remove `key`, returning whether an entry was removed
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Remove `key` and hand back its value
    ///
    /// Deletion cases:
    /// 1. No left child: the right subtree takes the node's place
    /// 2. No right child: the left subtree takes the node's place
    /// 3. Two children: the in-order successor's entry moves into the node
    ///    and the successor is unlinked from the right subtree
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let counter = &self.comparisons;
        let mut slot = &mut self.root;

        loop {
            let step = match slot.as_deref() {
                None => return None,
                Some(node) => {
                    let node_key: &Q = node.key.borrow();
                    tick(counter);
                    if key < node_key {
                        Step::Left
                    } else if node_key < key {
                        Step::Right
                    } else {
                        Step::Here
                    }
                }
            };

            slot = match step {
                Step::Left => &mut slot.as_mut()?.left,
                Step::Right => &mut slot.as_mut()?.right,
                Step::Here => break,
            };
        }

        let node = slot.as_mut()?;
        let removed = if node.left.is_some() && node.right.is_some() {
            let successor = detach_min(&mut node.right, counter)?;
            let Node { key, value, .. } = *successor;
            node.key = key;
            mem::replace(&mut node.value, value)
        } else {
            let mut doomed = slot.take()?;
            *slot = match doomed.left.take() {
                Some(left) => Some(left),
                None => doomed.right.take(),
            };
            let Node { value, .. } = *doomed;
            value
        };

        self.len -= 1;
        Some(removed)
    }

    /// Visit every entry with `lo <= key <= hi` in ascending key order
    ///
    /// Subtrees entirely below `lo` or above `hi` are pruned, so the cost
    /// follows the access path plus the matching span rather than the size
    /// of the tree.
    pub fn range_apply<'a, F>(&'a self, lo: &K, hi: &K, visit: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        self.walk_range(lo, Some(hi), visit);
    }

    /// Visit every entry with `lo <= key` in ascending key order
    ///
    /// With no upper bound there is no "go right?" test, so each visited
    /// node costs 2 comparisons instead of 3.
    pub fn range_apply_from<'a, F>(&'a self, lo: &K, visit: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        self.walk_range(lo, None, visit);
    }

    fn walk_range<'a, F>(&'a self, lo: &K, hi: Option<&K>, mut visit: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        // Nodes whose left side is being explored, awaiting their own visit
        let mut pending: Vec<&'a Node<K, V>> = Vec::new();
        let mut cur = self.root.as_deref();

        loop {
            while let Some(node) = cur {
                tick(&self.comparisons);
                cur = if *lo < node.key {
                    node.left.as_deref()
                } else {
                    None
                };
                pending.push(node);
            }

            let Some(node) = pending.pop() else {
                break;
            };

            tick(&self.comparisons);
            let within = !(node.key < *lo) && hi.map_or(true, |hi| !(*hi < node.key));
            if within {
                visit(&node.key, &node.value);
            }

            cur = match hi {
                Some(hi) => {
                    tick(&self.comparisons);
                    if node.key < *hi {
                        node.right.as_deref()
                    } else {
                        None
                    }
                }
                None => node.right.as_deref(),
            };
        }
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Comparisons charged since the last reset
    pub fn comparisons(&self) -> u64 {
        self.comparisons.get()
    }

    /// Zero the comparison counter
    pub fn reset_metrics(&self) {
        self.comparisons.set(0);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        deepest
    }

    /// Ascending iterator over all entries (not instrumented)
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }

    /// Drop every node
    ///
    /// Children are detached before their parent is freed, so no drop ever
    /// recurses down a long path.
    pub fn clear(&mut self) {
        let mut doomed: Vec<Box<Node<K, V>>> = Vec::new();
        doomed.extend(self.root.take());

        while let Some(mut node) = doomed.pop() {
            doomed.extend(node.left.take());
            doomed.extend(node.right.take());
        }

        self.len = 0;
    }
}

/// Unlink the leftmost node below `slot`, charging one comparison per node
/// on the way down (the successor search of a two-child erase)
fn detach_min<K, V>(mut slot: &mut Link<K, V>, counter: &Cell<u64>) -> Option<Box<Node<K, V>>> {
    loop {
        let descend = match slot.as_deref() {
            None => return None,
            Some(node) => {
                tick(counter);
                node.left.is_some()
            }
        };
        if !descend {
            break;
        }
        slot = &mut slot.as_mut()?.left;
    }

    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}

impl<K: Ord, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

//! Tree node definitions

/// Exclusive link to a child subtree
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A single key/value node. Each node owns both of its children.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Create a childless node
    pub(crate) fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// Which node supplies the replacement value when removing a node with children
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// Walk down both candidate paths and take the deeper one.
    /// The predecessor wins ties.
    DeeperSide,
    /// In-order predecessor, falling back to the successor when there is no left child
    Predecessor,
    /// In-order successor, falling back to the predecessor when there is no right child
    Successor,
}

impl Default for Replacement {
    fn default() -> Self {
        Replacement::DeeperSide
    }
}

/// Construction parameters of an `AvlTree`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvlTreeConfig {
    /// Maximum number of elements. Fixed for the lifetime of the tree.
    pub capacity: usize,
    /// Replacement choice on removal
    pub replacement: Replacement,
}

impl AvlTreeConfig {
    pub fn new(capacity: usize) -> Self {
        AvlTreeConfig {
            capacity,
            replacement: Replacement::default(),
        }
    }

    pub fn replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }
}

impl Default for AvlTreeConfig {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod test {
    use crate::config::{AvlTreeConfig, Replacement};

    #[test]
    fn defaults() {
        let config = AvlTreeConfig::default();
        assert_eq!(config.capacity, 16);
        assert_eq!(config.replacement, Replacement::DeeperSide);
    }

    #[test]
    fn builder() {
        let config = AvlTreeConfig::new(3).replacement(Replacement::Successor);
        assert_eq!(config.capacity, 3);
        assert_eq!(config.replacement, Replacement::Successor);
    }
}

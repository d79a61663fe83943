//! Highlight capability check
//!
//! The host tags the elements that should enlarge the marker and registers
//! parent links for nested elements. A pointer over an untagged child of a
//! tagged element still counts as highlighted (closest ancestor wins).

use crate::input::types::TargetId;
use std::collections::{HashMap, HashSet};

/// Ancestor walks stop after this many hops
pub const MAX_ANCESTOR_DEPTH: usize = 64;

/// Set of highlight-tagged targets plus their parent links
#[derive(Debug, Clone, Default)]
pub struct HighlightRegistry {
    highlighted: HashSet<TargetId>,
    parents: HashMap<TargetId, TargetId>,
}

impl HighlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a target as highlightable
    pub fn tag(&mut self, target: TargetId) {
        self.highlighted.insert(target);
    }

    pub fn untag(&mut self, target: TargetId) {
        self.highlighted.remove(&target);
    }

    /// Record `parent` as the enclosing element of `child`
    pub fn set_parent(&mut self, child: TargetId, parent: TargetId) {
        self.parents.insert(child, parent);
    }

    pub fn remove_parent(&mut self, child: TargetId) {
        self.parents.remove(&child);
    }

    /// Closest highlighted element at or above `target`
    pub fn closest_highlighted(&self, target: TargetId) -> Option<TargetId> {
        let mut node = target;
        for _ in 0..=MAX_ANCESTOR_DEPTH {
            if self.highlighted.contains(&node) {
                return Some(node);
            }
            match self.parents.get(&node) {
                Some(&parent) if parent != target => node = parent,
                _ => return None,
            }
        }
        tracing::debug!("Ancestor walk from {} exceeded depth limit", target);
        None
    }

    /// Whether the pointer over `target` should highlight; no target means no
    pub fn is_highlighted(&self, target: Option<TargetId>) -> bool {
        target
            .map(|t| self.closest_highlighted(t).is_some())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.highlighted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlighted.is_empty()
    }
}

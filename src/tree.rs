/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The contour tree itself: nodes and arcs in an arena, doubly-linked
//! incidence lists, and a second, independent union-find over arcs used by
//! branch-decomposition's arc-merging step.

use crate::branch::{BranchId, BranchList};
use crate::order::VId;
use crate::unionfind::{self, UnionFind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArcId(pub usize);

#[derive(Debug, Clone)]
pub struct Node<U> {
    pub vertex: VId,
    pub up: Option<ArcId>,
    pub down: Option<ArcId>,
    /// Scratch storage for branches awaiting a parent, used only while
    /// decomposition runs.
    pub children: BranchList,
    pub data: U,
}

#[derive(Debug, Clone)]
pub struct Arc<U> {
    pub hi: NodeId,
    pub lo: NodeId,
    next_up: Option<ArcId>,
    prev_up: Option<ArcId>,
    next_down: Option<ArcId>,
    prev_down: Option<ArcId>,
    pub branch: Option<BranchId>,
    pub children: BranchList,
    pub data: U,
    uf_parent: usize,
}

impl<U> UnionFind for Arc<U> {
    fn uf_parent(&self) -> usize {
        self.uf_parent
    }
    fn set_uf_parent(&mut self, parent: usize) {
        self.uf_parent = parent;
    }
}

/// Owns every node and arc of one contour tree.
#[derive(Debug, Default)]
pub struct TreeArena<U> {
    nodes: Vec<Node<U>>,
    arcs: Vec<Arc<U>>,
}

impl<U: Default> TreeArena<U> {
    pub fn new() -> Self {
        TreeArena { nodes: Vec::new(), arcs: Vec::new() }
    }

    pub fn new_node(&mut self, vertex: VId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            vertex,
            up: None,
            down: None,
            children: BranchList::default(),
            data: U::default(),
        });
        id
    }

    pub fn new_arc(&mut self, hi: NodeId, lo: NodeId) -> ArcId {
        let id = ArcId(self.arcs.len());
        self.arcs.push(Arc {
            hi,
            lo,
            next_up: None,
            prev_up: None,
            next_down: None,
            prev_down: None,
            branch: None,
            children: BranchList::default(),
            data: U::default(),
            uf_parent: id.0,
        });
        id
    }
}

impl<U> TreeArena<U> {
    pub fn node(&self, id: NodeId) -> &Node<U> {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<U> {
        &mut self.nodes[id.0]
    }

    pub fn arc(&self, id: ArcId) -> &Arc<U> {
        &self.arcs[id.0]
    }

    pub fn arc_mut(&mut self, id: ArcId) -> &mut Arc<U> {
        &mut self.arcs[id.0]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn arc_find(&mut self, id: ArcId) -> ArcId {
        ArcId(unionfind::find(&mut self.arcs, id.0))
    }

    pub fn arc_union(&mut self, a: ArcId, b: ArcId) {
        unionfind::union(&mut self.arcs, a.0, b.0)
    }

    pub fn add_up_arc(&mut self, node: NodeId, a: ArcId) {
        self.arc_mut(a).prev_up = None;
        let old = self.node(node).up;
        self.arc_mut(a).next_up = old;
        if let Some(old) = old {
            self.arc_mut(old).prev_up = Some(a);
        }
        self.node_mut(node).up = Some(a);
    }

    pub fn add_down_arc(&mut self, node: NodeId, a: ArcId) {
        self.arc_mut(a).prev_down = None;
        let old = self.node(node).down;
        self.arc_mut(a).next_down = old;
        if let Some(old) = old {
            self.arc_mut(old).prev_down = Some(a);
        }
        self.node_mut(node).down = Some(a);
    }

    pub fn remove_up_arc(&mut self, node: NodeId, a: ArcId) {
        if self.node(node).up == Some(a) {
            self.node_mut(node).up = self.arc(a).next_up;
        }
        let (next, prev) = (self.arc(a).next_up, self.arc(a).prev_up);
        if let Some(next) = next {
            self.arc_mut(next).prev_up = prev;
        }
        if let Some(prev) = prev {
            self.arc_mut(prev).next_up = next;
        }
        let a_mut = self.arc_mut(a);
        a_mut.next_up = None;
        a_mut.prev_up = None;
    }

    pub fn remove_down_arc(&mut self, node: NodeId, a: ArcId) {
        if self.node(node).down == Some(a) {
            self.node_mut(node).down = self.arc(a).next_down;
        }
        let (next, prev) = (self.arc(a).next_down, self.arc(a).prev_down);
        if let Some(next) = next {
            self.arc_mut(next).prev_down = prev;
        }
        if let Some(prev) = prev {
            self.arc_mut(prev).next_down = next;
        }
        let a_mut = self.arc_mut(a);
        a_mut.next_down = None;
        a_mut.prev_down = None;
    }

    pub fn is_max(&self, n: NodeId) -> bool {
        self.node(n).up.is_none()
    }

    pub fn is_min(&self, n: NodeId) -> bool {
        self.node(n).down.is_none()
    }

    pub fn is_leaf(&self, n: NodeId) -> bool {
        self.is_max(n) || self.is_min(n)
    }

    pub fn is_regular(&self, n: NodeId) -> bool {
        matches!(
            (self.node(n).up, self.node(n).down),
            (Some(u), Some(d)) if self.arc(u).next_up.is_none() && self.arc(d).next_down.is_none()
        )
    }

    /// True iff `a` is the sole entry of its lo node's up-arc list.
    pub fn is_solitary_up(&self, a: ArcId) -> bool {
        self.arc(a).next_up.is_none() && self.arc(a).prev_up.is_none()
    }

    /// True iff `a` is the sole entry of its hi node's down-arc list.
    pub fn is_solitary_down(&self, a: ArcId) -> bool {
        self.arc(a).next_down.is_none() && self.arc(a).prev_down.is_none()
    }

    /// The next arc in `node`'s up-incidence list after `a`, if any.
    pub fn next_up(&self, a: ArcId) -> Option<ArcId> {
        self.arc(a).next_up
    }

    /// The next arc in `node`'s down-incidence list after `a`, if any.
    pub fn next_down(&self, a: ArcId) -> Option<ArcId> {
        self.arc(a).next_down
    }

    /// The single arc attached to a leaf node.
    pub fn leaf_arc(&self, n: NodeId) -> ArcId {
        assert!(self.is_leaf(n), "leaf_arc: node is not a leaf");
        self.node(n).up.or(self.node(n).down).expect("leaf has no arc")
    }

    /// The node at the far end of a leaf's arc.
    pub fn other_node(&self, n: NodeId) -> NodeId {
        assert!(self.is_leaf(n), "other_node: node is not a leaf");
        match self.node(n).up {
            None => self.arc(self.node(n).down.unwrap()).hi,
            Some(up) => self.arc(up).lo,
        }
    }

    /// Detaches leaf `n` from the tree, returning the node at the far end.
    pub fn prune(&mut self, n: NodeId) -> NodeId {
        if self.is_max(n) {
            let down = self.node(n).down.unwrap();
            let lo = self.arc(down).lo;
            self.remove_up_arc(lo, down);
            lo
        } else if self.is_min(n) {
            let up = self.node(n).up.unwrap();
            let hi = self.arc(up).hi;
            self.remove_down_arc(hi, up);
            hi
        } else {
            unreachable!("prune: node is neither max nor min");
        }
    }

    /// Collapses a regular node, rewiring its up-arc to absorb its down-arc
    /// and unioning them. Returns `(keep, discard)`. Purely structural: the
    /// caller (branch decomposition, which alone knows how to compare
    /// branches by saddle value) is responsible for merging `children`
    /// lists and firing any `arcMerge` callback before or after this call.
    pub fn collapse_arcs(&mut self, n: NodeId) -> (ArcId, ArcId) {
        assert!(self.is_regular(n), "collapse_arcs: node is not regular");
        let up = self.node(n).up.unwrap();
        let down = self.node(n).down.unwrap();

        let down_lo = self.arc(down).lo;
        self.remove_up_arc(down_lo, down);
        self.add_up_arc(down_lo, up);

        self.arc_mut(up).lo = down_lo;
        self.arc_union(down, up);

        (up, down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_merges_two_arcs_into_one() {
        let mut t: TreeArena<()> = TreeArena::new();
        let lo = t.new_node(0);
        let mid = t.new_node(1);
        let hi = t.new_node(2);
        let down = t.new_arc(mid, lo);
        t.add_down_arc(mid, down);
        t.add_up_arc(lo, down);
        let up = t.new_arc(hi, mid);
        t.add_down_arc(hi, up);
        t.add_up_arc(mid, up);

        assert!(t.is_regular(mid));
        let (keep, discard) = t.collapse_arcs(mid);
        assert_eq!(keep, up);
        assert_eq!(discard, down);
        assert_eq!(t.arc(up).lo, lo);
        assert_eq!(t.node(lo).up, Some(up));
        assert_eq!(t.arc_find(down), t.arc_find(up));
    }

    #[test]
    fn leaf_and_other_node() {
        let mut t: TreeArena<()> = TreeArena::new();
        let a = t.new_node(0);
        let b = t.new_node(1);
        let arc = t.new_arc(b, a);
        t.add_down_arc(b, arc);
        t.add_up_arc(a, arc);

        assert!(t.is_leaf(a));
        assert!(t.is_max(a));
        assert_eq!(t.leaf_arc(a), arc);
        assert_eq!(t.other_node(a), b);
    }
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use contourtree::{Mesh, TreeArena, VId};

/// An explicit adjacency-list mesh: a fixed scalar value per vertex and a
/// fixed neighbor set, built once from an edge list. Covers every
/// hand-built scenario mesh the integration tests need.
pub struct ListMesh {
    values: Vec<f64>,
    adj: Vec<Vec<VId>>,
}

impl ListMesh {
    pub fn new(values: Vec<f64>, edges: &[(VId, VId)]) -> Self {
        let n = values.len();
        let mut adj = vec![Vec::new(); n];
        for &(a, b) in edges {
            adj[a].push(b);
            adj[b].push(a);
        }
        ListMesh { values, adj }
    }
}

impl Mesh for ListMesh {
    fn value(&self, v: VId) -> f64 {
        self.values[v]
    }

    fn neighbors(&self, v: VId, buf: &mut [VId]) -> usize {
        let n = self.adj[v].len();
        buf[..n].copy_from_slice(&self.adj[v]);
        n
    }
}

/// A `w`x`h` 4-connected grid, row-major, with per-vertex heights.
pub struct GridMesh {
    w: usize,
    h: usize,
    heights: Vec<f64>,
}

impl GridMesh {
    pub fn new(w: usize, h: usize, heights: Vec<f64>) -> Self {
        assert_eq!(heights.len(), w * h);
        GridMesh { w, h, heights }
    }

    fn xy(&self, v: VId) -> (usize, usize) {
        (v % self.w, v / self.w)
    }
}

impl Mesh for GridMesh {
    fn value(&self, v: VId) -> f64 {
        self.heights[v]
    }

    fn neighbors(&self, v: VId, buf: &mut [VId]) -> usize {
        let (x, y) = self.xy(v);
        let mut n = 0;
        if x > 0 {
            buf[n] = v - 1;
            n += 1;
        }
        if x + 1 < self.w {
            buf[n] = v + 1;
            n += 1;
        }
        if y > 0 {
            buf[n] = v - self.w;
            n += 1;
        }
        if y + 1 < self.h {
            buf[n] = v + self.w;
            n += 1;
        }
        n
    }
}

/// Checks the universal invariants every contour tree should satisfy,
/// regardless of which scenario produced it.
pub fn assert_contour_tree_invariants<U: Default>(tree: &TreeArena<U>, arc_map: &[Option<contourtree::ArcId>]) {
    assert_eq!(tree.num_arcs(), tree.num_nodes().saturating_sub(1), "|arcs| = |nodes| - 1 for a tree");

    for v in 0..arc_map.len() {
        assert!(arc_map[v].is_some(), "vertex {v} missing from arc map");
    }

    for n in tree.node_ids() {
        let up = tree.node(n).up.is_some();
        let down = tree.node(n).down.is_some();
        match (up, down) {
            (false, false) => panic!("node {n:?} has no incident arcs"),
            (true, false) | (false, true) => {
                // leaf: exactly one incident arc (degree-checked by
                // is_leaf's definition, which only looks at the list head).
                assert!(tree.is_leaf(n));
            }
            (true, true) => {
                // regular (one up, one down) or a saddle (more than one on
                // one side); either is fine, just not also a leaf.
                assert!(!tree.is_leaf(n));
            }
        }
    }
}

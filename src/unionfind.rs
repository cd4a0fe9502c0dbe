/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Disjoint-set over arena indices, with path compression and *naive* union.
//!
//! Deliberately not ranked or sized: the components being unioned here form
//! chains bounded by sweep-tree height, and path compression alone keeps
//! `find` cheap. A ranked union-find would change which element survives as
//! root, and callers (the sweep engine, the branch-decomposition arc merge)
//! depend on the specific element that wins.

/// An arena element that participates in a union-find. Implementors store
/// their own index as `parent()` when they're a root.
pub trait UnionFind {
    fn uf_parent(&self) -> usize;
    fn set_uf_parent(&mut self, parent: usize);
}

/// Finds the root of `i`, compressing the path as it goes.
pub fn find<T: UnionFind>(arena: &mut [T], i: usize) -> usize {
    let mut root = i;
    while arena[root].uf_parent() != root {
        root = arena[root].uf_parent();
    }
    let mut cur = i;
    while arena[cur].uf_parent() != root {
        let next = arena[cur].uf_parent();
        arena[cur].set_uf_parent(root);
        cur = next;
    }
    root
}

/// Naive union: `a`'s root is made to point at `b`'s current parent. Callers
/// that want `a` to end up under `b` should pass a freshly-created `b`
/// (whose parent is itself), matching the source's `a->uf = b->uf`.
pub fn union<T: UnionFind>(arena: &mut [T], a: usize, b: usize) {
    let b_parent = arena[b].uf_parent();
    arena[a].set_uf_parent(b_parent);
}

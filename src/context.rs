/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! `Context`: the aggregate that owns one contour-tree computation end to
//! end, mirroring the source's `ctContext` but replacing its function
//! pointers and allocator pairs with plain Rust closures and arenas.

use crate::augment::augment;
use crate::branch::{self, BranchArena, BranchId};
use crate::component::{ComponentArena, ComponentId, ComponentType};
use crate::merge;
use crate::mesh::{Mesh, DEFAULT_MAX_VALENCE};
use crate::order::{TotalOrder, VId, NIL};
use crate::tree::{ArcId, NodeId, TreeArena};

/// Owns a mesh, its total order, and the working state of one contour-tree
/// computation. `U` is the user-data slot carried by every node, arc and
/// branch (use `()` if you don't need one).
pub struct Context<M: Mesh, U: Default + 'static> {
    mesh: M,
    order: TotalOrder,
    max_valence: usize,

    comps: ComponentArena,
    join_comps: Vec<Option<ComponentId>>,
    split_comps: Vec<Option<ComponentId>>,
    next_join: Vec<VId>,
    next_split: Vec<VId>,
    join_root: Option<ComponentId>,
    split_root: Option<ComponentId>,

    tree: Option<TreeArena<U>>,
    root_arc: Option<ArcId>,
    arc_map: Option<Vec<Option<ArcId>>>,

    branches: Option<BranchArena<U>>,
    root_branch: Option<BranchId>,
    branch_map: Option<Vec<Option<BranchId>>>,

    proc_vertex: Option<Box<dyn FnMut(VId, ArcId)>>,
    arc_merge: Option<Box<dyn FnMut(ArcId, ArcId)>>,
    priority: Option<Box<dyn FnMut(NodeId, &TreeArena<U>) -> f64>>,
}

impl<M: Mesh, U: Default + 'static> Context<M, U> {
    /// Builds a context over `mesh`, with `order` giving the total order the
    /// sweeps run against. `order.len()` is the vertex count.
    pub fn new(order: TotalOrder, mesh: M) -> Self {
        assert!(!order.is_empty(), "Context::new: total order is empty");
        let n = order.len();
        Context {
            mesh,
            order,
            max_valence: DEFAULT_MAX_VALENCE,
            comps: ComponentArena::new(),
            join_comps: vec![None; n],
            split_comps: vec![None; n],
            next_join: vec![NIL; n],
            next_split: vec![NIL; n],
            join_root: None,
            split_root: None,
            tree: None,
            root_arc: None,
            arc_map: None,
            branches: None,
            root_branch: None,
            branch_map: None,
            proc_vertex: None,
            arc_merge: None,
            priority: None,
        }
    }

    pub fn num_verts(&self) -> usize {
        self.order.len()
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    /// Sets the neighbor-buffer capacity; must be at least the mesh's
    /// largest vertex valence. Each sweep reads this fresh when it starts, so
    /// changing it between `join_sweep` and `split_sweep` affects the split
    /// sweep; it has no effect on a sweep that has already completed.
    pub fn set_max_valence(&mut self, n: usize) {
        self.max_valence = n;
    }

    pub fn set_proc_vertex(&mut self, f: impl FnMut(VId, ArcId) + 'static) {
        self.proc_vertex = Some(Box::new(f));
    }

    pub fn set_arc_merge(&mut self, f: impl FnMut(ArcId, ArcId) + 'static) {
        self.arc_merge = Some(Box::new(f));
    }

    pub fn set_priority(&mut self, f: impl FnMut(NodeId, &TreeArena<U>) -> f64 + 'static) {
        self.priority = Some(Box::new(f));
    }

    pub fn join_sweep(&mut self) {
        let root = crate::sweep::sweep(
            &self.mesh,
            &self.order,
            ComponentType::Join,
            true,
            self.max_valence,
            &mut self.join_comps,
            &mut self.next_join,
            &mut self.comps,
        );
        self.join_root = Some(root);
    }

    pub fn split_sweep(&mut self) {
        let root = crate::sweep::sweep(
            &self.mesh,
            &self.order,
            ComponentType::Split,
            false,
            self.max_valence,
            &mut self.split_comps,
            &mut self.next_split,
            &mut self.comps,
        );
        self.split_root = Some(root);
    }

    /// Augments, then merges the join/split component graphs into the
    /// contour tree. Panics if `join_sweep`/`split_sweep` haven't run.
    pub fn merge_trees(&mut self) -> ArcId {
        let join_root = self.join_root.expect("merge_trees: join_sweep was not run");
        let mut split_root = self.split_root.expect("merge_trees: split_sweep was not run");

        augment(&self.order, &mut split_root, &self.join_comps, &self.split_comps, &mut self.comps);
        self.split_root = Some(split_root);

        let mut tree: TreeArena<U> = TreeArena::new();
        let num_verts = self.num_verts();
        let next_join = &self.next_join;
        let next_split = &self.next_split;
        let comps = &mut self.comps;
        let proc_vertex = self.proc_vertex.as_deref_mut();
        let (root_arc, arc_map) = merge::merge(
            num_verts,
            join_root,
            split_root,
            next_join,
            next_split,
            comps,
            &mut tree,
            proc_vertex,
        );
        self.tree = Some(tree);
        self.root_arc = Some(root_arc);
        self.arc_map = Some(arc_map);
        root_arc
    }

    /// Runs `join_sweep`, `split_sweep` and `merge_trees` in order.
    pub fn sweep_and_merge(&mut self) -> ArcId {
        self.join_sweep();
        self.split_sweep();
        self.merge_trees()
    }

    /// Runs the join and split sweeps concurrently, on the calling thread and
    /// one spawned thread, then `merge_trees` on the calling thread. This is
    /// the only sanctioned parallelism: the two sweeps touch disjoint working
    /// tables (`join_comps`/`next_join` vs. `split_comps`/`next_split`, and a
    /// private `ComponentArena` apiece, spliced back together once both
    /// finish), borrowed disjointly so the borrow checker enforces the same
    /// separation the sweeps already have structurally. Both threads call
    /// `Mesh::value`/`Mesh::neighbors` through a shared `&M`, hence the bound.
    ///
    /// Panics if a sweep has already run.
    pub fn sweep_and_merge_parallel(&mut self) -> ArcId
    where
        M: Send + Sync,
    {
        assert!(
            self.join_root.is_none() && self.split_root.is_none(),
            "sweep_and_merge_parallel: a sweep already ran"
        );

        let mesh = &self.mesh;
        let order = &self.order;
        let max_valence = self.max_valence;
        let join_comps = &mut self.join_comps;
        let next_join = &mut self.next_join;
        let split_comps = &mut self.split_comps;
        let next_split = &mut self.next_split;
        let mut join_arena = ComponentArena::new();
        let mut split_arena = ComponentArena::new();

        let (join_root, mut join_arena, split_root) = std::thread::scope(|scope| {
            let join_handle = scope.spawn(move || {
                let join_root = crate::sweep::sweep(
                    mesh,
                    order,
                    ComponentType::Join,
                    true,
                    max_valence,
                    join_comps,
                    next_join,
                    &mut join_arena,
                );
                (join_root, join_arena)
            });
            let split_root = crate::sweep::sweep(
                mesh,
                order,
                ComponentType::Split,
                false,
                max_valence,
                split_comps,
                next_split,
                &mut split_arena,
            );
            let (join_root, join_arena) = join_handle.join().expect("sweep_and_merge_parallel: join sweep thread panicked");
            (join_root, join_arena, split_root)
        });

        self.join_root = Some(join_root);

        // Both sweeps numbered their components from zero in their own
        // private arenas; splice split's after join's and shift every
        // ComponentId it produced (including its own root) by the same
        // amount, landing on the exact layout the serial join-then-split
        // sweep would have produced in one shared arena.
        let offset = join_arena.append(split_arena);
        for c in self.split_comps.iter_mut() {
            *c = c.map(|ComponentId(i)| ComponentId(i + offset));
        }
        self.split_root = Some(ComponentId(split_root.0 + offset));
        self.comps = join_arena;

        self.merge_trees()
    }

    /// Runs branch decomposition over the merged contour tree, consuming it.
    /// Panics if `merge_trees`/`sweep_and_merge` hasn't run, or if this has
    /// already been called.
    pub fn decompose(&mut self) -> BranchId {
        let mut tree = self.tree.take().expect("decompose: no contour tree (call merge_trees first)");
        let mesh = &self.mesh;
        let mut branches: BranchArena<U> = BranchArena::new();

        let root = branch::decompose(
            mesh,
            &mut tree,
            &mut branches,
            self.priority.as_deref_mut(),
            self.arc_merge.as_deref_mut(),
        );

        let num_verts = self.num_verts();
        let arc_map = self.arc_map.as_ref().expect("decompose: arc map missing");
        let mut branch_map = vec![None; num_verts];
        for v in 0..num_verts {
            let a = arc_map[v].expect("decompose: vertex missing from arc map");
            let root_arc = tree.arc_find(a);
            branch_map[v] = tree.arc(root_arc).branch;
        }

        self.tree = Some(tree);
        self.branches = Some(branches);
        self.root_branch = Some(root);
        self.branch_map = Some(branch_map);
        root
    }

    pub fn tree(&self) -> Option<&TreeArena<U>> {
        self.tree.as_ref()
    }

    pub fn branches(&self) -> Option<&BranchArena<U>> {
        self.branches.as_ref()
    }

    pub fn root_arc(&self) -> Option<ArcId> {
        self.root_arc
    }

    pub fn root_branch(&self) -> Option<BranchId> {
        self.root_branch
    }

    /// Transfers ownership of the per-vertex arc assignment; `None` if
    /// already taken.
    pub fn take_arc_map(&mut self) -> Option<Vec<Option<ArcId>>> {
        self.arc_map.take()
    }

    /// Transfers ownership of the per-vertex branch assignment; `None` if
    /// already taken, or if `decompose` hasn't run.
    pub fn take_branch_map(&mut self) -> Option<Vec<Option<BranchId>>> {
        self.branch_map.take()
    }
}

/// Deep-copies the tree reachable from `root.lo`, starting a fresh arena.
/// Returns the new arena and the arc corresponding to `root`.
///
/// There is no `moveData` flag: under ownership, "move the data into the
/// copy" is just moving (or cloning) the field yourself after this returns,
/// rather than a pointer swap the old and new objects both have to agree on.
pub fn copy_tree<U: Default + Clone>(src: &TreeArena<U>, root: ArcId) -> (TreeArena<U>, ArcId) {
    let mut dst: TreeArena<U> = TreeArena::new();
    let mut node_map: std::collections::HashMap<NodeId, NodeId> = std::collections::HashMap::new();

    let start = src.arc(root).lo;
    let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(start, None)];
    while let Some((n, prev)) = stack.pop() {
        let new_n = dst.new_node(src.node(n).vertex);
        dst.node_mut(new_n).data = src.node(n).data.clone();
        node_map.insert(n, new_n);

        let mut up = src.node(n).up;
        while let Some(a) = up {
            let hi = src.arc(a).hi;
            if Some(hi) != prev {
                stack.push((hi, Some(n)));
            }
            up = src.next_up(a);
        }
        let mut down = src.node(n).down;
        while let Some(a) = down {
            let lo = src.arc(a).lo;
            if Some(lo) != prev {
                stack.push((lo, Some(n)));
            }
            down = src.next_down(a);
        }
    }

    let mut new_root = None;
    let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(start, None)];
    while let Some((n, prev)) = stack.pop() {
        let mut up = src.node(n).up;
        while let Some(a) = up {
            let hi = src.arc(a).hi;
            if Some(hi) != prev {
                stack.push((hi, Some(n)));
                let new_lo = node_map[&n];
                let new_hi = node_map[&hi];
                let new_a = dst.new_arc(new_hi, new_lo);
                dst.add_up_arc(new_lo, new_a);
                dst.add_down_arc(new_hi, new_a);
                dst.arc_mut(new_a).data = src.arc(a).data.clone();
                if a == root {
                    new_root = Some(new_a);
                }
            }
            up = src.next_up(a);
        }
        let mut down = src.node(n).down;
        while let Some(a) = down {
            let lo = src.arc(a).lo;
            if Some(lo) != prev {
                stack.push((lo, Some(n)));
                let new_hi = node_map[&n];
                let new_lo = node_map[&lo];
                let new_a = dst.new_arc(new_hi, new_lo);
                dst.add_up_arc(new_lo, new_a);
                dst.add_down_arc(new_hi, new_a);
                dst.arc_mut(new_a).data = src.arc(a).data.clone();
                if a == root {
                    new_root = Some(new_a);
                }
            }
            down = src.next_down(a);
        }
    }

    (dst, new_root.expect("copy_tree: root arc unreachable from itself"))
}

/// Collects every arc and node reachable from `root`, as a tree walk from
/// `root.lo` outward.
pub fn arcs_and_nodes<U>(tree: &TreeArena<U>, root: ArcId) -> (Vec<ArcId>, Vec<NodeId>) {
    let mut arcs = Vec::new();
    let mut nodes = Vec::new();
    let start = tree.arc(root).lo;
    let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(start, None)];
    while let Some((n, prev)) = stack.pop() {
        nodes.push(n);
        let mut up = tree.node(n).up;
        while let Some(a) = up {
            let hi = tree.arc(a).hi;
            if Some(hi) != prev {
                stack.push((hi, Some(n)));
                arcs.push(a);
            }
            up = tree.next_up(a);
        }
        let mut down = tree.node(n).down;
        while let Some(a) = down {
            let lo = tree.arc(a).lo;
            if Some(lo) != prev {
                stack.push((lo, Some(n)));
                arcs.push(a);
            }
            down = tree.next_down(a);
        }
    }
    (arcs, nodes)
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Interleaves the join and split component graphs into the contour tree
//! itself, pruning the least-recently-born leaf from whichever tree has one
//! available and threading `arcMap` as it goes.

use std::collections::VecDeque;

use crate::component::{ComponentArena, ComponentId, ComponentType};
use crate::order::{VId, NIL};
use crate::ordered_map::{self, OrderedComponentMap};
use crate::tree::{ArcId, NodeId, TreeArena};

fn node_for<U: Default>(tree: &mut TreeArena<U>, node_map: &mut [Option<NodeId>], v: VId) -> NodeId {
    if let Some(n) = node_map[v] {
        return n;
    }
    let n = tree.new_node(v);
    node_map[v] = Some(n);
    n
}

/// Merges the join tree rooted at `join_root` and the split tree rooted at
/// `split_root` (already augmented so the two agree on critical vertices)
/// into `tree`. `next_join`/`next_split` are the `next[]` chains left behind
/// by the corresponding sweeps. `proc_vertex`, if given, is called once per
/// non-critical vertex as it's assigned to its arc.
///
/// Returns the arc at the root of the resulting contour tree and the
/// `arcMap` assigning every vertex to the arc that owns it.
pub fn merge<U: Default>(
    num_verts: usize,
    join_root: ComponentId,
    split_root: ComponentId,
    next_join: &[VId],
    next_split: &[VId],
    comps: &mut ComponentArena,
    tree: &mut TreeArena<U>,
    proc_vertex: &mut Option<Box<dyn FnMut(VId, ArcId)>>,
) -> (ArcId, Vec<Option<ArcId>>) {
    let plus_inf = comps.new_component(ComponentType::Join);
    comps.add_pred(plus_inf, join_root);
    comps.get_mut(plus_inf).birth = comps.get(join_root).death;
    comps.get_mut(join_root).succ = Some(plus_inf);

    let minus_inf = comps.new_component(ComponentType::Split);
    comps.add_pred(minus_inf, split_root);
    comps.get_mut(minus_inf).birth = comps.get(split_root).death;
    comps.get_mut(split_root).succ = Some(minus_inf);

    let mut leaf_queue: VecDeque<ComponentId> = VecDeque::new();
    let join_map: OrderedComponentMap = ordered_map::build(comps, plus_inf, &mut leaf_queue);
    let split_map: OrderedComponentMap = ordered_map::build(comps, minus_inf, &mut leaf_queue);

    let mut arc_map: Vec<Option<ArcId>> = vec![None; num_verts];
    let mut node_map: Vec<Option<NodeId>> = vec![None; num_verts];
    let mut last_arc: Option<ArcId> = None;

    loop {
        let leaf = leaf_queue.pop_front().expect("merge: leaf queue exhausted before termination");

        if comps.get(leaf).death == NIL {
            let arc = last_arc.expect("merge: terminal leaf popped before any arc was created");
            arc_map[comps.get(leaf).birth] = Some(arc);
            return (arc, arc_map);
        }

        let leaf_ty = comps.get(leaf).ty;
        let birth = comps.get(leaf).birth;
        let death = comps.get(leaf).death;

        let (hi, lo, other_map, next): (NodeId, NodeId, &OrderedComponentMap, &[VId]) = match leaf_ty {
            ComponentType::Join => {
                let lo = node_for(tree, &mut node_map, birth);
                let hi = node_for(tree, &mut node_map, death);
                (hi, lo, &split_map, next_join)
            }
            ComponentType::Split => {
                let hi = node_for(tree, &mut node_map, birth);
                let lo = node_for(tree, &mut node_map, death);
                (hi, lo, &join_map, next_split)
            }
        };

        let arc = tree.new_arc(hi, lo);
        tree.add_down_arc(hi, arc);
        tree.add_up_arc(lo, arc);
        last_arc = Some(arc);

        let mut c = birth;
        while c != death {
            if arc_map[c].is_none() {
                arc_map[c] = Some(arc);
                if let Some(cb) = proc_vertex.as_deref_mut() {
                    cb(c, arc);
                }
            }
            c = next[c];
        }

        let succ = comps.get(leaf).succ.expect("merge: leaf has no successor");
        comps.prune(leaf);

        let other = other_map.find(comps, birth);
        let succ_birth = comps.get(succ).birth;
        let other_succ = other_map.find(comps, succ_birth);
        assert!(comps.is_regular(other), "merge: counterpart component is not regular");

        let other_pred = comps.get(other).pred.expect("merge: regular component has no predecessor");
        comps.eat_successor(other_pred);

        if comps.is_leaf(succ) && comps.is_regular(other_succ) {
            leaf_queue.push_back(succ);
        } else if comps.is_regular(succ) && comps.is_leaf(other_succ) {
            leaf_queue.push_back(other_succ);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::augment;
    use crate::mesh::Mesh;
    use crate::order::TotalOrder;
    use crate::sweep::sweep;

    /// vertices 0,1,2; edges 0-1,1-2; 1 is the global minimum, 0 and 2 are
    /// both local maxima. Already a valid contour tree: no regular vertices
    /// to simplify away, so merge should produce exactly the input shape.
    struct V;
    impl Mesh for V {
        fn value(&self, v: VId) -> f64 {
            match v {
                1 => 0.0,
                _ => 1.0,
            }
        }
        fn neighbors(&self, v: VId, buf: &mut [VId]) -> usize {
            match v {
                0 => {
                    buf[0] = 1;
                    1
                }
                1 => {
                    buf[0] = 0;
                    buf[1] = 2;
                    2
                }
                2 => {
                    buf[0] = 1;
                    1
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn simple_v_merges_into_two_arc_contour_tree() {
        let mesh = V;
        let order = TotalOrder::new(vec![1, 0, 2]);
        let mut comps = ComponentArena::new();

        let mut join_comps = vec![None; 3];
        let mut next_join = vec![NIL; 3];
        let join_root =
            sweep(&mesh, &order, ComponentType::Join, true, 256, &mut join_comps, &mut next_join, &mut comps);

        let mut split_comps = vec![None; 3];
        let mut next_split = vec![NIL; 3];
        let mut split_root =
            sweep(&mesh, &order, ComponentType::Split, false, 256, &mut split_comps, &mut next_split, &mut comps);

        augment(&order, &mut split_root, &join_comps, &split_comps, &mut comps);

        let mut tree: TreeArena<()> = TreeArena::new();
        let (_root_arc, arc_map) =
            merge(3, join_root, split_root, &next_join, &next_split, &mut comps, &mut tree, &mut None);

        assert_eq!(tree.num_nodes(), 3);
        assert_eq!(tree.num_arcs(), 2);
        assert!(arc_map.iter().all(|a| a.is_some()));
    }
}

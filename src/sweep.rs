/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The monotone sweep: a single forward (join) or backward (split) pass over
//! the total order, growing components via union-find as the scalar field's
//! level sets merge.

use smallvec::SmallVec;

use crate::component::{ComponentArena, ComponentId, ComponentType};
use crate::mesh::Mesh;
use crate::order::{TotalOrder, VId, NIL};

/// Runs one monotone sweep and returns the surviving root component.
///
/// `forward` selects join (ascending `TotalOrder`) vs. split (descending)
/// sweep direction. `comps[v]` is left pointing at the (possibly non-root)
/// component `v` was last attached to; `next[v]` threads the per-component
/// vertex chain used later by the merge engine.
pub fn sweep<M: Mesh>(
    mesh: &M,
    order: &TotalOrder,
    ty: ComponentType,
    forward: bool,
    max_valence: usize,
    comps: &mut [Option<ComponentId>],
    next: &mut [VId],
    arena: &mut ComponentArena,
) -> ComponentId {
    let n = order.len();
    assert!(n > 0, "sweep: empty total order");

    let mut nbrs: SmallVec<[VId; 16]> = SmallVec::new();
    nbrs.resize(max_valence, 0);

    let ranks: Box<dyn Iterator<Item = usize>> =
        if forward { Box::new(0..n) } else { Box::new((0..n).rev()) };

    let mut last_vertex = NIL;
    for itr in ranks {
        let i = order.vertex_at(itr);
        let num_nbrs = mesh.neighbors(i, &mut nbrs);
        assert!(num_nbrs <= max_valence, "neighbors() reported more than max_valence neighbors");

        let mut i_comp: Option<ComponentId> = None;
        let mut num_nbr_comps = 0usize;

        for &j in &nbrs[..num_nbrs] {
            let Some(raw) = comps[j] else { continue };
            let j_comp = arena.find(raw);
            if i_comp == Some(j_comp) {
                continue;
            }
            match num_nbr_comps {
                0 => {
                    num_nbr_comps += 1;
                    i_comp = Some(j_comp);
                    comps[i] = Some(j_comp);
                    let last = arena.get(j_comp).last;
                    next[last] = i;
                }
                1 => {
                    let prev_i_comp = i_comp.unwrap();
                    let new_comp = arena.new_component(ty);
                    arena.get_mut(new_comp).birth = i;
                    arena.add_pred(new_comp, prev_i_comp);
                    arena.add_pred(new_comp, j_comp);

                    arena.get_mut(prev_i_comp).death = i;
                    arena.get_mut(prev_i_comp).succ = Some(new_comp);
                    arena.union(prev_i_comp, new_comp);

                    arena.get_mut(j_comp).death = i;
                    arena.get_mut(j_comp).succ = Some(new_comp);
                    arena.union(j_comp, new_comp);

                    let j_last = arena.get(j_comp).last;
                    next[j_last] = i;

                    arena.get_mut(new_comp).last = i;
                    i_comp = Some(new_comp);
                    comps[i] = Some(new_comp);
                    num_nbr_comps += 1;
                }
                _ => {
                    let cur_i_comp = i_comp.unwrap();
                    arena.get_mut(j_comp).death = i;
                    arena.get_mut(j_comp).succ = Some(cur_i_comp);
                    arena.union(j_comp, cur_i_comp);
                    arena.add_pred(cur_i_comp, j_comp);
                    let j_last = arena.get(j_comp).last;
                    next[j_last] = i;
                }
            }
        }

        match num_nbr_comps {
            0 => {
                let new_comp = arena.new_component(ty);
                arena.get_mut(new_comp).birth = i;
                arena.get_mut(new_comp).last = i;
                comps[i] = Some(new_comp);
            }
            1 => {
                arena.get_mut(i_comp.unwrap()).last = i;
            }
            _ => {}
        }

        last_vertex = i;
    }

    let root = arena.find(comps[last_vertex].expect("sweep: final vertex has no component"));
    arena.get_mut(root).death = last_vertex;
    next[last_vertex] = NIL;
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh as _;

    /// Path graph 0-1-2-3-4, swept forward, should produce a single
    /// component spanning the whole chain.
    struct Path(usize);
    impl Mesh for Path {
        fn value(&self, v: VId) -> f64 {
            v as f64
        }
        fn neighbors(&self, v: VId, buf: &mut [VId]) -> usize {
            let mut n = 0;
            if v > 0 {
                buf[n] = v - 1;
                n += 1;
            }
            if v + 1 < self.0 {
                buf[n] = v + 1;
                n += 1;
            }
            n
        }
    }

    #[test]
    fn forward_sweep_of_monotone_chain_is_single_component() {
        let mesh = Path(5);
        let order = TotalOrder::new(vec![0, 1, 2, 3, 4]);
        let mut comps = vec![None; 5];
        let mut next = vec![NIL; 5];
        let mut arena = ComponentArena::new();

        let root = sweep(&mesh, &order, ComponentType::Join, true, 256, &mut comps, &mut next, &mut arena);
        assert_eq!(arena.get(root).birth, 0);
        assert_eq!(arena.get(root).death, 4);
        assert!(arena.is_leaf(root));

        let mut v = 0;
        let mut count = 1;
        while next[v] != NIL {
            v = next[v];
            count += 1;
        }
        assert_eq!(count, 5);
        assert_eq!(v, 4);
    }

    #[test]
    fn v_shape_produces_saddle_at_minimum() {
        // vertices 0,1,2; edges 0-1,1-2; rank order puts 1 first (the minimum).
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
        let mesh = V;
        let order = TotalOrder::new(vec![1, 0, 2]);
        let mut comps = vec![None; 3];
        let mut next = vec![NIL; 3];
        let mut arena = ComponentArena::new();
        let root = sweep(&mesh, &order, ComponentType::Join, true, 256, &mut comps, &mut next, &mut arena);
        assert_eq!(arena.get(root).birth, 1);
        assert_eq!(arena.get(root).death, 2);
        assert!(arena.is_regular(root) || arena.is_leaf(root));
    }
}

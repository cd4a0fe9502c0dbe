/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Augmentation: after both sweeps finish, insert virtual critical points so
//! the join and split component graphs agree on which vertices are critical.
//! Required before the merge engine can interleave them.

use crate::component::{ComponentArena, ComponentId, ComponentType};
use crate::order::{TotalOrder, VId};

/// Augments the join/split component graphs in place. `join_comps` and
/// `split_comps` are the `comps[]` tables left behind by each sweep.
/// `split_root` is updated in place if augmentation relocates the component
/// it refers to; the join root never needs relocating (see below).
pub fn augment(
    order: &TotalOrder,
    split_root: &mut ComponentId,
    join_comps: &[Option<ComponentId>],
    split_comps: &[Option<ComponentId>],
    arena: &mut ComponentArena,
) {
    let n = order.len();
    if n < 2 {
        return;
    }
    for itr in 1..n - 1 {
        let i: VId = order.vertex_at(itr);
        let join_comp = join_comps[i].expect("augment: vertex missing from join sweep");
        let split_comp = split_comps[i].expect("augment: vertex missing from split sweep");

        let join_birth = arena.get(join_comp).birth;
        let split_birth = arena.get(split_comp).birth;

        if join_birth == i && split_birth != i {
            let new_comp = arena.new_component(ComponentType::Split);
            arena.get_mut(new_comp).birth = i;
            let split_death = arena.get(split_comp).death;
            arena.get_mut(new_comp).death = split_death;
            arena.get_mut(split_comp).death = i;

            if let Some(succ) = arena.get(split_comp).succ {
                arena.remove_pred(succ, split_comp);
                arena.add_pred(succ, new_comp);
            }
            let succ = arena.get(split_comp).succ;
            arena.get_mut(new_comp).succ = succ;
            arena.add_pred(new_comp, split_comp);
            arena.get_mut(split_comp).succ = Some(new_comp);

            if split_comp == *split_root {
                *split_root = new_comp;
            }
        } else if split_birth == i && join_birth != i {
            let new_comp = arena.new_component(ComponentType::Join);
            arena.get_mut(new_comp).death = i;
            arena.get_mut(new_comp).birth = join_birth;
            arena.get_mut(join_comp).birth = i;

            while let Some(p) = arena.get(join_comp).pred {
                arena.remove_pred(join_comp, p);
                arena.add_pred(new_comp, p);
                arena.get_mut(p).succ = Some(new_comp);
            }
            arena.add_pred(join_comp, new_comp);
            arena.get_mut(new_comp).succ = Some(join_comp);
            // join_root still refers to join_comp itself here; only its
            // birth field moved, so no reassignment is needed (contrast
            // with the split branch above, where the root component
            // changes identity).
        }
    }
}

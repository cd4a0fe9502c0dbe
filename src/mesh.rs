/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The [`Mesh`] collaborator: the caller's domain, expressed as the two
//! queries the construction algorithms actually need.

use crate::order::VId;

/// Default value for [`crate::context::Context::set_max_valence`], matching
/// the upstream library's default. Large enough for most simplicial meshes;
/// raise it if a vertex can have more neighbors than this.
pub const DEFAULT_MAX_VALENCE: usize = 256;

/// The mesh (or more generally, the adjacency structure of the domain) a
/// contour tree is built over.
///
/// Implementors only need to answer two questions: what is a vertex's scalar
/// value, and who are its neighbors. Everything else -- the total order, the
/// sweep, the merge -- is supplied by this crate.
pub trait Mesh {
    /// Scalar field value at vertex `v`. Used to estimate persistence for
    /// the default branch-decomposition priority; the total order passed to
    /// `Context::new` takes precedence for everything else.
    fn value(&self, v: VId) -> f64;

    /// Writes the neighbors of `v` into `buf`, returning how many were
    /// written. `buf.len()` is at least `max_valence` (see
    /// [`DEFAULT_MAX_VALENCE`]); implementations must not report more
    /// neighbors than that.
    fn neighbors(&self, v: VId, buf: &mut [VId]) -> usize;
}

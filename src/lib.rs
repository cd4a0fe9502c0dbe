/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Contour tree construction and branch decomposition for a scalar field
//! sampled on an arbitrary mesh.
//!
//! A contour tree tracks how the connected components of a level set
//! `{x : f(x) = c}` merge and split as `c` sweeps from the field's minimum to
//! its maximum. This crate builds one from two monotone sweeps (join and
//! split, [`sweep`]), reconciles them ([`augment`]) and interleaves them into
//! a single tree ([`merge`]); [`branch`] then simplifies that tree into a
//! branch decomposition ordered by topological persistence.
//!
//! The entry point is [`Context`](context::Context):
//!
//! ```
//! use contourtree::{Context, Mesh, TotalOrder, VId};
//!
//! struct Path(usize);
//! impl Mesh for Path {
//!     fn value(&self, v: VId) -> f64 {
//!         v as f64
//!     }
//!     fn neighbors(&self, v: VId, buf: &mut [VId]) -> usize {
//!         let mut n = 0;
//!         if v > 0 {
//!             buf[n] = v - 1;
//!             n += 1;
//!         }
//!         if v + 1 < self.0 {
//!             buf[n] = v + 1;
//!             n += 1;
//!         }
//!         n
//!     }
//! }
//!
//! let order = TotalOrder::new(vec![0, 1, 2, 3, 4]);
//! let mut ctx: Context<Path, ()> = Context::new(order, Path(5));
//! ctx.sweep_and_merge();
//! let root = ctx.decompose();
//! assert_eq!(ctx.branches().unwrap().len(), 1);
//! let _ = root;
//! ```
//!
//! See `demos/grid2d.rs` for a [`Mesh`] implementation over a regular grid.

pub mod augment;
pub mod branch;
pub mod component;
pub mod context;
pub mod merge;
pub mod mesh;
pub mod order;
pub mod ordered_map;
pub mod sweep;
pub mod tree;
pub mod unionfind;

pub use branch::{Branch, BranchArena, BranchId, BranchList};
pub use component::{Component, ComponentArena, ComponentId, ComponentType};
pub use context::{arcs_and_nodes, copy_tree, Context};
pub use mesh::{Mesh, DEFAULT_MAX_VALENCE};
pub use order::{TotalOrder, VId, NIL};
pub use tree::{Arc, ArcId, Node, NodeId, TreeArena};

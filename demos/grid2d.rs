/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Builds and decomposes the contour tree of a small synthetic height field
//! on a regular 4-connected grid, printing the resulting branches.

use contourtree::{Context, Mesh, TotalOrder, VId};

/// A `w`x`h` grid of `f64` heights, 4-connected, row-major.
struct Grid {
    w: usize,
    h: usize,
    heights: Vec<f64>,
}

impl Grid {
    fn new(w: usize, h: usize, heights: Vec<f64>) -> Self {
        assert_eq!(heights.len(), w * h);
        Grid { w, h, heights }
    }

    fn xy(&self, v: VId) -> (usize, usize) {
        (v % self.w, v / self.w)
    }
}

impl Mesh for Grid {
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

/// Builds a total order by sorting vertices by height, breaking ties by
/// vertex id. Real callers with exact ties at scale will want a more careful
/// tie-break; for a grid of distinct heights this is enough.
fn total_order_by_height(grid: &Grid) -> TotalOrder {
    let n = grid.w * grid.h;
    let mut order: Vec<VId> = (0..n).collect();
    order.sort_by(|&a, &b| grid.value(a).partial_cmp(&grid.value(b)).unwrap().then(a.cmp(&b)));
    TotalOrder::new(order)
}

fn main() {
    // A single "bump" in the middle of a 5x5 grid of zeros: one minimum
    // basin around the border, one maximum at the center, no saddles.
    let w = 5;
    let h = 5;
    let mut heights = vec![0.0; w * h];
    heights[2 * w + 2] = 10.0;
    let grid = Grid::new(w, h, heights);
    let order = total_order_by_height(&grid);

    let mut ctx: Context<Grid, ()> = Context::new(order, grid);
    ctx.sweep_and_merge();
    println!("contour tree: {} nodes, {} arcs", ctx.tree().unwrap().num_nodes(), ctx.tree().unwrap().num_arcs());

    let root = ctx.decompose();
    let branches = ctx.branches().unwrap();
    println!("root branch: extremum={} saddle={}", branches.get(root).extremum, branches.get(root).saddle);
    for child in branches.children(&branches.get(root).children) {
        let b = branches.get(child);
        println!("  child branch: extremum={} saddle={}", b.extremum, b.saddle);
    }
}

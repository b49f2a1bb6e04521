//! Local refinement of assembled trees.

use crate::tree::{adjacency, Point, Tree};

/// Lower median of `values`.
fn lower_median(mut values: Vec<i32>) -> i32 {
    values.sort_unstable();
    values[(values.len() - 1) / 2]
}

/// Moves every Steiner node to the median of its neighbors while that
/// shortens the tree, until no node moves.
pub(crate) fn refine(mut tree: Tree) -> Tree {
    let adj = adjacency(tree.branches.len(), &tree.edges());
    loop {
        let mut moved = false;
        for s in tree.deg..tree.branches.len() {
            if adj[s].is_empty() {
                continue;
            }
            let around: Vec<Point> = adj[s].iter().map(|&q| tree.branches[q].point()).collect();
            let cost = |at: Point| around.iter().map(|&q| at.dist(q)).sum::<i64>();
            let target = Point::new(
                lower_median(around.iter().map(|p| p.x).collect()),
                lower_median(around.iter().map(|p| p.y).collect()),
            );
            let here = tree.branches[s].point();
            if cost(target) < cost(here) {
                tree.branches[s].x = target.x;
                tree.branches[s].y = target.y;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
    tree.length = tree.wirelength();
    tree
}

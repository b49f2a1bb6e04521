//! Exact Steiner trees on the Hanan grid.
//!
//! A Dreyfus-Wagner dynamic program over subsets of the terminals. The
//! optimal rectilinear Steiner tree always has its Steiner points on the
//! grid formed by the terminals' x and y coordinates, so restricting the
//! search to that grid loses nothing.

use crate::tree::{adjacency, Point, Tree};
use std::collections::{BTreeMap, BTreeSet};

/// The Hanan grid of a pin set.
struct Grid {
    xs: Vec<i32>,
    ys: Vec<i32>,
}

impl Grid {
    fn new(points: &[Point]) -> Self {
        let mut xs: Vec<i32> = points.iter().map(|p| p.x).collect();
        let mut ys: Vec<i32> = points.iter().map(|p| p.y).collect();
        xs.sort_unstable();
        xs.dedup();
        ys.sort_unstable();
        ys.dedup();
        Self { xs, ys }
    }

    fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    fn point(&self, v: usize) -> Point {
        Point::new(self.xs[v % self.xs.len()], self.ys[v / self.xs.len()])
    }

    fn node_of(&self, p: Point) -> usize {
        let ix = self.xs.partition_point(|&x| x < p.x);
        let iy = self.ys.partition_point(|&y| y < p.y);
        iy * self.xs.len() + ix
    }

    fn dist(&self, u: usize, v: usize) -> i64 {
        self.point(u).dist(self.point(v))
    }
}

/// Disjoint-set forest used to drop edges that would close a cycle.
struct UnionFind(Vec<usize>);

impl UnionFind {
    fn new(n: usize) -> Self {
        Self((0..n).collect())
    }

    fn find(&mut self, mut v: usize) -> usize {
        while self.0[v] != v {
            self.0[v] = self.0[self.0[v]];
            v = self.0[v];
        }
        v
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.0[ra.max(rb)] = ra.min(rb);
        true
    }
}

/// Finds a minimum rectilinear Steiner tree over `points` (at least 4 of them).
///
/// Terminals keep their input order; Steiner points follow, padded with
/// zero-length nodes on terminal 0 up to `2 * deg - 2` branches.
pub(crate) fn exact_tree(points: &[Point]) -> Tree {
    let d = points.len();
    let grid = Grid::new(points);
    let nv = grid.len();
    let term: Vec<usize> = points.iter().map(|&p| grid.node_of(p)).collect();

    // Terminal d-1 is the root; masks range over the other d-1.
    let k = d - 1;
    let full = (1usize << k) - 1;
    let mut cost = vec![vec![i64::MAX; nv]; full + 1];
    let mut from = vec![vec![0usize; nv]; full + 1];
    let mut split = vec![vec![0usize; nv]; full + 1];

    for i in 0..k {
        for v in 0..nv {
            cost[1 << i][v] = grid.dist(term[i], v);
        }
    }
    for mask in 1..=full {
        if mask.count_ones() < 2 {
            continue;
        }
        let low = mask & mask.wrapping_neg();
        let mut joined = vec![i64::MAX; nv];
        for v in 0..nv {
            let rest = mask ^ low;
            // Submasks that contain the lowest bit, excluding `mask` itself.
            let mut sub = rest;
            loop {
                let left = sub | low;
                if left != mask {
                    let c = cost[left][v] + cost[mask ^ left][v];
                    if c < joined[v] {
                        joined[v] = c;
                        split[mask][v] = left;
                    }
                }
                if sub == 0 {
                    break;
                }
                sub = (sub - 1) & rest;
            }
        }
        for v in 0..nv {
            let mut best = i64::MAX;
            for u in 0..nv {
                if joined[u] == i64::MAX {
                    continue;
                }
                let c = joined[u] + grid.dist(u, v);
                if c < best {
                    best = c;
                    from[mask][v] = u;
                }
            }
            cost[mask][v] = best;
        }
    }

    // Walk the choices back into grid edges.
    let mut grid_edges = Vec::new();
    let mut stack = vec![(full, term[d - 1])];
    while let Some((mask, v)) = stack.pop() {
        if mask.count_ones() == 1 {
            grid_edges.push((v, term[mask.trailing_zeros() as usize]));
            continue;
        }
        let u = from[mask][v];
        grid_edges.push((v, u));
        let left = split[mask][u];
        stack.push((left, u));
        stack.push((mask ^ left, u));
    }

    build_tree(points, &grid, &term, &grid_edges)
}

/// Converts grid edges into a tree over the terminals and degree-3+ Steiner points.
fn build_tree(points: &[Point], grid: &Grid, term: &[usize], grid_edges: &[(usize, usize)]) -> Tree {
    let d = points.len();

    // Grid nodes hosting a terminal map to the first such terminal.
    let mut owner: BTreeMap<usize, usize> = BTreeMap::new();
    for (i, &g) in term.iter().enumerate() {
        owner.entry(g).or_insert(i);
    }
    let mut steiner_ids: BTreeMap<usize, usize> = BTreeMap::new();
    let mut nodes: Vec<Point> = points.to_vec();
    let mut node_of = |g: usize, nodes: &mut Vec<Point>| -> usize {
        if let Some(&t) = owner.get(&g) {
            return t;
        }
        *steiner_ids.entry(g).or_insert_with(|| {
            nodes.push(grid.point(g));
            nodes.len() - 1
        })
    };

    let mut edges: BTreeSet<(usize, usize)> = BTreeSet::new();
    for (i, &g) in term.iter().enumerate() {
        let t = owner[&g];
        if t != i {
            edges.insert((t.min(i), t.max(i)));
        }
    }
    for &(a, b) in grid_edges {
        let (a, b) = (node_of(a, &mut nodes), node_of(b, &mut nodes));
        if a != b {
            edges.insert((a.min(b), a.max(b)));
        }
    }
    let mut uf = UnionFind::new(nodes.len());
    let mut kept: Vec<(usize, usize)> = edges.into_iter().filter(|&(a, b)| uf.union(a, b)).collect();

    // Splice out Steiner points of degree one or two.
    let mut alive = vec![true; nodes.len()];
    loop {
        let adj = adjacency(nodes.len(), &kept);
        let Some(s) = (d..nodes.len()).find(|&s| alive[s] && adj[s].len() <= 2) else {
            break;
        };
        alive[s] = false;
        kept.retain(|&(a, b)| a != s && b != s);
        if let [a, b] = adj[s][..] {
            kept.push((a.min(b), a.max(b)));
        }
    }

    // Compact the surviving Steiner points and pad to 2d - 2 nodes.
    let mut index = vec![usize::MAX; nodes.len()];
    let mut compact: Vec<Point> = points.to_vec();
    for (i, slot) in index.iter_mut().enumerate().take(d) {
        *slot = i;
    }
    for s in d..nodes.len() {
        if alive[s] {
            index[s] = compact.len();
            compact.push(nodes[s]);
        }
    }
    let mut final_edges: Vec<(usize, usize)> = kept.iter().map(|&(a, b)| (index[a], index[b])).collect();
    while compact.len() < 2 * d - 2 {
        final_edges.push((compact.len(), 0));
        compact.push(points[0]);
    }
    Tree::from_edges(d, &compact, &final_edges)
}

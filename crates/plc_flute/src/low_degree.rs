//! Trees for nets of at most `FLUTE_D` pins.

use crate::hanan::exact_tree;
use crate::lut::{DegreeTable, LutTable, Solution, NUM_GROUPS};
use crate::tree::{Branch, Point, Tree};

/// Pins ordered for table lookup.
struct Ranked {
    /// Sorted x coordinates.
    xs: Vec<i32>,
    /// Sorted y coordinates.
    ys: Vec<i32>,
    /// `s[i]` is the x rank of the pin with the `i`-th smallest y.
    s: Vec<usize>,
    /// Input index of the pin with the `i`-th smallest y.
    order: Vec<usize>,
}

impl Ranked {
    /// Ranks by `(x, y, index)` horizontally and `(y, x rank)` vertically.
    fn new(points: &[Point]) -> Self {
        let d = points.len();
        let mut by_x: Vec<usize> = (0..d).collect();
        by_x.sort_by_key(|&i| (points[i].x, points[i].y, i));
        let mut x_rank = vec![0; d];
        for (rank, &i) in by_x.iter().enumerate() {
            x_rank[i] = rank;
        }
        let mut order: Vec<usize> = (0..d).collect();
        order.sort_by_key(|&i| (points[i].y, x_rank[i]));
        Self {
            xs: by_x.iter().map(|&i| points[i].x).collect(),
            ys: order.iter().map(|&i| points[i].y).collect(),
            s: order.iter().map(|&i| x_rank[i]).collect(),
            order,
        }
    }

    /// Group index of the rank sequence, before horizontal folding.
    fn group_index(&self) -> usize {
        let s = &self.s;
        let d = s.len();
        let mut k = usize::from(s[0] < s[2]) + usize::from(s[1] < s[2]);
        for i in 3..d {
            let smaller_later = s[i + 1..].iter().filter(|&&sj| sj < s[i]).count();
            k = (s[i] - smaller_later) + (i + 1) * k;
        }
        k
    }

    /// Moves terminal branches from rank order to input order.
    fn to_input_order(&self, tree: Tree) -> Tree {
        let d = self.order.len();
        let map = |i: usize| if i < d { self.order[i] } else { i };
        let mut branches = tree.branches.clone();
        for (i, b) in tree.branches.iter().enumerate() {
            branches[map(i)] = Branch {
                x: b.x,
                y: b.y,
                n: map(b.n),
            };
        }
        Tree { branches, ..tree }
    }
}

/// Builds the tree of the cheapest solution in the pins' group.
///
/// Returns `None` when the group holds no solution.
fn lut_tree(table: &DegreeTable, points: &[Point]) -> Option<Tree> {
    let d = points.len();
    let r = Ranked::new(points);
    let (xs, ys, s) = (&r.xs, &r.ys, &r.s);
    let gap = |a: i32, b: i32| i64::from(a) - i64::from(b);

    let mut k = r.group_index();
    let hflip = k >= NUM_GROUPS[d];
    if hflip {
        k = 2 * NUM_GROUPS[d] - 1 - k;
    }
    let mut dd = vec![0i64; 2 * d - 2];
    for i in 1..=d - 3 {
        dd[i] = gap(ys[i + 1], ys[i]);
        dd[d - 1 + i] = if hflip {
            gap(xs[d - 1 - i], xs[d - 2 - i])
        } else {
            gap(xs[i + 1], xs[i])
        };
    }

    // lengths[0] is the bounding box; solution i is priced against lengths[parent].
    let solutions = table.group(k);
    let mut lengths = Vec::with_capacity(solutions.len() + 1);
    lengths.push(gap(xs[d - 1], xs[0]) + gap(ys[d - 1], ys[0]));
    let mut best: Option<(i64, &Solution)> = None;
    for soln in solutions {
        let base = *lengths.get(usize::from(soln.parent))?;
        let len = base + soln.added().map(|i| dd[i]).sum::<i64>()
            - soln.removed().map(|i| dd[i]).sum::<i64>();
        if best.map_or(true, |(best_len, _)| len < best_len) {
            best = Some((len, soln));
        }
        lengths.push(len);
    }
    let (best_len, best) = best?;

    let neighbor = |i: usize| usize::from(best.neighbor[i]);
    let mut branches: Vec<Branch> = (0..d)
        .map(|i| Branch {
            x: xs[s[i]],
            y: ys[i],
            n: neighbor(i),
        })
        .collect();
    // The first and last pairs are stored in canonical order; swap them back.
    let swap_first = if hflip { s[1] < s[0] } else { s[0] < s[1] };
    let swap_last = if hflip { s[d - 1] < s[d - 2] } else { s[d - 2] < s[d - 1] };
    if swap_first {
        branches[0].n = neighbor(1);
        branches[1].n = neighbor(0);
    }
    if swap_last {
        branches[d - 2].n = neighbor(d - 1);
        branches[d - 1].n = neighbor(d - 2);
    }
    for (j, &rc) in best.rowcol.iter().enumerate() {
        let col = usize::from(rc % 16);
        let row = usize::from(rc / 16);
        branches.push(Branch {
            x: if hflip { xs[d - 1 - col] } else { xs[col] },
            y: ys[row],
            n: neighbor(d + j),
        });
    }
    let tree = Tree {
        deg: d,
        length: best_len,
        branches,
    };
    Some(r.to_input_order(tree))
}

/// Solves a net of at most `FLUTE_D` pins.
///
/// Degrees 4 and up use `lut` when it covers the degree and the exact Hanan
/// grid solver otherwise.
pub(crate) fn small_tree(points: &[Point], lut: Option<&LutTable>) -> Tree {
    match points.len() {
        0 => Tree::empty(),
        1 => Tree {
            deg: 1,
            length: 0,
            branches: vec![Branch {
                x: points[0].x,
                y: points[0].y,
                n: 0,
            }],
        },
        2 => Tree::from_edges(2, points, &[(0, 1)]),
        3 => {
            let r = Ranked::new(points);
            let median = Point::new(r.xs[1], r.ys[1]);
            let mut nodes = points.to_vec();
            nodes.push(median);
            Tree::from_edges(3, &nodes, &[(0, 3), (1, 3), (2, 3)])
        }
        d => lut
            .and_then(|lut| lut.degree(d))
            .and_then(|table| lut_tree(table, points))
            .unwrap_or_else(|| exact_tree(points)),
    }
}

//! Joining the trees of two halves of a split net.
//!
//! Both halves contain the pin at the cut. The second half's copy of that
//! pin becomes a Steiner node `S*` tied to the shared terminal by a zero
//! length edge; the horizontal and vertical variants then slide `S*` along
//! the cut line and move the shared pin's edges onto it while that shortens
//! the tree.

use crate::tree::{adjacency, Point, Tree};

/// Orientation of the line a net was split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum CutLine {
    /// Split at a y coordinate; `S*` keeps the shared pin's y.
    Horizontal,
    /// Split at an x coordinate; `S*` keeps the shared pin's x.
    Vertical,
}

/// A split net: the pin indices of each side and the pin they share.
pub(crate) struct Split<'a> {
    /// All pins of the net.
    pub points: &'a [Point],
    /// Net indices of the first side, in net order.
    pub first: &'a [usize],
    /// Net indices of the second side, in net order.
    pub second: &'a [usize],
    /// Net index of the shared pin.
    pub shared: usize,
}

/// Node positions and undirected edges of a tree under construction.
struct Graph {
    nodes: Vec<Point>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    fn neighbors(&self, v: usize) -> Vec<usize> {
        adjacency(self.nodes.len(), &self.edges).swap_remove(v)
    }

    fn star_cost(&self, center: Point, around: &[usize]) -> i64 {
        around.iter().map(|&q| center.dist(self.nodes[q])).sum()
    }

    fn rewire(&mut self, q: usize, from: usize, to: usize) {
        for edge in &mut self.edges {
            if *edge == (q, from) {
                *edge = (q, to);
            } else if *edge == (from, q) {
                *edge = (to, q);
            }
        }
    }
}

/// Concatenates the two trees with `S*` as the last node.
fn join(split: &Split<'_>, t1: &Tree, t2: &Tree) -> (Graph, usize) {
    let d = split.points.len();
    let (n1, n2) = (split.first.len(), split.second.len());
    let steiner1 = t1.branches.len() - n1;
    let star = d + steiner1 + (t2.branches.len() - n2);

    let mut nodes = split.points.to_vec();
    nodes.extend(t1.branches[n1..].iter().map(|b| b.point()));
    nodes.extend(t2.branches[n2..].iter().map(|b| b.point()));
    nodes.push(split.points[split.shared]);

    let map1 = |i: usize| if i < n1 { split.first[i] } else { d + i - n1 };
    let map2 = |i: usize| {
        if i >= n2 {
            d + steiner1 + i - n2
        } else if split.second[i] == split.shared {
            star
        } else {
            split.second[i]
        }
    };
    let mut edges: Vec<(usize, usize)> = Vec::with_capacity(nodes.len());
    edges.extend(t1.edges().into_iter().map(|(a, b)| (map1(a), map1(b))));
    edges.extend(t2.edges().into_iter().map(|(a, b)| (map2(a), map2(b))));
    edges.push((star, split.shared));
    (Graph { nodes, edges }, star)
}

/// Joins the halves without moving anything.
pub(crate) fn dmerge_tree(split: &Split<'_>, t1: &Tree, t2: &Tree) -> Tree {
    let (graph, _) = join(split, t1, t2);
    Tree::from_edges(split.points.len(), &graph.nodes, &graph.edges)
}

/// Joins the halves of a net cut along a horizontal line.
pub(crate) fn hmerge_tree(split: &Split<'_>, t1: &Tree, t2: &Tree) -> Tree {
    merge_along(split, t1, t2, CutLine::Horizontal)
}

/// Joins the halves of a net cut along a vertical line.
pub(crate) fn vmerge_tree(split: &Split<'_>, t1: &Tree, t2: &Tree) -> Tree {
    merge_along(split, t1, t2, CutLine::Vertical)
}

fn merge_along(split: &Split<'_>, t1: &Tree, t2: &Tree, line: CutLine) -> Tree {
    let (mut graph, star) = join(split, t1, t2);
    let p = split.shared;
    let anchor = graph.nodes[p];
    let place = |free: i32| match line {
        CutLine::Horizontal => Point::new(free, anchor.y),
        CutLine::Vertical => Point::new(anchor.x, free),
    };
    let free_coord = |pt: Point| match line {
        CutLine::Horizontal => pt.x,
        CutLine::Vertical => pt.y,
    };

    loop {
        let at_p: Vec<usize> = graph.neighbors(p).into_iter().filter(|&q| q != star).collect();
        let at_star = graph.neighbors(star);
        let current = graph.star_cost(anchor, &at_p) + graph.star_cost(graph.nodes[star], &at_star);

        // Candidate moves: reposition S* alone, or hand one of p's edges to it.
        let mut best: Option<(i64, Option<usize>, Point)> = None;
        for moved in std::iter::once(None).chain(at_p.iter().copied().map(Some)) {
            let mut around = at_star.clone();
            let mut stay = at_p.clone();
            if let Some(q) = moved {
                around.push(q);
                stay.retain(|&x| x != q);
            }
            let fixed = graph.star_cost(anchor, &stay);
            for &cand in &around {
                let pos = place(free_coord(graph.nodes[cand]));
                let gain = current - fixed - graph.star_cost(pos, &around);
                if gain > 0 && best.map_or(true, |(g, _, _)| gain > g) {
                    best = Some((gain, moved, pos));
                }
            }
        }
        let Some((_, moved, pos)) = best else {
            break;
        };
        if let Some(q) = moved {
            graph.rewire(q, p, star);
        }
        graph.nodes[star] = pos;
    }
    Tree::from_edges(split.points.len(), &graph.nodes, &graph.edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::assert_valid;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// A net split at pin 1 into `{0, 1}` and `{1, 2}` solved as two-pin trees.
    fn two_segments(points: &[Point]) -> (Tree, Tree) {
        let t1 = Tree::from_edges(2, &[points[0], points[1]], &[(0, 1)]);
        let t2 = Tree::from_edges(2, &[points[1], points[2]], &[(0, 1)]);
        (t1, t2)
    }

    #[test]
    fn dmerge_keeps_lengths() {
        let points = pts(&[(0, 0), (4, 2), (8, 0)]);
        let (t1, t2) = two_segments(&points);
        let split = Split {
            points: &points,
            first: &[0, 1],
            second: &[1, 2],
            shared: 1,
        };
        let tree = dmerge_tree(&split, &t1, &t2);
        assert_eq!(tree.length, t1.length + t2.length);
        assert_valid(&tree, &points);
    }

    #[test]
    fn hmerge_slides_along_cut() {
        let points = pts(&[(0, 0), (4, 4), (1, 4), (0, 8)]);
        let t1 = Tree::from_edges(2, &[points[0], points[2]], &[(0, 1)]);
        let t2 = Tree::from_edges(
            3,
            &[points[1], points[2], points[3], Point::new(1, 4)],
            &[(0, 3), (1, 3), (2, 3)],
        );
        let split = Split {
            points: &points,
            first: &[0, 2],
            second: &[1, 2, 3],
            shared: 2,
        };
        let plain = dmerge_tree(&split, &t1, &t2);
        let merged = hmerge_tree(&split, &t1, &t2);
        assert!(merged.length <= plain.length);
        assert_valid(&merged, &points);
    }

    #[test]
    fn vmerge_moves_shared_edge() {
        let points = pts(&[(0, 0), (1, 5), (0, 10)]);
        let (t1, t2) = two_segments(&points);
        let split = Split {
            points: &points,
            first: &[0, 1],
            second: &[1, 2],
            shared: 1,
        };
        let plain = dmerge_tree(&split, &t1, &t2);
        let merged = vmerge_tree(&split, &t1, &t2);
        assert_eq!(plain.length, 12);
        assert!(merged.length <= plain.length);
        assert_valid(&merged, &points);
    }

    #[test]
    fn hmerge_finds_shared_steiner_point() {
        let points = pts(&[(0, 2), (5, 0), (0, -2)]);
        let (t1, t2) = two_segments(&points);
        let split = Split {
            points: &points,
            first: &[0, 1],
            second: &[1, 2],
            shared: 1,
        };
        assert_eq!(dmerge_tree(&split, &t1, &t2).length, 14);
        let merged = hmerge_tree(&split, &t1, &t2);
        assert_eq!(merged.length, 9);
        assert_eq!(merged.branches[3].point(), Point::new(0, 0));
        assert_valid(&merged, &points);
    }
}

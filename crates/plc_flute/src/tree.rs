//! Steiner tree representation.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Write};

/// A pin or Steiner point on the integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    pub fn dist(self, other: Point) -> i64 {
        (i64::from(self.x) - i64::from(other.x)).abs() + (i64::from(self.y) - i64::from(other.y)).abs()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One node of a [`Tree`] and the edge to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    /// Node x coordinate.
    pub x: i32,
    /// Node y coordinate.
    pub y: i32,
    /// Index of the parent node; the root is its own parent.
    pub n: usize,
}

impl Branch {
    /// The node position.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A rectilinear Steiner tree over `deg` terminals.
///
/// For `deg >= 2` there are `2 * deg - 2` branches. The first `deg` are the
/// terminals in input order; the rest are Steiner points, some of which may
/// coincide with other nodes and contribute no length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    /// Number of terminals.
    pub deg: usize,
    /// Total rectilinear length.
    pub length: i64,
    /// Nodes with parent links.
    pub branches: Vec<Branch>,
}

impl Tree {
    /// The tree of no terminals.
    pub fn empty() -> Self {
        Self {
            deg: 0,
            length: 0,
            branches: Vec::new(),
        }
    }

    /// Recomputes the length from the branches.
    pub fn wirelength(&self) -> i64 {
        self.branches
            .iter()
            .map(|b| b.point().dist(self.branches[b.n].point()))
            .sum()
    }

    /// Writes one line per branch: terminals as ` i:`, Steiner points as `si:`.
    pub fn print(&self, out: &mut dyn Write) -> io::Result<()> {
        for (i, b) in self.branches.iter().enumerate() {
            let tag = if i < self.deg { " " } else { "s" };
            writeln!(out, "{tag}{i:<2}:  x={:>4}  y={:>4}  e={}", b.x, b.y, b.n)?;
        }
        writeln!(out)
    }

    /// The undirected edges `(child, parent)`, excluding the root's self link.
    pub(crate) fn edges(&self) -> Vec<(usize, usize)> {
        self.branches
            .iter()
            .enumerate()
            .filter(|&(i, b)| i != b.n)
            .map(|(i, b)| (i, b.n))
            .collect()
    }

    /// Builds a tree from node positions and undirected edges, rooting it at
    /// node 0 and deriving parent links by breadth-first search.
    pub(crate) fn from_edges(deg: usize, nodes: &[Point], edges: &[(usize, usize)]) -> Self {
        let adjacency = adjacency(nodes.len(), edges);
        let mut parent: Vec<Option<usize>> = vec![None; nodes.len()];
        let mut queue = VecDeque::new();
        if !nodes.is_empty() {
            parent[0] = Some(0);
            queue.push_back(0);
        }
        while let Some(u) = queue.pop_front() {
            for &v in &adjacency[u] {
                if parent[v].is_none() {
                    parent[v] = Some(u);
                    queue.push_back(v);
                }
            }
        }
        let branches: Vec<Branch> = nodes
            .iter()
            .zip(&parent)
            .map(|(p, parent)| Branch {
                x: p.x,
                y: p.y,
                n: parent.unwrap_or(0),
            })
            .collect();
        let mut tree = Self {
            deg,
            length: 0,
            branches,
        };
        tree.length = tree.wirelength();
        tree
    }
}

/// Sorted adjacency lists for `n` nodes.
pub(crate) fn adjacency(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut adj = vec![Vec::new(); n];
    for &(a, b) in edges {
        adj[a].push(b);
        adj[b].push(a);
    }
    for list in &mut adj {
        list.sort_unstable();
    }
    adj
}

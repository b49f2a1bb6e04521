//! The FLUTE engine: lookup-table management and net splitting.

use crate::error::FluteError;
use crate::low_degree::small_tree;
use crate::lut::{LutTable, FLUTE_D};
use crate::merge::{dmerge_tree, hmerge_tree, vmerge_tree, CutLine, Split};
use crate::refine::refine;
use crate::source::LutSource;
use crate::tree::{Point, Tree};
use std::collections::BTreeSet;

/// Tuning knobs of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluteOptions {
    /// Number of split candidates tried at the top level of a large net,
    /// halved at each level below. Clamped to `1..=9`.
    pub accuracy: usize,
    /// Coalesce pins with identical coordinates before solving.
    pub remove_duplicate_pin: bool,
    /// Run local refinement on split nets when `accuracy >= 5`.
    pub local_refinement: bool,
}

impl Default for FluteOptions {
    fn default() -> Self {
        Self {
            accuracy: 3,
            remove_duplicate_pin: false,
            local_refinement: true,
        }
    }
}

/// Rectilinear Steiner tree builder.
///
/// Without a [`LutSource`] small nets are solved exactly on the Hanan grid.
/// With one, tables are loaded on first use, up to the largest degree seen.
pub struct Flute {
    options: FluteOptions,
    source: Option<Box<dyn LutSource>>,
    lut: Option<LutTable>,
}

impl Flute {
    /// Creates an engine that needs no lookup tables.
    pub fn new(options: FluteOptions) -> Self {
        Self {
            options,
            source: None,
            lut: None,
        }
    }

    /// Creates an engine reading tables from `source`.
    pub fn with_source(options: FluteOptions, source: Box<dyn LutSource>) -> Self {
        Self {
            options,
            source: Some(source),
            lut: None,
        }
    }

    /// The engine options.
    pub fn options(&self) -> &FluteOptions {
        &self.options
    }

    /// Highest degree with a loaded table, or 3 when none is loaded.
    pub fn lut_degree(&self) -> usize {
        self.lut.as_ref().map_or(3, LutTable::max_degree)
    }

    /// Makes sure tables covering nets of degree `d` are loaded.
    pub fn ensure_lut(&mut self, d: usize) -> Result<(), FluteError> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        let want = d.min(FLUTE_D);
        if want < 4 || self.lut_degree() >= want {
            return Ok(());
        }
        self.lut = Some(source.load(want)?);
        Ok(())
    }

    /// Builds a Steiner tree over `pins`.
    pub fn tree(&mut self, pins: &[Point]) -> Result<Tree, FluteError> {
        let points = if self.options.remove_duplicate_pin {
            let mut seen = BTreeSet::new();
            pins.iter().copied().filter(|p| seen.insert(*p)).collect()
        } else {
            pins.to_vec()
        };
        self.ensure_lut(points.len())?;
        if points.len() <= FLUTE_D {
            return Ok(small_tree(&points, self.lut.as_ref()));
        }
        let accuracy = self.options.accuracy.clamp(1, FLUTE_D);
        let tree = split_tree(&points, accuracy, self.lut.as_ref());
        if self.options.local_refinement && accuracy >= 5 {
            Ok(refine(tree))
        } else {
            Ok(tree)
        }
    }

    /// Length of the tree [`Flute::tree`] builds over `pins`.
    pub fn wirelength(&mut self, pins: &[Point]) -> Result<i64, FluteError> {
        Ok(self.tree(pins)?.length)
    }
}

/// Half-perimeter of the bounding box of the indexed pins.
fn hpwl(points: &[Point], indices: &[usize]) -> i64 {
    let (mut x0, mut x1, mut y0, mut y1) = (i32::MAX, i32::MIN, i32::MAX, i32::MIN);
    for &i in indices {
        let p = points[i];
        x0 = x0.min(p.x);
        x1 = x1.max(p.x);
        y0 = y0.min(p.y);
        y1 = y1.max(p.y);
    }
    i64::from(x1) - i64::from(x0) + i64::from(y1) - i64::from(y0)
}

/// A way to break a net in two at the pin of rank `rank` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Cut {
    score: i64,
    imbalance: usize,
    line: CutLine,
    rank: usize,
}

/// Candidate cuts, best first.
fn rank_cuts(points: &[Point], by_y: &[usize], by_x: &[usize]) -> Vec<Cut> {
    let d = points.len();
    let lo = (d / 3).max(1);
    let hi = (d - 1 - d / 3).min(d - 2);
    let mut cuts = Vec::new();
    for (line, order) in [(CutLine::Horizontal, by_y), (CutLine::Vertical, by_x)] {
        for rank in lo..=hi {
            cuts.push(Cut {
                score: hpwl(points, &order[..=rank]) + hpwl(points, &order[rank..]),
                imbalance: (rank + 1).abs_diff(d - rank),
                line,
                rank,
            });
        }
    }
    cuts.sort_unstable();
    cuts
}

/// Solves a net of any degree by splitting it until the pieces are small.
fn split_tree(points: &[Point], accuracy: usize, lut: Option<&LutTable>) -> Tree {
    let d = points.len();
    if d <= FLUTE_D {
        return small_tree(points, lut);
    }
    let mut by_x: Vec<usize> = (0..d).collect();
    by_x.sort_by_key(|&i| (points[i].x, points[i].y, i));
    let mut by_y: Vec<usize> = (0..d).collect();
    by_y.sort_by_key(|&i| (points[i].y, points[i].x, i));

    let child_accuracy = (accuracy / 2).max(1);
    let mut best: Option<Tree> = None;
    for cut in rank_cuts(points, &by_y, &by_x).into_iter().take(accuracy) {
        let order = match cut.line {
            CutLine::Horizontal => &by_y,
            CutLine::Vertical => &by_x,
        };
        let mut first = order[..=cut.rank].to_vec();
        let mut second = order[cut.rank..].to_vec();
        first.sort_unstable();
        second.sort_unstable();
        let sub = |side: &[usize]| -> Vec<Point> { side.iter().map(|&i| points[i]).collect() };
        let t1 = split_tree(&sub(&first), child_accuracy, lut);
        let t2 = split_tree(&sub(&second), child_accuracy, lut);
        let split = Split {
            points,
            first: &first,
            second: &second,
            shared: order[cut.rank],
        };
        let tree = match (accuracy, cut.line) {
            (1, _) => dmerge_tree(&split, &t1, &t2),
            (_, CutLine::Horizontal) => hmerge_tree(&split, &t1, &t2),
            (_, CutLine::Vertical) => vmerge_tree(&split, &t1, &t2),
        };
        if best.as_ref().map_or(true, |b| tree.length < b.length) {
            best = Some(tree);
        }
    }
    best.unwrap_or_else(|| small_tree(points, lut))
}

//! Lookup tables of optimal Steiner topologies.
//!
//! Two files describe the tables. The wirelength-vector file (`powv`) lists,
//! per degree and per position group, candidate solutions as a parent link
//! plus the gap segments their length adds and removes relative to the
//! parent. The topology file (`post`) gives each solution's Steiner points
//! as packed `(row, col)` grid positions and its parent links as nibbles.

use crate::error::FluteError;

/// Largest degree solved from the tables.
pub const FLUTE_D: usize = 9;

/// Number of position groups per degree.
pub const NUM_GROUPS: [usize; FLUTE_D + 1] = [0, 0, 0, 0, 6, 30, 180, 1260, 10080, 90720];

/// Segment slots per solution: additions fill from the front, removals from the back.
pub const SEGMENTS: usize = 11;

/// One candidate topology of a position group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Earlier solution whose length this one is expressed against.
    pub parent: u8,
    /// Added gap indices from index 0 and removed ones from index 10, each
    /// list ending at a zero.
    pub seg: [u8; SEGMENTS],
    /// Steiner point positions, `row * 16 + col`, one per Steiner node.
    pub rowcol: Vec<u8>,
    /// Parent link of every node, terminals first.
    pub neighbor: Vec<u8>,
}

impl Solution {
    /// Gap indices added to the parent length.
    pub fn added(&self) -> impl Iterator<Item = usize> + '_ {
        self.seg.iter().take_while(|&&s| s > 0).map(|&s| usize::from(s))
    }

    /// Gap indices removed from the parent length.
    pub fn removed(&self) -> impl Iterator<Item = usize> + '_ {
        self.seg.iter().rev().take_while(|&&s| s > 0).map(|&s| usize::from(s))
    }
}

/// All groups of one degree.
///
/// Groups that repeat an earlier group share its solution list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeTable {
    degree: usize,
    groups: Vec<usize>,
    lists: Vec<Vec<Solution>>,
}

impl DegreeTable {
    /// The degree this table covers.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of groups.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// The solutions of group `k`.
    pub fn group(&self, k: usize) -> &[Solution] {
        self.groups
            .get(k)
            .and_then(|&list| self.lists.get(list))
            .map_or(&[], Vec::as_slice)
    }
}

/// Tables for degrees `4..=max_degree`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LutTable {
    tables: Vec<DegreeTable>,
}

impl LutTable {
    /// Highest degree covered, or 3 when empty.
    pub fn max_degree(&self) -> usize {
        3 + self.tables.len()
    }

    /// The table of one degree.
    pub fn degree(&self, d: usize) -> Option<&DegreeTable> {
        d.checked_sub(4).and_then(|i| self.tables.get(i))
    }

    /// Compares with `other` group by group, reporting the first difference.
    pub fn check_against(&self, other: &LutTable) -> Result<(), FluteError> {
        for d in 4..=self.max_degree().max(other.max_degree()) {
            let (Some(a), Some(b)) = (self.degree(d), other.degree(d)) else {
                return Err(FluteError::Mismatch { degree: d, group: 0 });
            };
            for k in 0..a.num_groups().max(b.num_groups()) {
                if a.group(k) != b.group(k) {
                    return Err(FluteError::Mismatch { degree: d, group: k });
                }
            }
        }
        Ok(())
    }
}

/// Maps a table character to its value: digits, then `A` for 10 onward.
fn charnum(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'A'..=u8::MAX => c - b'A' + 10,
        _ => 0,
    }
}

/// A byte cursor with the scanning primitives the table layout needs.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    degree: usize,
    name: &'static str,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], name: &'static str) -> Self {
        Self {
            data,
            pos: 0,
            degree: 4,
            name,
        }
    }

    fn error(&self, detail: impl Into<String>) -> FluteError {
        FluteError::Format {
            degree: self.degree,
            detail: format!("{} data at byte {}: {}", self.name, self.pos, detail.into()),
        }
    }

    fn byte(&mut self) -> Result<u8, FluteError> {
        let b = *self
            .data
            .get(self.pos)
            .ok_or_else(|| self.error("unexpected end of data"))?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FluteError> {
        if self.pos + n > self.data.len() {
            return Err(self.error("unexpected end of data"));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn skip_whitespace(&mut self) {
        while self.data.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }

    fn number(&mut self) -> Result<usize, FluteError> {
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| self.error("expected a number"))
    }

    /// Reads the `d=<n>` section header and checks it names `d`.
    fn header(&mut self, d: usize) -> Result<(), FluteError> {
        self.degree = d;
        self.skip_whitespace();
        if self.take(2)? != b"d=" {
            return Err(self.error("expected `d=` header"));
        }
        let found = self.number()?;
        if found != d {
            return Err(self.error(format!("header names degree {found}")));
        }
        self.skip_whitespace();
        Ok(())
    }

    /// Reads one line, without its terminator.
    fn line(&mut self) -> Result<&'a [u8], FluteError> {
        if self.pos >= self.data.len() {
            return Err(self.error("unexpected end of data"));
        }
        let rest = &self.data[self.pos..];
        let len = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
        self.pos += (len + 1).min(rest.len());
        Ok(&rest[..len])
    }
}

/// Decodes one `powv` solution line.
fn parse_solution_line(line: &[u8], d: usize, cursor: &Cursor<'_>) -> Result<Solution, FluteError> {
    let mut values = line.iter().map(|&c| charnum(c));
    let parent = values.next().unwrap_or(0);
    let mut seg = [0u8; SEGMENTS];
    let mut i = 0;
    for v in values.by_ref() {
        if v == 0 {
            break;
        }
        if i >= SEGMENTS {
            return Err(cursor.error("too many added segments"));
        }
        seg[i] = v;
        i += 1;
    }
    let mut j = SEGMENTS - 1;
    for v in values {
        if v == 0 {
            break;
        }
        if j < i || seg[j] != 0 {
            return Err(cursor.error("segment lists overlap"));
        }
        seg[j] = v;
        j = j.saturating_sub(1);
    }
    if seg.iter().any(|&s| usize::from(s) > 2 * d - 4) {
        return Err(cursor.error("segment index out of range"));
    }
    Ok(Solution {
        parent,
        seg,
        rowcol: Vec::new(),
        neighbor: Vec::new(),
    })
}

/// Reads the `post` record of one solution into it.
fn read_topology(post: &mut Cursor<'_>, d: usize, soln: &mut Solution) -> Result<(), FluteError> {
    let nn = 2 * d - 2;
    let rowcol = post.take(d - 2)?;
    soln.rowcol = rowcol.iter().map(|&c| charnum(c)).collect();
    if soln
        .rowcol
        .iter()
        .any(|&rc| usize::from(rc / 16) >= d || usize::from(rc % 16) >= d)
    {
        return Err(post.error("Steiner position outside the grid"));
    }
    let packed = post.take(nn / 2 + 1)?;
    soln.neighbor = packed[..nn / 2]
        .iter()
        .flat_map(|&c| [c / 16, c % 16])
        .collect();
    if soln.neighbor.iter().any(|&n| usize::from(n) >= nn) {
        return Err(post.error("parent link out of range"));
    }
    Ok(())
}

/// Parses `powv` and `post` data for degrees `4..=max_degree`.
pub fn parse_lut(powv: &[u8], post: &[u8], max_degree: usize) -> Result<LutTable, FluteError> {
    let max_degree = max_degree.min(FLUTE_D);
    let mut wv = Cursor::new(powv, "powv");
    let mut rt = Cursor::new(post, "post");
    let mut tables = Vec::new();

    for d in 4..=max_degree {
        wv.header(d)?;
        rt.header(d)?;
        let mut groups = Vec::with_capacity(NUM_GROUPS[d]);
        let mut lists: Vec<Vec<Solution>> = Vec::new();
        for k in 0..NUM_GROUPS[d] {
            let ns = usize::from(charnum(wv.byte()?));
            if ns == 0 {
                let alias = wv.number()?;
                wv.skip_whitespace();
                let Some(&list) = groups.get(alias) else {
                    return Err(wv.error(format!("group {k} repeats undefined group {alias}")));
                };
                groups.push(list);
                continue;
            }
            if wv.byte()? != b'\n' {
                return Err(wv.error("expected end of line after solution count"));
            }
            let mut list = Vec::with_capacity(ns);
            for i in 0..ns {
                let line = wv.line()?;
                let mut soln = parse_solution_line(line, d, &wv)?;
                if i > 0 && usize::from(soln.parent) > i {
                    return Err(wv.error("solution refers to a later parent"));
                }
                read_topology(&mut rt, d, &mut soln)?;
                list.push(soln);
            }
            groups.push(lists.len());
            lists.push(list);
        }
        tables.push(DegreeTable {
            degree: d,
            groups,
            lists,
        });
    }
    Ok(LutTable { tables })
}

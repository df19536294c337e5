//! Search results.

use std::fmt;

use mahjong_distance_core::{Hand, HandDistanceError, Hands, HandsDiff, Result, UnreachableReason};

/// A shortest path from one of the sources to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundPath {
    /// Index of the source the path starts from.
    pub source: usize,
    /// Substitutions on the path.
    pub distance: u32,
    /// Hands from source to target, both included.
    pub path: Hands,
    /// One diff per substitution.
    pub trace: HandsDiff,
}

impl FoundPath {
    /// Builds a path and its trace from the hands visited.
    pub fn from_hands(source: usize, path: Vec<Hand>) -> Result<Self> {
        let trace = HandsDiff::from_path(&path)?;
        Ok(Self {
            source,
            distance: trace.len() as u32,
            path: Hands::from(path),
            trace,
        })
    }

    pub fn start(&self) -> Option<&Hand> {
        self.path.iter().next()
    }

    /// The target reached.
    pub fn end(&self) -> Option<&Hand> {
        self.path.iter().last()
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(FoundPath),
    Unreachable(UnreachableReason),
}

impl SearchOutcome {
    pub fn distance(&self) -> Option<u32> {
        self.found().map(|p| p.distance)
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn found(&self) -> Option<&FoundPath> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Unreachable(_) => None,
        }
    }

    pub fn trace(&self) -> Option<&HandsDiff> {
        self.found().map(|p| &p.trace)
    }

    pub fn unreachable_reason(&self) -> Option<UnreachableReason> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Unreachable(reason) => Some(*reason),
        }
    }

    /// The found path, or `DistanceUnreachable`.
    pub fn into_result(self) -> Result<FoundPath> {
        match self {
            SearchOutcome::Found(path) => Ok(path),
            SearchOutcome::Unreachable(reason) => {
                Err(HandDistanceError::DistanceUnreachable(reason))
            }
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found(path) => write!(f, "distance {}", path.distance),
            SearchOutcome::Unreachable(reason) => write!(f, "unreachable ({reason})"),
        }
    }
}

/// Pairwise outcomes, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<SearchOutcome>,
}

impl DistanceMatrix {
    pub(crate) fn new(rows: usize, cols: usize, entries: Vec<SearchOutcome>) -> Self {
        debug_assert_eq!(entries.len(), rows * cols);
        Self {
            rows,
            cols,
            entries,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&SearchOutcome> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.entries.get(row * self.cols + col)
    }

    pub fn distance(&self, row: usize, col: usize) -> Option<u32> {
        self.get(row, col).and_then(SearchOutcome::distance)
    }

    /// `(row, col, outcome)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &SearchOutcome)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(move |(i, outcome)| (i / self.cols, i % self.cols, outcome))
    }

    pub fn reachable_count(&self) -> usize {
        self.entries.iter().filter(|o| o.is_found()).count()
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.distance(row, col) {
                    Some(d) => write!(f, "{d:>2}")?,
                    None => write!(f, " -")?,
                }
            }
        }
        Ok(())
    }
}

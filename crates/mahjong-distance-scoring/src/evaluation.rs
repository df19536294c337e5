//! Oracle results and the qualification rule applied to them.

use std::fmt;

use crate::shape::WinShape;

/// A named scoring pattern and its han value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Yaku {
    pub name: String,
    pub han: u32,
}

impl Yaku {
    pub fn new(name: impl Into<String>, han: u32) -> Self {
        Self {
            name: name.into(),
            han,
        }
    }
}

/// One line of the fu calculation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuDetail {
    pub reason: String,
    pub fu: u32,
}

impl FuDetail {
    pub fn new(reason: impl Into<String>, fu: u32) -> Self {
        Self {
            reason: reason.into(),
            fu,
        }
    }
}

/// Structured score of a winning hand. Missing values are zero or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    pub han: u32,
    pub fu: u32,
    pub points: u32,
    pub yaku: Vec<Yaku>,
    pub fu_details: Vec<FuDetail>,
    pub shape: Option<WinShape>,
}

impl ScoreBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a yaku and its han.
    pub fn with_yaku(mut self, yaku: Yaku) -> Self {
        self.han += yaku.han;
        self.yaku.push(yaku);
        self
    }

    /// Adds a fu line and its value.
    pub fn with_fu(mut self, detail: FuDetail) -> Self {
        self.fu += detail.fu;
        self.fu_details.push(detail);
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn with_shape(mut self, shape: WinShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn has_yaku(&self) -> bool {
        !self.yaku.is_empty()
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} han {} fu", self.han, self.fu)?;
        if self.points > 0 {
            write!(f, " ({} points)", self.points)?;
        }
        if !self.yaku.is_empty() {
            let names: Vec<&str> = self.yaku.iter().map(|y| y.name.as_str()).collect();
            write!(f, " [{}]", names.join(", "))?;
        }
        Ok(())
    }
}

/// What an oracle returns for one hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Evaluation {
    Win(ScoreBreakdown),
    NotAWin,
}

impl Evaluation {
    pub fn is_win(&self) -> bool {
        matches!(self, Evaluation::Win(_))
    }

    pub fn breakdown(&self) -> Option<&ScoreBreakdown> {
        match self {
            Evaluation::Win(breakdown) => Some(breakdown),
            Evaluation::NotAWin => None,
        }
    }

    pub fn han(&self) -> u32 {
        self.breakdown().map_or(0, |b| b.han)
    }

    /// True for a win meeting `rule`.
    pub fn qualifies(&self, rule: &Qualification) -> bool {
        match self {
            Evaluation::Win(breakdown) => {
                breakdown.han >= rule.min_han && (!rule.require_yaku || breakdown.has_yaku())
            }
            Evaluation::NotAWin => false,
        }
    }
}

/// Minimum value a win must reach to count as a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Qualification {
    pub min_han: u32,
    pub require_yaku: bool,
}

impl Default for Qualification {
    fn default() -> Self {
        Self {
            min_han: 1,
            require_yaku: true,
        }
    }
}

impl Qualification {
    /// Accepts any win, yaku or not.
    pub const fn any_win() -> Self {
        Self {
            min_han: 0,
            require_yaku: false,
        }
    }

    pub const fn with_min_han(mut self, min_han: u32) -> Self {
        self.min_han = min_han;
        self
    }
}

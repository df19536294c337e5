//! Situation a hand is scored in.

use mahjong_distance_core::{Hand, Tile, Wind};

/// How the winning tile arrived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WinCondition {
    /// Drawn from the wall (tsumo).
    SelfDraw,
    /// Claimed from another player's discard (ron).
    #[default]
    Discard,
}

/// Seat, round and win condition passed to a scoring oracle.
///
/// `winning_tile` defaults to the last tile of the hand in display order,
/// which after `Hand::substitute` is the tile just drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WinContext {
    pub seat_wind: Wind,
    pub round_wind: Wind,
    pub win_condition: WinCondition,
    pub winning_tile: Option<Tile>,
    pub is_closed: bool,
}

impl Default for WinContext {
    fn default() -> Self {
        Self {
            seat_wind: Wind::East,
            round_wind: Wind::East,
            win_condition: WinCondition::Discard,
            winning_tile: None,
            is_closed: true,
        }
    }
}

impl WinContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seat_wind(mut self, wind: Wind) -> Self {
        self.seat_wind = wind;
        self
    }

    pub fn with_round_wind(mut self, wind: Wind) -> Self {
        self.round_wind = wind;
        self
    }

    pub fn with_win_condition(mut self, condition: WinCondition) -> Self {
        self.win_condition = condition;
        self
    }

    /// Shorthand for `SelfDraw` / `Discard`.
    pub fn with_self_drawn(self, self_drawn: bool) -> Self {
        self.with_win_condition(if self_drawn {
            WinCondition::SelfDraw
        } else {
            WinCondition::Discard
        })
    }

    pub fn with_winning_tile(mut self, tile: Tile) -> Self {
        self.winning_tile = Some(tile);
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.is_closed = closed;
        self
    }

    pub fn is_self_drawn(&self) -> bool {
        self.win_condition == WinCondition::SelfDraw
    }

    /// The explicit winning tile, else the hand's last tile.
    pub fn winning_tile_for(&self, hand: &Hand) -> Option<Tile> {
        self.winning_tile.or_else(|| hand.last_tile())
    }
}

//! The two competing sides.

use std::fmt;
use std::ops::Not;

/// One of the two players of a zero-sum game.
///
/// [`Player::One`] has index 0 and is the maximising side when it is to move
/// at the root of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    /// Total number of players.
    pub const COUNT: usize = 2;

    /// All players in index order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Return the index (0 for One, 1 for Two).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Build a player from its index. Returns `None` for anything but 0 or 1.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Player> {
        match index {
            0 => Some(Player::One),
            1 => Some(Player::Two),
            _ => None,
        }
    }

    /// Return the opponent.
    #[inline]
    pub const fn flip(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl Not for Player {
    type Output = Player;

    #[inline]
    fn not(self) -> Player {
        self.flip()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Owner of a planet or transporter.
///
/// Parses case-insensitively from its variant name, so `"player1"` and
/// `"Player1"` both work on the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Player1,
    Player2,
    Neutral,
}

impl Player {
    /// Returns the other side of the match. Neutral has no opponent and maps to itself.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
            Player::Neutral => Player::Neutral,
        }
    }
}

use serde::Serialize;

use crate::types::Player;

/// Captures made by each side since the game started or was loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreTracker {
    white: u32,
    black: u32,
}

impl ScoreTracker {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    pub fn increment(&mut self, player: Player) {
        match player {
            Player::White => self.white += 1,
            Player::Black => self.black += 1,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_only_touches_the_given_side() {
        let mut scores = ScoreTracker::default();

        scores.increment(Player::Black);
        scores.increment(Player::Black);

        assert_eq!(scores.get(Player::Black), 2);
        assert_eq!(scores.get(Player::White), 0);

        scores.reset();
        assert_eq!(scores, ScoreTracker::default());
    }
}

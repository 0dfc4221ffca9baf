use serde::Deserialize;

use crate::types::Player;

const DEFAULT_THINK_MS_PER_POINT: u64 = 50;

/// Game setup passed in by the host. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub white_ai: bool,
    pub black_ai: bool,
    /// Hold the AI reply until the host calls `commit_ai_move`.
    pub defer_ai_commit: bool,
    /// Think-time hint per point of move score, in milliseconds.
    pub ai_think_ms_per_point: u64,
}

impl GameConfig {
    pub fn is_ai(&self, player: Player) -> bool {
        match player {
            Player::White => self.white_ai,
            Player::Black => self.black_ai,
        }
    }

    pub fn human_vs_human() -> Self {
        Self {
            white_ai: false,
            black_ai: false,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            white_ai: false,
            black_ai: true,
            defer_ai_commit: false,
            ai_think_ms_per_point: DEFAULT_THINK_MS_PER_POINT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_falls_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"white_ai": true}"#).unwrap();

        assert!(config.is_ai(Player::White));
        assert!(config.is_ai(Player::Black));
        assert!(!config.defer_ai_commit);
        assert_eq!(config.ai_think_ms_per_point, DEFAULT_THINK_MS_PER_POINT);
    }
}

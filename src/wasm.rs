use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::CheckersError;
use crate::game::GameController;
use crate::types::MoveOutcome;

/// Reply to a release event, as seen by the host.
///
/// `RolledBack` means a transaction was open and is now closed; `reason` is
/// set when the release cell was off-board or not a legal destination.
/// `Invalid` means nothing was open to release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
enum ReleaseReply {
    Committed { captured: u8, promoted: bool },
    RolledBack { reason: Option<String> },
    Invalid { reason: String },
}

impl From<Result<MoveOutcome, CheckersError>> for ReleaseReply {
    fn from(result: Result<MoveOutcome, CheckersError>) -> Self {
        match result {
            Ok(MoveOutcome::Committed { captured, promoted }) => {
                ReleaseReply::Committed { captured, promoted }
            }
            Ok(MoveOutcome::RolledBack) => ReleaseReply::RolledBack { reason: None },
            Err(
                err @ (CheckersError::OutOfBounds { .. } | CheckersError::IllegalDestination { .. }),
            ) => ReleaseReply::RolledBack {
                reason: Some(err.to_string()),
            },
            Err(err) => ReleaseReply::Invalid {
                reason: err.to_string(),
            },
        }
    }
}

/// Routes `log` output to the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct CheckersGame {
    inner: GameController,
}

#[wasm_bindgen]
impl CheckersGame {
    /// `config` may be `undefined` or a partial `GameConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CheckersGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: GameController::new_with_default_selector(config),
        })
    }

    pub fn new_game(&mut self) {
        self.inner.new_game();
    }

    /// Legal destinations of the piece at `(x, y)`.
    pub fn select(&mut self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let destinations = self.inner.select(x, y).map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&destinations)?)
    }

    pub fn attempt_move(&mut self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let reply = ReleaseReply::from(self.inner.attempt_move(x, y));
        Ok(serde_wasm_bindgen::to_value(&reply)?)
    }

    pub fn cancel(&mut self) -> bool {
        self.inner.cancel()
    }

    pub fn current_state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.current_state())?)
    }

    /// Milliseconds the host may wait before `commit_ai_move`, if an AI move
    /// is pending.
    pub fn ai_think_time_ms(&self) -> Option<f64> {
        self.inner
            .pending_ai_move()
            .map(|pending| pending.remaining().as_millis() as f64)
    }

    pub fn commit_ai_move(&mut self) -> Result<JsValue, JsValue> {
        let reply = ReleaseReply::from(self.inner.commit_ai_move());
        Ok(serde_wasm_bindgen::to_value(&reply)?)
    }

    pub fn next_round(&mut self) -> Result<JsValue, JsValue> {
        let reply = self
            .inner
            .next_round()
            .map_err(to_js_error)?
            .map(|outcome| ReleaseReply::from(Ok::<_, CheckersError>(outcome)));
        Ok(serde_wasm_bindgen::to_value(&reply)?)
    }

    pub fn save(&self) -> Result<String, JsValue> {
        self.inner.save_json().map_err(to_js_error)
    }

    pub fn load(&mut self, json: &str) -> Result<(), JsValue> {
        self.inner.load_json(json).map_err(to_js_error)
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

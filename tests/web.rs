//! Browser-side checks of the WASM surface.
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]

use checkers::wasm::CheckersGame;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn field(value: &JsValue, name: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(name)).expect("field must exist")
}

fn human_game() -> CheckersGame {
    let config = js_sys::JSON::parse(r#"{"white_ai": false, "black_ai": false}"#).unwrap();
    CheckersGame::new(config).expect("config must parse")
}

#[wasm_bindgen_test]
fn wasm_ready_returns_true() {
    assert!(checkers::wasm_ready());
}

#[wasm_bindgen_test]
fn default_game_starts_with_white() {
    let game = CheckersGame::new(JsValue::UNDEFINED).unwrap();
    let state = game.current_state().unwrap();

    assert_eq!(field(&state, "current_player").as_f64(), Some(1.0));
    assert_eq!(field(&state, "is_game_over").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn select_then_release_commits_move() {
    let mut game = human_game();

    let destinations = game.select(1, 2).unwrap();
    assert_eq!(js_sys::Array::from(&destinations).length(), 2);

    let reply = game.attempt_move(2, 3).unwrap();
    assert_eq!(field(&reply, "kind").as_string().as_deref(), Some("Committed"));

    let state = game.current_state().unwrap();
    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn release_without_selection_is_invalid() {
    let mut game = human_game();

    let reply = game.attempt_move(2, 3).unwrap();

    assert_eq!(field(&reply, "kind").as_string().as_deref(), Some("Invalid"));
}

#[wasm_bindgen_test]
fn illegal_release_is_a_rollback() {
    let mut game = human_game();
    game.select(1, 2).unwrap();

    let reply = game.attempt_move(1, 4).unwrap();

    assert_eq!(field(&reply, "kind").as_string().as_deref(), Some("RolledBack"));
    assert!(field(&reply, "reason").as_string().is_some());
}

#[wasm_bindgen_test]
fn save_and_load_round_trip() {
    let mut game = human_game();
    game.select(1, 2).unwrap();
    game.attempt_move(0, 3).unwrap();
    let saved = game.save().unwrap();

    game.new_game();
    game.load(&saved).unwrap();

    assert_eq!(game.save().unwrap(), saved);
    assert!(game.load("{}").is_err());
}

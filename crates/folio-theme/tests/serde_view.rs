#![cfg(feature = "serde")]

use folio_theme::{ColorMode, ThemeConfig, ThemeState, ThemeSwitcher, ThemeVariant, palette};
use serde_json::json;

#[test]
fn palette_serializes_as_hex_strings() {
    let value = serde_json::to_value(palette(ColorMode::Dark, ThemeVariant::Tech)).unwrap();
    assert_eq!(value["primary"], json!("#2563eb"));
    assert_eq!(value["background"], json!("#0f172a"));
}

#[test]
fn switcher_view_model_is_json_ready() {
    let view = ThemeSwitcher::for_state(ThemeState::new(ColorMode::Light, ThemeVariant::Modern));
    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["is_dark"], json!(false));
    assert_eq!(value["swatches"][0]["variant"], json!("modern"));
    assert_eq!(value["swatches"][0]["active"], json!(true));
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let config: ThemeConfig = serde_json::from_str(r#"{ "transition_ms": 150 }"#).unwrap();
    assert_eq!(config.transition_ms, 150);
    assert_eq!(config.mode_key, "folio-theme-mode");
}

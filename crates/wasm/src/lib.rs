use consense_core::{ConversionWarning, Direction};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Converter Config
// ============================================================================

/// Configuration accepted by [`convert`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WasmConvertConfig {
    /// `o2c` / `c2o` or one of their long names. Defaults to `o2c`.
    #[serde(default)]
    pub direction: Option<String>,
    /// Include unclosed-region warnings in the result.
    #[serde(default, alias = "includeDiagnostics", alias = "include_diagnostics")]
    pub diagnostics: Option<bool>,
}

fn parse_config(config: JsValue) -> Result<WasmConvertConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(WasmConvertConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

fn resolve_direction(cfg: &WasmConvertConfig) -> Result<Direction, JsError> {
    match cfg.direction.as_deref() {
        None => Ok(Direction::default()),
        Some(name) => name
            .parse::<Direction>()
            .map_err(|e| JsError::new(&e.to_string())),
    }
}

// ============================================================================
// Convert API Types
// ============================================================================

/// A warning raised while converting.
#[derive(Debug, Clone, Serialize)]
pub struct WarningEntry {
    /// 1-based line the unclosed region started on.
    pub line: usize,
    /// Human readable description.
    pub message: String,
}

impl From<&ConversionWarning> for WarningEntry {
    fn from(warning: &ConversionWarning) -> Self {
        Self {
            line: warning.location().line,
            message: warning.to_string(),
        }
    }
}

/// Result of [`convert`].
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    /// Converted document.
    pub output: String,
    /// Direction that was applied, as `o2c` or `c2o`.
    pub direction: Direction,
    /// Warnings; empty unless diagnostics were requested.
    pub warnings: Vec<WarningEntry>,
}

// ============================================================================
// Convert API
// ============================================================================

/// Converts Obsidian Markdown to Consense.
#[wasm_bindgen(js_name = toConsense)]
pub fn to_consense(input: &str) -> String {
    consense_core::to_consense(input)
}

/// Converts Consense to Obsidian Markdown.
#[wasm_bindgen(js_name = toMarkdown)]
pub fn to_markdown(input: &str) -> String {
    consense_core::to_markdown(input)
}

/// Converts `input` in the direction named by `config`.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { convert } from './consense_wasm';
///
/// const result = convert("# Title", { direction: "o2c", diagnostics: true });
/// // result = { output: "[**** Title]", direction: "o2c", warnings: [] }
/// ```
///
/// An unknown direction name is rejected with an error.
#[wasm_bindgen]
pub fn convert(input: &str, config: JsValue) -> Result<JsValue, JsError> {
    let cfg = parse_config(config)?;
    let direction = resolve_direction(&cfg)?;

    let conversion = consense_core::convert_with_diagnostics(input, direction);
    let warnings = if cfg.diagnostics.unwrap_or(false) {
        conversion
            .diagnostics
            .warnings
            .iter()
            .map(WarningEntry::from)
            .collect()
    } else {
        Vec::new()
    };

    let result = ConvertResult {
        output: conversion.output,
        direction,
        warnings,
    };

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

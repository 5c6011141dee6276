use consense_wasm::{convert, to_consense, to_markdown};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Serialize, Default)]
struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<bool>,
}

#[derive(Deserialize, Debug)]
struct ConvertResult {
    output: String,
    direction: String,
    warnings: Vec<WarningEntry>,
}

#[derive(Deserialize, Debug)]
struct WarningEntry {
    line: usize,
    message: String,
}

fn run(input: &str, config: Config) -> ConvertResult {
    let config = serde_wasm_bindgen::to_value(&config).expect("serialize config");
    let result = convert(input, config).expect("convert should succeed");
    serde_wasm_bindgen::from_value(result).expect("deserialize result")
}

#[wasm_bindgen_test]
fn named_exports_convert_both_ways() {
    assert_eq!(to_consense("# Title\nsome **bold**"), "[**** Title]\nsome [* bold]");
    assert_eq!(to_markdown("[**** Title]\nsome [* bold]"), "# Title\nsome **bold**");
}

#[wasm_bindgen_test]
fn convert_defaults_to_consense() {
    let result = convert("## Sub", JsValue::UNDEFINED).expect("convert should succeed");
    let result: ConvertResult = serde_wasm_bindgen::from_value(result).expect("deserialize result");

    assert_eq!(result.output, "[*** Sub]");
    assert_eq!(result.direction, "o2c");
    assert!(result.warnings.is_empty());
}

#[wasm_bindgen_test]
fn convert_accepts_reverse_direction() {
    let result = run(
        "table:\n A | B\n 1 | 2",
        Config {
            direction: Some("c2o"),
            ..Default::default()
        },
    );

    assert_eq!(result.output, "| A | B |\n| --- | --- |\n| 1 | 2 |");
    assert_eq!(result.direction, "c2o");
}

#[wasm_bindgen_test]
fn convert_accepts_long_direction_names() {
    let result = run(
        "[/ it]",
        Config {
            direction: Some("consense-to-obsidian"),
            ..Default::default()
        },
    );

    assert_eq!(result.output, "*it*");
    assert_eq!(result.direction, "c2o");
}

#[wasm_bindgen_test]
fn warnings_are_opt_in() {
    let source = "intro\n```rust\nfn main() {}";

    let quiet = run(source, Config::default());
    assert!(quiet.warnings.is_empty());

    let loud = run(
        source,
        Config {
            diagnostics: Some(true),
            ..Default::default()
        },
    );
    assert_eq!(loud.output, "intro\ncode:rust\n fn main() {}");
    assert_eq!(loud.warnings.len(), 1);
    assert_eq!(loud.warnings[0].line, 2);
    assert!(loud.warnings[0].message.contains("rust"));
}

#[wasm_bindgen_test]
fn unknown_direction_is_an_error() {
    let config = serde_wasm_bindgen::to_value(&Config {
        direction: Some("sideways"),
        ..Default::default()
    })
    .expect("serialize config");

    assert!(convert("text", config).is_err());
}

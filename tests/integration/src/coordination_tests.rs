//! Two-stage build: a messages stage and a JSON stage that cannot exclude
//! files on its own.

use icu_messages::{MessagesStage, WrapOptions, icu_messages_wrap_stages};
use icu_options::Options;
use icu_pipeline::{Pipeline, Stage, StageError, TransformHook, TransformOutput};
use pretty_assertions::assert_eq;

/// A JSON stage handling every `.json` module.
fn json_stage() -> Stage {
    Stage::new("json").with_transform(TransformHook::bare(|code, id| {
        if !id.ends_with(".json") {
            return Ok(None);
        }
        let value: serde_json::Value = serde_json::from_str(code)
            .map_err(|err| StageError::new("JSON_PARSE", err.to_string()))?;
        Ok(Some(TransformOutput::new(format!("export default {value};"))))
    }))
}

fn build() -> Pipeline {
    let messages = MessagesStage::new(Options::new().include(["*.msg.json"]).format("simple"))
        .unwrap()
        .into_stage();

    let mut pipeline = Pipeline::new(vec![
        messages,
        json_stage(),
        icu_messages_wrap_stages(WrapOptions::new()),
    ]);
    pipeline.build_start().unwrap();
    pipeline
}

#[test]
fn test_json_stage_declines_message_files() {
    let pipeline = build();
    let json = pipeline.stage("json").unwrap().transform.as_ref().unwrap();

    assert_eq!(json.call(r#"{"hi":"Hi"}"#, "en.msg.json").unwrap(), None);
}

#[test]
fn test_json_stage_output_is_unchanged_elsewhere() {
    let pipeline = build();
    let json = pipeline.stage("json").unwrap().transform.as_ref().unwrap();
    let code = r#"{"b":[1,2]}"#;

    let wrapped = json.call(code, "b.json").unwrap();
    let original = json_stage().transform.unwrap().call(code, "b.json").unwrap();

    assert_eq!(wrapped, original);
    assert!(pipeline.warnings().is_empty());
}

#[test]
fn test_full_build_routes_each_module_once() {
    let pipeline = build();

    let messages = pipeline.transform("en.msg.json", r#"{"hi":"Hi"}"#).unwrap();
    let data = pipeline.transform("b.json", r#"{"b":true}"#).unwrap();

    assert_eq!(messages.handled_by, vec!["icu-messages"]);
    assert_eq!(data.handled_by, vec!["json"]);
    assert_eq!(data.code, r#"export default {"b":true};"#);
}

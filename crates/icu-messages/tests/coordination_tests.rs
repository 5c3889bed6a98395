//! Coordination of sibling stages through the build-start hook

use icu_messages::{
    STAGE_NAME, WRAPPER_STAGE_NAME, WrapOptions, codes, icu_messages, icu_messages_wrap_stages,
    wrap_stages,
};
use icu_options::Options;
use icu_pipeline::{
    HookOrder, ObjectHook, Pipeline, Stage, TransformHook, TransformOutput, TransformResult,
    Warning,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Stand-in for a JSON stage that turns any `.json` module into a module.
fn json_transform(code: &str, id: &str) -> TransformResult {
    if !id.ends_with(".json") {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_str(code)
        .map_err(|err| icu_pipeline::StageError::new("JSON_PARSE", err.to_string()))?;
    Ok(Some(TransformOutput::new(format!("export default {value};"))))
}

fn json_stage(name: &str) -> Stage {
    Stage::new(name).with_transform(TransformHook::bare(json_transform))
}

fn messages(include: &str) -> Stage {
    icu_messages(Options::new().include([include]).format("simple")).unwrap()
}

#[test]
fn test_empty_build_reports_once() {
    let mut pipeline = Pipeline::new(Vec::new());
    pipeline.push(icu_messages_wrap_stages(WrapOptions::new()));

    // The coordinator sees itself, so the list is not empty here
    pipeline.build_start().unwrap();
    assert!(pipeline.warnings().is_empty());

    let mut warnings = Vec::new();
    let wrapped = wrap_stages(None, &WrapOptions::new(), &mut |w| warnings.push(w));

    assert_eq!(wrapped, 0);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, codes::WRAP_NO_STAGES);
}

#[rstest]
#[case::no_wrappers(false, 1)]
#[case::one_wrapper(true, 0)]
fn test_opting_out_of_defaults(#[case] add_wrapper: bool, #[case] expected_warnings: usize) {
    let mut options = WrapOptions::new().extend_defaults(false);
    if add_wrapper {
        options = options.wrapper("json", icu_messages::wrap::wrap_transform);
    }
    let mut pipeline = Pipeline::new(vec![
        messages("**/*.msg.json"),
        json_stage("json"),
        icu_messages_wrap_stages(options),
    ]);

    pipeline.build_start().unwrap();

    let useless: Vec<&Warning> = pipeline
        .warnings()
        .iter()
        .filter(|w| w.code == codes::WRAP_USELESS)
        .collect();
    assert_eq!(useless.len(), expected_warnings);
    if let Some(warning) = useless.first() {
        assert_eq!(warning.stage.as_deref(), Some(WRAPPER_STAGE_NAME));
    }
}

#[test]
fn test_wrapped_json_stage_declines_messages() {
    let mut pipeline = Pipeline::new(vec![
        messages("**/*.msg.json"),
        json_stage("json"),
        icu_messages_wrap_stages(WrapOptions::new()),
    ]);
    pipeline.build_start().unwrap();

    let out = pipeline
        .transform("/src/en.msg.json", r#"{ "hi": "Hi" }"#)
        .unwrap();
    assert_eq!(out.handled_by, vec![STAGE_NAME]);

    let out = pipeline.transform("/src/data.json", r#"{"a":1}"#).unwrap();
    assert_eq!(out.handled_by, vec!["json"]);
    assert_eq!(out.code, r#"export default {"a":1};"#);
}

#[test]
fn test_unwrapped_json_stage_breaks_messages() {
    let pipeline = Pipeline::new(vec![messages("**/*.msg.json"), json_stage("json")]);

    let err = pipeline
        .transform("/src/en.msg.json", r#"{ "hi": "Hi" }"#)
        .unwrap_err();

    assert_eq!(err.stage(), "json");
}

#[test]
fn test_self_coordination() {
    let stage = icu_messages(
        Options::new()
            .include(["**/*.msg.json"])
            .format("simple")
            .wrap_json_stages(true),
    )
    .unwrap();
    let mut pipeline = Pipeline::new(vec![json_stage("vite:json"), stage]);

    pipeline.build_start().unwrap();

    assert!(pipeline.warnings().is_empty());
    let out = pipeline
        .transform("/src/en.msg.json", r#"{ "hi": "Hi" }"#)
        .unwrap();
    assert_eq!(out.handled_by, vec![STAGE_NAME]);
}

#[test]
fn test_filters_of_all_messages_stages_are_combined() {
    let mut pipeline = Pipeline::new(vec![
        messages("**/*.msg.json"),
        messages("**/*.i18n.json"),
        json_stage("json"),
        icu_messages_wrap_stages(WrapOptions::new()),
    ]);
    pipeline.build_start().unwrap();

    let json = pipeline.stage("json").unwrap().transform.as_ref().unwrap();

    assert!(json.call("{}", "en.msg.json").unwrap().is_none());
    assert!(json.call("{}", "en.i18n.json").unwrap().is_none());
    assert!(json.call("{}", "en.json").unwrap().is_some());
}

#[test]
fn test_mismatched_api_is_a_warning() {
    let impostor = Stage::new(STAGE_NAME).with_api("not an api");
    let mut pipeline = Pipeline::new(vec![
        impostor,
        json_stage("json"),
        icu_messages_wrap_stages(WrapOptions::new()),
    ]);

    pipeline.build_start().unwrap();

    assert_eq!(pipeline.warnings().len(), 1);
    assert_eq!(pipeline.warnings()[0].code, codes::WRAP_API_MISMATCH);

    // With no usable filter, the wrapped stage handles everything as before
    let json = pipeline.stage("json").unwrap().transform.as_ref().unwrap();
    assert!(json.call("{}", "en.msg.json").unwrap().is_some());
}

#[test]
fn test_object_hook_keeps_order_after_wrapping() {
    let hook = ObjectHook::new(json_transform).with_order(HookOrder::Post);
    let mut pipeline = Pipeline::new(vec![
        Stage::new("json").with_transform(TransformHook::Object(hook)),
        messages("**/*.msg.json"),
        icu_messages_wrap_stages(WrapOptions::new()),
    ]);

    pipeline.build_start().unwrap();

    let json = pipeline.stage("json").unwrap().transform.as_ref().unwrap();
    assert_eq!(json.order(), Some(HookOrder::Post));
    assert!(json.call("{}", "en.msg.json").unwrap().is_none());
}

#[test]
fn test_stages_added_after_coordination_are_not_wrapped() {
    let mut pipeline = Pipeline::new(vec![
        messages("**/*.msg.json"),
        icu_messages_wrap_stages(WrapOptions::new()),
    ]);
    pipeline.build_start().unwrap();
    pipeline.push(json_stage("json"));

    let json = pipeline.stage("json").unwrap().transform.as_ref().unwrap();
    assert!(json.call("{}", "en.msg.json").unwrap().is_some());
}

#[test]
fn test_custom_wrapper_receives_combined_filter() {
    let options = WrapOptions::new().wrapper("yaml", |stage: &mut Stage, filter| {
        let matched = filter("en.msg.json");
        stage.name = format!("yaml (skips messages: {matched})");
    });
    let mut stages = vec![messages("**/*.msg.json"), Stage::new("yaml")];
    let mut warnings = Vec::new();

    let wrapped = wrap_stages(Some(&mut stages[..]), &options, &mut |w| warnings.push(w));

    assert_eq!(wrapped, 1);
    assert!(warnings.is_empty());
    assert_eq!(stages[1].name, "yaml (skips messages: true)");
}

#[test]
fn test_ineffective_coordinator_still_checks_apis() {
    let mut pipeline = Pipeline::new(vec![
        Stage::new(STAGE_NAME).with_api("bad"),
        json_stage("json"),
        icu_messages_wrap_stages(WrapOptions::new().extend_defaults(false)),
    ]);

    pipeline.build_start().unwrap();

    let reported: Vec<&str> = pipeline.warnings().iter().map(|w| w.code.as_str()).collect();
    assert_eq!(reported, vec![codes::WRAP_USELESS, codes::WRAP_API_MISMATCH]);
    assert!(
        pipeline
            .warnings()
            .iter()
            .all(|w| w.stage.as_deref() == Some(WRAPPER_STAGE_NAME))
    );
}

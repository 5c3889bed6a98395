//! End-to-end test: config file -> stage -> message files on disk

use icu_messages::{STAGE_NAME, icu_messages};
use icu_options::Options;
use icu_pipeline::Pipeline;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Set up a project with a stage config and two locales.
fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let i18n = temp.path().join("i18n");
    fs::create_dir(&i18n).unwrap();

    fs::write(
        temp.path().join("icu.toml"),
        r#"
include = ["**/*.messages.json", { regex = "\\.strings\\.json$" }]
exclude = "**/drafts/**"
indent = 2
format = "crowdin"
"#,
    )
    .unwrap();

    fs::write(
        i18n.join("en.messages.json"),
        r#"{ "greeting": { "message": "Hello", "description": "Shown on start" } }"#,
    )
    .unwrap();
    fs::write(
        i18n.join("de.strings.json"),
        r#"{ "greeting": { "message": "Hallo" } }"#,
    )
    .unwrap();

    fs::create_dir(i18n.join("drafts")).unwrap();
    fs::write(i18n.join("drafts").join("fr.messages.json"), "not even json").unwrap();

    temp
}

fn load_options(root: &Path) -> Options {
    let text = fs::read_to_string(root.join("icu.toml")).unwrap();
    toml::from_str(&text).unwrap()
}

fn transform(pipeline: &Pipeline, path: &Path) -> icu_pipeline::Transformed {
    let code = fs::read_to_string(path).unwrap();
    pipeline.transform(&path.to_string_lossy(), &code).unwrap()
}

#[test]
fn test_config_file_drives_stage() {
    let temp = setup_project();
    let i18n = temp.path().join("i18n");

    let stage = icu_messages(load_options(temp.path())).unwrap();
    let pipeline = Pipeline::new(vec![stage]);

    let en = transform(&pipeline, &i18n.join("en.messages.json"));
    assert_eq!(en.handled_by, vec![STAGE_NAME]);
    assert_eq!(
        en.code,
        concat!(
            "export const greeting = [\n",
            "  {\n",
            "    \"type\": 0,\n",
            "    \"value\": \"Hello\"\n",
            "  }\n",
            "];\n",
            "export default {\n",
            "  greeting: greeting\n",
            "};\n",
        )
    );

    let de = transform(&pipeline, &i18n.join("de.strings.json"));
    assert!(de.code.contains("\"value\": \"Hallo\""));

    // Excluded, so the broken file is passed through untouched
    let draft = transform(&pipeline, &i18n.join("drafts").join("fr.messages.json"));
    assert!(draft.handled_by.is_empty());
    assert_eq!(draft.code, "not even json");
}

#[test]
fn test_module_ids_are_independent() {
    let temp = setup_project();
    let i18n = temp.path().join("i18n");
    fs::write(
        i18n.join("pt-BR.messages.json"),
        r#"{ "greeting": { "message": "Olá" } }"#,
    )
    .unwrap();

    let stage = icu_messages(load_options(temp.path())).unwrap();
    let pipeline = Pipeline::new(vec![stage]);

    let first = transform(&pipeline, &i18n.join("pt-BR.messages.json"));
    let again = transform(&pipeline, &i18n.join("pt-BR.messages.json"));
    let en = transform(&pipeline, &i18n.join("en.messages.json"));

    assert_eq!(first.code, again.code);
    assert!(first.code.contains("Olá"));
    assert!(en.code.contains("Hello"));
}

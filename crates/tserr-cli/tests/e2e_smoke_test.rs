use std::{fs, path::Path};

use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

use tserr::TsErrError;
use tserr_cli::{Args, run};

const BLOB: &str = "Argument of type '{}' is not assignable to parameter of type '{ wow: { nice: boolean; }; }'.
    Property 'wow' is missing in type '{}' but required in type '{ wow: { nice: boolean; }; }'.
Conversion of type 'string' to type 'string[]' may be a mistake because neither type sufficiently overlaps with the other. If this was intentional, convert the expression to 'unknown' first.
";

/// Lays out an input file and an empty config in a fresh directory.
fn workspace(config: &str) -> (TempDir, Args) {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("errors.txt");
    let config_path = dir.path().join("config.toml");
    fs::write(&input, BLOB).unwrap();
    fs::write(&config_path, config).unwrap();

    let args = Args {
        input: Some(input.to_string_lossy().to_string()),
        output: Some(dir.path().join("out.json").to_string_lossy().to_string()),
        config: Some(config_path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };
    (dir, args)
}

fn read_output(dir: &Path) -> Value {
    let content = fs::read_to_string(dir.join("out.json")).expect("output written");
    serde_json::from_str(&content).expect("output is JSON")
}

#[test]
fn e2e_smoke_test_parses_file() {
    let (dir, args) = workspace("");

    run(&args).expect("run succeeds");

    let output = read_output(dir.path());
    let codes: Vec<u64> = output
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["code"].as_u64().unwrap())
        .collect();
    assert_eq!(codes, [2741, 2345, 2352]);
    assert_eq!(output[1]["parseInfo"]["startIndex"], 0);
    assert_eq!(output[1]["parseInfo"]["endIndex"], 92);
    assert_eq!(output[2]["parseInfo"]["items"], json!(["string", "string[]"]));
    assert!(output.as_array().unwrap().iter().all(|e| e["improvedError"].is_null()));
}

#[test]
fn e2e_smoke_test_explanations_from_config() {
    let docs = tempdir().unwrap();
    fs::write(
        docs.path().join("2345.md"),
        "---\nexcerpt: \"'{0}' is not a '{1}'.\"\n---\nPass a `{1}`.\n",
    )
    .unwrap();
    let config = format!(
        "[parse]\ndir = {:?}\nlegacy_item_fields = true\n",
        docs.path().to_string_lossy()
    );
    let (dir, args) = workspace(&config);

    run(&args).expect("run succeeds");

    let output = read_output(dir.path());
    assert_eq!(
        output[1]["improvedError"],
        json!({
            "body": "Pass a `{ wow: { nice: boolean; }; }`.\n",
            "excerpt": "`{}` is not a `{ wow: { nice: boolean; }; }`.",
        })
    );
    assert_eq!(output[1]["parseInfo"]["firstItem"], "{}");
    assert!(output[1]["parseInfo"].get("items").is_none());
}

#[test]
fn e2e_smoke_test_flags_and_custom_registry() {
    let (dir, mut args) = workspace("");
    let registry = dir.path().join("messages.json");
    fs::write(
        &registry,
        r#"{ "Conversion of type '{0}' to type '{1}' may be a mistake because neither type sufficiently overlaps with the other. If this was intentional, convert the expression to '{2}' first.": { "category": "Error", "code": 2352 } }"#,
    )
    .unwrap();
    args.registry = Some(registry);
    args.utf16 = true;
    args.pretty = true;

    run(&args).expect("run succeeds");

    let raw = fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert!(raw.contains("\n  {"), "output is pretty-printed");

    let output = read_output(dir.path());
    assert_eq!(output.as_array().unwrap().len(), 1);
    assert_eq!(
        output[0]["parseInfo"]["items"],
        json!(["string", "string[]", "unknown"])
    );
    assert_eq!(output[0]["parseInfo"]["startIndex"], 189);
}

#[test]
fn e2e_smoke_test_error_cases() {
    let (dir, mut args) = workspace("");
    args.registry = Some(dir.path().join("missing.json"));
    assert!(matches!(run(&args), Err(TsErrError::Registry(_))));

    let (_dir, mut args) = workspace("");
    args.input = Some("/definitely/not/here/errors.txt".to_string());
    assert!(matches!(run(&args), Err(TsErrError::Io(_))));

    let (_dir, mut args) = workspace("");
    args.config = Some("/definitely/not/here/config.toml".to_string());
    assert!(matches!(run(&args), Err(TsErrError::Config(_))));

    let (dir, args) = workspace("[parse]\noffsets = 8\n");
    assert!(matches!(run(&args), Err(TsErrError::Config(_))));
    assert!(!dir.path().join("out.json").exists());
}

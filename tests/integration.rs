use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_restdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_produces_markdown() {
    let input = "\"\"\"\n@api {get} /product Get all products\n@apiGroup Product\n@apiQueryParam [sort] sort field\n\"\"\"\n";

    let assert = cmd().write_stdin(input).assert().success();
    let output = stdout_of(&assert);
    assert!(output.starts_with("# API Documentation\n\n## Index\n\n"));
    assert!(output.contains("* [Get all products](#get-product)"));
    assert!(output.contains("### GET /product\n"));
    assert!(output.contains("| `sort` |  | no |  | sort field |"));
    assert!(output.contains("* **200**: ok"));
}

#[test]
fn stdin_mode_json() {
    let input = "'''\n@api {POST} /orders Create order\n@apiVersion 2\n@apiParam {String} item Item id\n@apiError (409) Conflict Duplicate order\n'''\n";

    let assert = cmd()
        .args(["-f", "json", "--title", "Orders"])
        .write_stdin(input)
        .assert()
        .success();
    let doc: serde_json::Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    assert_eq!(doc["title"], "Orders");
    assert_eq!(doc["version"], "2");
    let resource = &doc["resources"][0];
    assert_eq!(resource["method"], "post");
    assert_eq!(resource["path"], "/orders");
    assert_eq!(resource["params"][0]["kind"], "form");
    assert_eq!(resource["params"][0]["required"], true);
    assert_eq!(resource["responses"][1]["status"], 409);
    assert_eq!(resource["responses"][1]["body"][0]["name"], "Conflict");
}

#[test]
fn stdin_mode_without_annotations_prints_nothing() {
    cmd()
        .write_stdin("def handler():\n    \"\"\"Plain docstring.\"\"\"\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn base_uri_shown_in_header() {
    cmd()
        .args(["--base-uri", "https://shop.example.com/api"])
        .write_stdin("\"\"\"\n@api {get} /x X\n\"\"\"")
        .assert()
        .success()
        .stdout(predicate::str::contains("Base URI: `https://shop.example.com/api`"));
}

// -- file mode --

#[test]
fn file_mode_writes_one_file_per_version() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("docs");

    cmd()
        .arg("-o")
        .arg(&out)
        .arg(fixture_path("online_store"))
        .assert()
        .success();

    let v1 = std::fs::read_to_string(out.join("1.0.0.md")).unwrap();
    assert!(v1.contains("Version: `1.0.0`"));
    assert!(v1.contains("### GET /product\n"));
    assert!(v1.contains("### GET /product/:productId\n"));
    assert!(!v1.contains("DELETE"));

    let v2 = std::fs::read_to_string(out.join("2.0.0.md")).unwrap();
    assert!(v2.contains("> **Deprecated:** use archive instead"));

    let unversioned = std::fs::read_to_string(out.join("unversioned.md")).unwrap();
    assert!(unversioned.contains("### GET /seller\n"));
    assert!(!unversioned.contains("Version:"));
}

#[test]
fn file_mode_expands_definitions_across_files() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("-o")
        .arg(dir.path())
        .args(["-f", "json"])
        .arg(fixture_path("online_store"))
        .assert()
        .success();

    let json = std::fs::read_to_string(dir.path().join("1.0.0.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    let list = &doc["resources"][0];
    assert_eq!(list["path"], "/product");
    assert_eq!(list["security"]["roles"], serde_json::json!(["god", "operator"]));

    let names: Vec<&str> = list["params"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["sort", "Authorization", "page", "size"]);
    assert_eq!(list["params"][1]["kind"], "header");
    assert_eq!(list["params"][2]["default"], "1");

    let show = &doc["resources"][1];
    let statuses: Vec<u64> = show["responses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["status"].as_u64().unwrap())
        .collect();
    assert_eq!(statuses, [200, 404, 400]);
}

#[test]
fn glob_input() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/views/*.py", fixture_path("online_store"));

    cmd()
        .arg("-o")
        .arg(dir.path())
        .arg("--lenient")
        .arg(&pattern)
        .assert()
        .success();

    assert!(dir.path().join("1.0.0.md").exists());
    assert!(dir.path().join("unversioned.md").exists());
}

#[test]
fn api_version_filter() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("-o")
        .arg(dir.path())
        .args(["--api-version", "2.0.0"])
        .arg(fixture_path("online_store"))
        .assert()
        .success();

    assert!(dir.path().join("2.0.0.md").exists());
    assert!(!dir.path().join("1.0.0.md").exists());
    assert!(!dir.path().join("unversioned.md").exists());
}

#[test]
fn api_version_filter_without_match_fails() {
    cmd()
        .args(["--api-version", "9.9.9"])
        .arg(fixture_path("online_store"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no resources documented for version 9.9.9"));
}

// -- malformed input --

#[test]
fn missing_method_is_an_error() {
    cmd()
        .arg(fixture_path("wrong_usecases/wrong_api_name.py"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong_api_name.py: block 1: @api: missing required method"));
}

#[test]
fn missing_path_is_an_error() {
    cmd()
        .arg(fixture_path("wrong_usecases/wrong_api_path.py"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("@api: missing required path"));
}

#[test]
fn missing_param_name_is_an_error() {
    cmd()
        .arg(fixture_path("wrong_usecases/missed_parameter_name.py"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("@apiQueryParam: missing required name"));
}

#[test]
fn undefined_reference_fails_by_default() {
    cmd()
        .arg(fixture_path("wrong_usecases/wrong_api_use.py"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such @apiDefine `NotDefinedAnywhere`"));
}

#[test]
fn undefined_reference_warns_when_lenient() {
    cmd()
        .arg("--lenient")
        .arg(fixture_path("wrong_usecases/wrong_api_use.py"))
        .assert()
        .success()
        .stdout(predicate::str::contains("### GET /product"))
        .stdout(predicate::str::contains("`Product`"))
        .stderr(predicate::str::contains("`NotDefinedAnywhere` is not defined"));
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["-f", "html"])
        .write_stdin("\"\"\"\n@api {get} /x X\n\"\"\"")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: html"));
}

#[test]
fn unmatched_pattern_only_warns() {
    cmd()
        .arg(fixture_path("online_store/views/seller.py"))
        .arg(fixture_path("does_not_exist/*.py"))
        .assert()
        .success()
        .stdout(predicate::str::contains("### GET /seller"))
        .stderr(predicate::str::contains("no files matched"));
}

#[test]
fn versions_sharing_a_file_name_fail() {
    let dir = TempDir::new().unwrap();
    let input = "\"\"\"\n@api {get} /a A\n@apiVersion 1/0\n\"\"\"\n\"\"\"\n@api {get} /b B\n@apiVersion 1_0\n\"\"\"\n";

    cmd()
        .arg("-o")
        .arg(dir.path())
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("would both be written to 1_0.md"));
}

//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use similar_asserts::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn bigbrain() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bigbrain"))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write");
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).expect("read")
}

fn path_arg(root: &Path) -> &str {
    root.to_str().expect("utf8 path")
}

#[test]
fn test_cli_version() {
    bigbrain().arg("--version").assert().success().stdout(predicate::str::contains("bigbrain"));
}

#[test]
fn test_cli_help() {
    bigbrain()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stamp source files"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--run"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_annotate_inserts_relative_path() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "test.js", "console.log('Hello');");
    write(root, "src/lib/util.py", "import os\n");

    bigbrain()
        .arg(path_arg(root))
        .assert()
        .success()
        .stdout(predicate::str::contains("Path inserted: test.js"))
        .stdout(predicate::str::contains("Path inserted: src/lib/util.py"));

    assert_eq!(read(root, "test.js"), "// test.js\nconsole.log('Hello');");
    assert_eq!(read(root, "src/lib/util.py"), "# src/lib/util.py\nimport os\n");
}

#[test]
fn test_annotate_is_idempotent() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "a.ts", "export const a = 1;\n");
    write(root, "nested/b.go", "package nested\n");

    bigbrain().arg(path_arg(root)).assert().success();
    let first_a = read(root, "a.ts");
    let first_b = read(root, "nested/b.go");

    bigbrain()
        .arg(path_arg(root))
        .assert()
        .success()
        .stdout(predicate::str::contains("Path inserted:").not())
        .stdout(predicate::str::contains("0 inserted, 2 already present"));

    assert_eq!(read(root, "a.ts"), first_a);
    assert_eq!(read(root, "nested/b.go"), first_b);
}

#[test]
fn test_dry_run_changes_nothing() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "index.js", "module.exports = {};\n");

    bigbrain()
        .args(["--dry-run", path_arg(root)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would insert path: index.js"))
        .stdout(predicate::str::contains("Path inserted:").not());

    assert_eq!(read(root, "index.js"), "module.exports = {};\n");
}

#[test]
fn test_gitignore_rules_and_hidden_files() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, ".gitignore", "# outputs\n/build\n*.log\n");
    write(root, "build/bundle.js", "bundle();\n");
    write(root, "src/build/keep.js", "keep();\n");
    write(root, "src/trace.log", "trace\n");
    write(root, ".config/settings.js", "settings();\n");

    bigbrain().arg(path_arg(root)).assert().success();

    assert_eq!(read(root, "build/bundle.js"), "bundle();\n");
    assert_eq!(read(root, "src/build/keep.js"), "// src/build/keep.js\nkeep();\n");
    assert_eq!(read(root, "src/trace.log"), "trace\n");
    assert_eq!(read(root, ".config/settings.js"), "settings();\n");
    assert_eq!(read(root, ".gitignore"), "# outputs\n/build\n*.log\n");
}

#[test]
fn test_extra_ignore_patterns_from_cli() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "gen/api.ts", "api();\n");
    write(root, "app.ts", "app();\n");

    bigbrain().args(["--ignore", "gen/", path_arg(root)]).assert().success();

    assert_eq!(read(root, "gen/api.ts"), "api();\n");
    assert_eq!(read(root, "app.ts"), "// app.ts\napp();\n");
}

#[test]
fn test_go_filter_protects_manifests() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "go.mod", "module example.com/app\n");
    write(root, "go.sum", "example.com/dep v1.0.0 h1:abc=\n");
    write(root, "main.go", "package main\n");
    write(root, "vendor/dep/dep.go", "package dep\n");
    write(root, "README.md", "# App\n");

    bigbrain().args(["--go", path_arg(root)]).assert().success();

    assert_eq!(read(root, "go.mod"), "module example.com/app\n");
    assert_eq!(read(root, "go.sum"), "example.com/dep v1.0.0 h1:abc=\n");
    assert_eq!(read(root, "main.go"), "// main.go\npackage main\n");
    assert_eq!(read(root, "vendor/dep/dep.go"), "package dep\n");
    assert_eq!(read(root, "README.md"), "# App\n");
}

#[test]
fn test_node_filter_excludes_public() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "public/logo.js", "logo();\n");
    write(root, "src/app.jsx", "app();\n");
    write(root, "src/style.css", "body {}\n");

    bigbrain()
        .args(["--node", path_arg(root)])
        .assert()
        .success()
        .stdout(predicate::str::contains("public/logo.js").not());

    assert_eq!(read(root, "public/logo.js"), "logo();\n");
    assert_eq!(read(root, "src/app.jsx"), "// src/app.jsx\napp();\n");
    assert_eq!(read(root, "src/style.css"), "body {}\n");
}

#[test]
fn test_multiple_ecosystem_filters_are_rejected() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "a.js", "a();\n");

    bigbrain()
        .args(["--node", "--go", path_arg(root)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only one ecosystem filter"));

    assert_eq!(read(root, "a.js"), "a();\n");
}

#[test]
fn test_run_mode_relocates_commented_files() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    let content = "// app/widgets/button.tsx\nexport const Button = () => null;\n";
    write(root, "app/widgets/button.tsx", content);
    write(root, "app/plain.ts", "plain();\n");

    bigbrain()
        .args(["--run", path_arg(root)])
        .assert()
        .success()
        .stdout(predicate::str::contains("app-widgets-button.tsx"));

    assert_eq!(read(root, ".bb/app-widgets-button.tsx"), content);
    assert!(!root.join(".bb/app-plain.ts").exists());
    assert_eq!(read(root, "app/plain.ts"), "plain();\n");
}

#[test]
fn test_run_mode_skips_visible_staging_dir() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "lib/a.js", "// lib/a.js\na();\n");

    for _ in 0..2 {
        bigbrain().args(["--run", "--staging-dir", "staged", path_arg(root)]).assert().success();
    }

    assert_eq!(read(root, "staged/lib-a.js"), "// lib/a.js\na();\n");
    assert_eq!(fs::read_dir(root.join("staged")).expect("staged").count(), 1);
}

#[test]
fn test_run_mode_skips_dot_relative_staging_dir() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "lib/a.js", "// lib/a.js\na();\n");

    for _ in 0..2 {
        bigbrain().args(["--run", "--staging-dir", "./staged", path_arg(root)]).assert().success();
    }

    assert_eq!(read(root, "staged/lib-a.js"), "// lib/a.js\na();\n");
    assert_eq!(fs::read_dir(root.join("staged")).expect("staged").count(), 1);
}

#[test]
fn test_run_mode_skips_absolute_staging_dir_under_root() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "lib/a.js", "// lib/a.js\na();\n");
    let staging = root.join("out");

    for _ in 0..2 {
        bigbrain()
            .args(["--run", "--staging-dir", path_arg(&staging), path_arg(root)])
            .assert()
            .success();
    }

    assert_eq!(read(root, "out/lib-a.js"), "// lib/a.js\na();\n");
    assert_eq!(fs::read_dir(&staging).expect("staged").count(), 1);
}

#[test]
fn test_run_mode_staging_dir_with_glob_characters() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "lib/a.js", "// lib/a.js\na();\n");
    write(root, "out1/b.js", "// out1/b.js\nb();\n");

    for _ in 0..2 {
        bigbrain().args(["--run", "--staging-dir", "out[1]", path_arg(root)]).assert().success();
    }

    let mut staged: Vec<String> = fs::read_dir(root.join("out[1]"))
        .expect("staged")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    staged.sort();
    assert_eq!(staged, vec!["lib-a.js", "out1-b.js"]);
}

#[test]
fn test_config_file_is_never_annotated() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    let config = "extra_ignore = ['gen/']\n";
    write(root, "bigbrain.toml", config);
    write(root, "gen/old.ts", "old();\n");
    write(root, "app.ts", "app();\n");

    bigbrain().arg(path_arg(root)).assert().success();
    write(root, "gen/new.ts", "fresh();\n");
    bigbrain().arg(path_arg(root)).assert().success();

    assert_eq!(read(root, "bigbrain.toml"), config);
    assert_eq!(read(root, "gen/old.ts"), "old();\n");
    assert_eq!(read(root, "gen/new.ts"), "fresh();\n");
    assert_eq!(read(root, "app.ts"), "// app.ts\napp();\n");
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_fails_the_run() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "a.js", "a();\n");
    write(root, ".hidden/h.js", "h();\n");
    write(root, "secret/s.js", "s();\n");
    write(root, "locked/l.js", "l();\n");
    let dirs = [".hidden", "secret", "locked"].map(|d| root.join(d));
    let chmod = |mode: u32| {
        for dir in &dirs {
            fs::set_permissions(dir, fs::Permissions::from_mode(mode)).expect("chmod");
        }
    };
    chmod(0o000);
    // Permission bits do not apply to a privileged user.
    if fs::read_dir(root.join("locked")).is_ok() {
        chmod(0o755);
        return;
    }

    let ignored_only = bigbrain()
        .args(["--ignore", "/secret,/locked", path_arg(root)])
        .assert()
        .try_success();
    let in_scope = bigbrain()
        .args(["--ignore", "/secret", path_arg(root)])
        .assert()
        .try_failure();
    chmod(0o755);

    ignored_only.expect("hidden and ignored unreadable dirs are skipped");
    in_scope
        .expect("unreadable dir in scope fails the run")
        .stderr(predicate::str::contains("Error during processing"));
    assert_eq!(read(root, "a.js"), "// a.js\na();\n");
}

#[test]
fn test_config_file_selects_ecosystem() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "bigbrain.toml", "ecosystem = 'python'\n");
    write(root, "tool.py", "print('hi')\n");
    write(root, "tool.js", "hi();\n");

    bigbrain().arg(path_arg(root)).assert().success();

    assert_eq!(read(root, "tool.py"), "# tool.py\nprint('hi')\n");
    assert_eq!(read(root, "tool.js"), "hi();\n");
}

#[test]
fn test_json_summary() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    write(root, "a.js", "a();\n");
    write(root, "b.js", "// b.js\nb();\n");

    bigbrain()
        .args(["--format", "json", path_arg(root)])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"inserted\": 1"))
        .stdout(predicate::str::contains("\"already_present\": 1"))
        .stdout(predicate::str::contains("\"mode\": \"annotate\""));
}

#[test]
fn test_invalid_path_fails() {
    let tmp = TempDir::new().expect("tmp");
    let missing = tmp.path().join("does/not/exist");

    bigbrain()
        .arg(path_arg(&missing))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error during processing"));
}

#[test]
fn test_completions_bash() {
    bigbrain()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bigbrain"));
}

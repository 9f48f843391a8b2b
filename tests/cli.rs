use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn retoken(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_retoken"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run retoken")
}

fn retoken_with_stdin(args: &[&str], cwd: &Path, input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_retoken"))
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn retoken");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait for retoken")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn run_prints_one_line_per_file_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("About.tsx"), "text-dark-blue\n").unwrap();
    fs::write(dir.path().join("Footer.tsx"), "text-gray-500\n").unwrap();

    let output = retoken(
        &[
            "run",
            "--replace",
            "dark-blue",
            "primary",
            "About.tsx",
            "Footer.tsx",
            "Gone.tsx",
        ],
        dir.path(),
    );

    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "✅ Updated: About.tsx",
            "⏭️  No changes needed: Footer.tsx",
            "⚠️  File not found: Gone.tsx",
            "",
            "🎉 Total files updated: 1",
        ]
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("About.tsx")).unwrap(),
        "text-primary\n"
    );
}

#[test]
fn per_file_failures_still_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("ui")).unwrap();

    let output = retoken(&["run", "--replace", "a", "b", "ui"], dir.path());

    assert!(output.status.success());
    assert!(stdout(&output).contains("❌ Error updating ui:"));
}

#[test]
fn dry_run_reports_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Menu.tsx"), "bg-dark-blue").unwrap();

    let output = retoken(
        &["run", "--dry-run", "--replace", "dark-blue", "primary", "Menu.tsx"],
        dir.path(),
    );

    let text = stdout(&output);
    assert!(text.contains("🔍 Would update: Menu.tsx"));
    assert!(text.contains("Total files that would be updated: 1"));
    assert_eq!(
        fs::read_to_string(dir.path().join("Menu.tsx")).unwrap(),
        "bg-dark-blue"
    );
}

#[test]
fn preset_prints_notes_after_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("components")).unwrap();
    fs::write(
        dir.path().join("components/Navbar.tsx"),
        "text-primary hover:text-primary",
    )
    .unwrap();

    let output = retoken(
        &["run", "--preset", "revert-text-colors", "--root", "."],
        dir.path(),
    );

    let text = stdout(&output);
    assert!(text.contains("✅ Reverted text colors: components/Navbar.tsx"));
    assert!(text.contains("🎉 Total files updated: 1"));
    assert!(text.trim_end().ends_with("🎨 Component colors (bg, border) remain orange (primary)"));
    assert_eq!(
        fs::read_to_string(dir.path().join("components/Navbar.tsx")).unwrap(),
        "text-dark-blue hover:text-dark-blue"
    );
}

#[test]
fn json_mode_emits_envelope() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Hero.tsx"), "dark-blue dark-blue").unwrap();

    let output = retoken(
        &["--json", "run", "--replace", "dark-blue", "primary", "Hero.tsx"],
        dir.path(),
    );

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["command"], "run");
    assert_eq!(value["data"]["updated"], 1);
    assert_eq!(value["data"]["outcomes"][0]["status"], "updated");
    assert_eq!(value["data"]["outcomes"][0]["replacements"], 2);
    assert_eq!(value["data"]["rules"][0]["from"], "dark-blue");
}

#[test]
fn missing_rules_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = retoken(&["--json", "run", "About.tsx"], dir.path());

    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error"]["code"], "validation.missing_argument");
}

#[test]
fn empty_pattern_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let output = retoken(&["run", "--replace", "", "x", "About.tsx"], dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("must not be empty"));
}

#[test]
fn presets_lists_builtins() {
    let dir = tempfile::tempdir().unwrap();

    let output = retoken(&["presets"], dir.path());

    let text = stdout(&output);
    assert!(text.contains("primary-colors: "));
    assert!(text.contains("  dark-blue → primary"));
    assert!(text.contains("revert-text-colors: "));
}

#[test]
fn unknown_preset_exits_4() {
    let dir = tempfile::tempdir().unwrap();

    let output = retoken(&["presets", "nope"], dir.path());

    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn job_on_stdin_reports_shadowed_rule() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Navbar.tsx"), "text-primary hover:text-primary").unwrap();
    let job = serde_json::json!({
        "targets": ["Navbar.tsx"],
        "rules": [
            {"from": "text-primary", "to": "text-dark-blue"},
            {"from": "hover:text-primary", "to": "hover:text-dark-blue"},
        ],
    });

    let output = retoken_with_stdin(&["--json", "run", "--job", "-"], dir.path(), &job.to_string());

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["data"]["warnings"][0]["kind"], "shadowed_rule");
    assert_eq!(value["data"]["warnings"][0]["rule"], 2);
    assert_eq!(value["data"]["updated"], 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("Navbar.tsx")).unwrap(),
        "text-dark-blue hover:text-dark-blue"
    );
}

#[test]
fn reverse_undoes_a_replace_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Menu.tsx"), "bg-dark-blue text-dark-blue").unwrap();

    let forward = retoken(&["run", "--replace", "dark-blue", "primary", "Menu.tsx"], dir.path());
    assert!(forward.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("Menu.tsx")).unwrap(),
        "bg-primary text-primary"
    );

    let backward = retoken(
        &["run", "--reverse", "--replace", "dark-blue", "primary", "Menu.tsx"],
        dir.path(),
    );
    assert!(backward.status.success());
    assert!(stdout(&backward).contains("✅ Updated: Menu.tsx"));
    assert_eq!(
        fs::read_to_string(dir.path().join("Menu.tsx")).unwrap(),
        "bg-dark-blue text-dark-blue"
    );
}

use std::path::Path;
use std::process::{Command, Output};

const SAMPLE: &str = "Hello мир, как дела?\nplain ascii text\nx = \"Привет\"; // ёж\n";

fn cyrscan(dir: &Path, args: &[&str]) -> Output {
    return Command::new(env!("CARGO_BIN_EXE_cyrscan"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap();
}

fn stdout(output: &Output) -> String {
    return String::from_utf8_lossy(&output.stdout).into_owned();
}

fn read_report(path: &Path) -> serde_json::Value {
    return serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
}

fn backups_in(dir: &Path) -> usize {
    return std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "bak"))
        .count();
}

#[test]
fn scan_writes_text_report_to_default_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), SAMPLE).unwrap();

    let out = cyrscan(dir.path(), &["scan", "page.html"]);
    assert!(out.status.success(), "scan failed: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Report saved: page_en.txt"));

    let text = std::fs::read_to_string(dir.path().join("page_en.txt")).unwrap();
    assert!(text.starts_with("Cyrillic content report for file: page.html\nMode: separate phrases\n"));
    assert!(text.contains("Line 1, position 6: 'мир'\n"));
    assert!(text.contains("Line 1, position 11: 'как дела'\n"));
    assert!(text.contains("Line 3, position 17: 'ёж'\n"));
}

#[test]
fn scan_json_whole_line_records_mode_and_entries() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), SAMPLE).unwrap();

    let out = cyrscan(dir.path(), &["scan", "page.html", "--json", "--all-line"]);
    assert!(out.status.success(), "scan failed: {}", String::from_utf8_lossy(&out.stderr));

    let report = read_report(&dir.path().join("page_en.json"));
    assert_eq!(report["filename"], "page.html");
    assert_eq!(report["mode"], "whole_line");
    let entries = report["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["include"], "мир, как дела");
    assert_eq!(entries[0]["position"], 6);
    assert_eq!(entries[0]["length"], 13);
    assert_eq!(entries[1]["line"], 3);
}

#[test]
fn explicit_output_path_is_used() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.txt"), SAMPLE).unwrap();

    let out = cyrscan(dir.path(), &["scan", "in.txt", "-j", "-o", "custom.json"]);
    assert!(out.status.success());
    assert!(dir.path().join("custom.json").exists());
    assert!(!dir.path().join("in_en.json").exists());
}

#[test]
fn config_file_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.txt"), SAMPLE).unwrap();
    std::fs::write(dir.path().join(".cyrscan.toml"), "format = \"json\"\nsuffix = \"_ru\"\n").unwrap();

    let out = cyrscan(dir.path(), &["scan", "in.txt"]);
    assert!(out.status.success(), "scan failed: {}", String::from_utf8_lossy(&out.stderr));
    let report = read_report(&dir.path().join("in_ru.json"));
    assert_eq!(report["mode"], "phrases");
}

#[test]
fn missing_input_prints_error_without_panicking() {
    let dir = tempfile::tempdir().unwrap();

    let out = cyrscan(dir.path(), &["scan", "absent.txt"]);
    assert_eq!(out.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("File Not Found"), "{stderr}");
    assert!(!stderr.contains("panicked"));
}

#[test]
fn replace_with_empty_fields_leaves_file_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let content = "мир\r\nplain\nпривет без перевода";
    std::fs::write(&input, content).unwrap();

    assert!(cyrscan(dir.path(), &["scan", "in.txt", "--json"]).status.success());
    let out = cyrscan(dir.path(), &["scan", "in.txt", "--replace"]);
    assert!(out.status.success(), "replace failed: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("No replacements to apply."));

    assert_eq!(std::fs::read(&input).unwrap(), content.as_bytes());
    assert_eq!(backups_in(dir.path()), 0);
}

#[test]
fn replace_single_entry_then_rescan() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, SAMPLE).unwrap();

    assert!(cyrscan(dir.path(), &["scan", "in.txt", "--json"]).status.success());
    let report_path = dir.path().join("in_en.json");
    let mut report = read_report(&report_path);
    report["entries"][1]["replace"] = serde_json::json!("how are you");
    std::fs::write(&report_path, serde_json::to_string_pretty(&report).unwrap()).unwrap();

    let out = cyrscan(dir.path(), &["scan", "in.txt", "--replace"]);
    assert!(out.status.success(), "replace failed: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Applied 1 replacement. Backup: in.txt.bak"));

    assert_eq!(std::fs::read_to_string(dir.path().join("in.txt.bak")).unwrap(), SAMPLE);
    assert_eq!(backups_in(dir.path()), 1);
    let edited = std::fs::read_to_string(&input).unwrap();
    assert!(edited.starts_with("Hello мир, how are you?\n"));

    assert!(cyrscan(dir.path(), &["scan", "in.txt", "--json", "-o", "rescan.json"]).status.success());
    let rescan = read_report(&dir.path().join("rescan.json"));
    let includes: Vec<&str> = rescan["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["include"].as_str().unwrap())
        .collect();
    assert!(!includes.contains(&"как дела"));
    assert_eq!(includes, vec!["мир", "Привет", "ёж"]);
}

#[test]
fn replace_two_entries_on_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, SAMPLE).unwrap();

    assert!(cyrscan(dir.path(), &["scan", "in.txt", "--json"]).status.success());
    let report_path = dir.path().join("in_en.json");
    let mut report = read_report(&report_path);
    report["entries"][0]["replace"] = serde_json::json!("world");
    report["entries"][1]["replace"] = serde_json::json!("how are you");
    std::fs::write(&report_path, serde_json::to_string(&report).unwrap()).unwrap();

    let out = cyrscan(dir.path(), &["scan", "in.txt", "--replace"]);
    assert!(out.status.success());
    let edited = std::fs::read_to_string(&input).unwrap();
    assert!(edited.starts_with("Hello world, how are you?\n"), "{edited}");
}

#[test]
fn replace_line_beyond_file_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "мир\n").unwrap();
    std::fs::write(
        dir.path().join("in_en.json"),
        r#"{"filename":"in.txt","mode":"phrases","entries":[{"line":9,"position":0,"length":3,"include":"мир","replace":"world"}]}"#,
    )
    .unwrap();

    let out = cyrscan(dir.path(), &["scan", "in.txt", "--replace"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("No replacements to apply."), "{text}");
    assert!(!text.contains("skipped"), "{text}");
    assert_eq!(std::fs::read_to_string(&input).unwrap(), "мир\n");
    assert_eq!(backups_in(dir.path()), 0);
}

#[test]
fn replace_with_malformed_report_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "мир\n").unwrap();
    std::fs::write(dir.path().join("in_en.json"), "not json").unwrap();

    let out = cyrscan(dir.path(), &["scan", "in.txt", "--replace"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Report Unreadable"));
    assert_eq!(std::fs::read_to_string(&input).unwrap(), "мир\n");
}

#[test]
fn check_flags_stale_entries() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, SAMPLE).unwrap();
    assert!(cyrscan(dir.path(), &["scan", "in.txt", "--json"]).status.success());

    let fresh = cyrscan(dir.path(), &["check", "in.txt"]);
    assert!(fresh.status.success());
    assert!(stdout(&fresh).contains("All 4 entries fresh"));

    std::fs::write(&input, "Hello мор, как дела?\n").unwrap();
    let stale = cyrscan(dir.path(), &["check", "in.txt", "--report", "in_en.json"]);
    assert_eq!(stale.status.code(), Some(1));
    let text = stdout(&stale);
    assert!(text.contains("STALE   1:6 'мир'"), "{text}");
    assert!(text.contains("BROKEN  3:5 (line out of range)"), "{text}");
    assert!(text.contains("2 broken, 1 stale"), "{text}");
}

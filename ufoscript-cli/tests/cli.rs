use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_script(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const OPTIONS_MENU: &str = "window options {\n\toptionlist res {\n\t\toption low { label \"Low\" value 0 }\n\t}\n}\n";

#[test]
fn parse_prints_treeviz_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "options.ufo", OPTIONS_MENU);

    let mut cmd = cargo_bin_cmd!("ufoscript");
    cmd.arg("parse").arg(&path);

    cmd.assert().success().stdout(
        predicate::str::contains("▣ window options")
            .and(predicate::str::contains("☰ optionlist res"))
            .and(predicate::str::contains("≔ label \"Low\"")),
    );
}

#[test]
fn parse_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "options.ufo", OPTIONS_MENU);

    let mut cmd = cargo_bin_cmd!("ufoscript");
    cmd.arg("parse").arg(&path).arg("--format").arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"optionlist\""));
}

#[test]
fn parse_unknown_format_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "options.ufo", OPTIONS_MENU);

    let mut cmd = cargo_bin_cmd!("ufoscript");
    cmd.arg("parse").arg(&path).arg("--format").arg("xml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Format 'xml' not found"));
}

#[test]
fn parse_unterminated_block_reports_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "broken.ufo", "optionlist { label \"a\"");

    let mut cmd = cargo_bin_cmd!("ufoscript");
    cmd.arg("parse").arg(&path);

    cmd.assert().failure().stderr(
        predicate::str::contains(":1:12: error: Unterminated 'optionlist' block")
            .and(predicate::str::contains("[unterminated-block]")),
    );
}

#[test]
fn unknown_blocks_flag_switches_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "bogus.ufo", "bogus { x 1 }\nwindow main { }\n");

    cargo_bin_cmd!("ufoscript")
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: Unknown block type 'bogus' skipped"));

    cargo_bin_cmd!("ufoscript")
        .arg("parse")
        .arg(&path)
        .arg("--unknown-blocks")
        .arg("error")
        .assert()
        .failure()
        .stderr(predicate::str::contains("[unknown-block]"));
}

#[test]
fn config_file_sets_default_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "options.ufo", OPTIONS_MENU);
    let config = write_script(&dir, "ufoscript.toml", "[output]\nformat = \"ufo\"\n");

    let mut cmd = cargo_bin_cmd!("ufoscript");
    cmd.arg("--config").arg(&config).arg("parse").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("window options {\n\toptionlist res {"));
}

#[test]
fn check_reports_diagnostics_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_script(&dir, "good.ufo", OPTIONS_MENU);
    let warn = write_script(&dir, "warn.ufo", "window { }\n");
    let bad = write_script(&dir, "bad.ufo", "window w {\n");

    let mut cmd = cargo_bin_cmd!("ufoscript");
    cmd.arg("check").arg(&good).arg(&warn).arg(&bad);

    cmd.assert()
        .failure()
        .stdout(
            predicate::str::contains("warn.ufo:1:1: warning: 'window' block has no name [unnamed-window]")
                .and(predicate::str::contains("bad.ufo:1:10: error:")),
        )
        .stderr(predicate::str::contains("3 file(s) checked"));
}

#[test]
fn check_clean_files_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_script(&dir, "good.ufo", OPTIONS_MENU);

    cargo_bin_cmd!("ufoscript")
        .arg("check")
        .arg(&good)
        .assert()
        .success()
        .stderr(predicate::str::contains("0 error(s), 0 warning(s), 0 failed"));
}

#[test]
fn tokens_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "t.ufo", "button ok { }");

    let mut cmd = cargo_bin_cmd!("ufoscript");
    cmd.arg("tokens").arg(&path);

    cmd.assert().success().stdout(
        predicate::str::contains("\"kind\": \"Identifier\"")
            .and(predicate::str::contains("\"kind\": \"Eof\"")),
    );
}

#[test]
fn list_blocks_and_formats() {
    cargo_bin_cmd!("ufoscript")
        .arg("list-blocks")
        .assert()
        .success()
        .stdout(predicate::str::contains("optionlist").and(predicate::str::contains("onClick")));

    cargo_bin_cmd!("ufoscript")
        .arg("list-formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("treeviz").and(predicate::str::contains("yaml")));
}

#[test]
fn missing_file_fails() {
    cargo_bin_cmd!("ufoscript")
        .arg("parse")
        .arg("does-not-exist.ufo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn max_depth_flag_rejects_deep_nesting() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "deep.ufo", "window w { panel a { panel b { } } }\n");

    cargo_bin_cmd!("ufoscript")
        .arg("parse")
        .arg(&path)
        .assert()
        .success();

    cargo_bin_cmd!("ufoscript")
        .arg("parse")
        .arg(&path)
        .arg("--max-depth")
        .arg("2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("[nesting-too-deep]"));
}

#[test]
fn config_line_numbers_reach_treeviz() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "options.ufo", OPTIONS_MENU);
    let config = write_script(&dir, "ufoscript.toml", "[output]\nshow_line_numbers = true\n");

    let mut cmd = cargo_bin_cmd!("ufoscript");
    cmd.arg("--config").arg(&config).arg("parse").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("01 └─ ▣ window options"));
}

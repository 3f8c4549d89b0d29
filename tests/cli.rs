//! Runs the `kwhash` binary end to end.

use std::process::Command;

#[test]
fn print_writes_only_the_header_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("kw.h");
    let json = dir.path().join("kw.json");

    let run = Command::new(env!("CARGO_BIN_EXE_kwhash"))
        .arg(&out)
        .arg("--print")
        .arg("--json")
        .arg(&json)
        .env_remove("KWHASH_LOG")
        .output()
        .unwrap();
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));

    let stdout = String::from_utf8(run.stdout).unwrap();
    assert_eq!(stdout, std::fs::read_to_string(&out).unwrap());
    assert!(!stdout.contains("[kwhash]"));

    let stderr = String::from_utf8_lossy(&run.stderr);
    assert!(stderr.contains("[kwhash] 48 keywords, trying sizes [5, 128)"), "{stderr}");
    assert!(stderr.contains(&format!("[kwhash] wrote {}", json.display())));
}

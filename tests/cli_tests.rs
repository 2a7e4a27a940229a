use serial_test::serial;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

const BIN: &str = env!("CARGO_BIN_EXE_slotfile");
const STORAGE_FILE: &str = "config.bin";

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute process")
}

#[test]
fn test_write_and_read() {
    let dir = tempdir().unwrap();

    let output = run(dir.path(), &["write", "3", "alpha", "hello"]);
    assert!(
        output.status.success(),
        "Write command failed: {:?}",
        output
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Write success!");

    let output = run(dir.path(), &["read", "3"]);
    assert!(output.status.success(), "Read command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("key=alpha, value=hello"),
        "Unexpected read output: {:?}",
        stdout
    );
}

#[test]
fn test_read_before_write_fails_without_creating_file() {
    let dir = tempdir().unwrap();

    let output = run(dir.path(), &["read", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Read failed!"), "{stderr:?}");
    assert!(stderr.contains("does not exist"), "{stderr:?}");
    assert!(output.stdout.is_empty());
    assert!(!dir.path().join(STORAGE_FILE).exists());
}

#[test]
fn test_read_unwritten_index_fails() {
    let dir = tempdir().unwrap();
    assert!(run(dir.path(), &["write", "0", "k", "v"]).status.success());

    let output = run(dir.path(), &["read", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Read failed!"));
}

#[test]
fn test_long_key_is_truncated() {
    let dir = tempdir().unwrap();

    assert!(
        run(dir.path(), &["write", "0", "keyname123456789", "val"])
            .status
            .success()
    );

    let output = run(dir.path(), &["read", "0"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Read success! key=keyname, value=val");
}

#[test]
fn test_malformed_arguments_fail_before_touching_file() {
    let dir = tempdir().unwrap();

    let cases: [&[&str]; 5] = [
        &[],
        &["read"],
        &["read", "abc"],
        &["write", "1", "only-key"],
        &["delete", "1"],
    ];

    for args in cases {
        let output = run(dir.path(), args);
        assert!(!output.status.success(), "{args:?} should fail");
        assert!(
            String::from_utf8_lossy(&output.stderr).contains("Usage"),
            "{args:?} should print usage"
        );
    }

    assert!(!dir.path().join(STORAGE_FILE).exists());
}

#[test]
fn test_storage_file_has_fixed_record_layout() {
    let dir = tempdir().unwrap();

    assert!(run(dir.path(), &["write", "2", "k", "v"]).status.success());

    let bytes = std::fs::read(dir.path().join(STORAGE_FILE)).unwrap();
    assert_eq!(bytes.len(), 120);
    assert_eq!(bytes[80], b'k');
    assert_eq!(bytes[88], b'v');
}

#[test]
#[serial]
fn test_concurrent_processes_never_interleave() {
    let dir = tempdir().unwrap();
    const WRITERS: usize = 8;

    let children: Vec<_> = (0..WRITERS)
        .map(|w| {
            let value = format!("{w}").repeat(31);
            Command::new(BIN)
                .args(["write", "0", &format!("proc{w}"), &value])
                .current_dir(dir.path())
                .stdout(Stdio::null())
                .spawn()
                .expect("Failed to spawn writer")
        })
        .collect();

    for mut child in children {
        assert!(child.wait().unwrap().success());
    }

    let output = run(dir.path(), &["read", "0"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.trim();

    let matched = (0..WRITERS).any(|w| {
        line == format!(
            "Read success! key=proc{w}, value={}",
            format!("{w}").repeat(31)
        )
    });
    assert!(matched, "Unexpected record after concurrent writes: {line:?}");
}

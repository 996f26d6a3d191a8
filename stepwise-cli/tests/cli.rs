use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

fn stepwise(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stepwise"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn help() {
    let dir = tempfile::tempdir().unwrap();
    let output = stepwise(&["--help"], dir.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--equation"));
}

#[test]
fn empty_equation() {
    let dir = tempfile::tempdir().unwrap();
    let output = stepwise(&["-e", "   "], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("non-empty"));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = stepwise(&["-f", "missing.txt"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("file not found"));
}

#[test]
fn file_without_inputs() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("inputs.txt"), "# nothing here\n\n").unwrap();
    let output = stepwise(&["-f", "inputs.txt"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no equations found"));
}

#[test]
fn bad_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.toml"), "[solver]\ntimeout_secs = \"soon\"\n").unwrap();
    let output = stepwise(&["--config", "bad.toml", "-e", "x=1"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn animate_requires_equation() {
    let dir = tempfile::tempdir().unwrap();
    let output = stepwise(&["--animate"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[cfg(unix)]
mod bridge {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Writes a configuration whose solver is a shell script that solves every equation in one
    /// step and rejects every expression.
    fn fake_solver() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("solver.sh");
        fs::write(&script, r#"
if [ "$1" = "equation" ]; then
    printf '{"steps":[{"changeType":"SIMPLIFY_LEFT_SIDE","oldState":"%s","newState":"x = -3/5"}]}' "$2"
else
    echo "cannot simplify $2" >&2
    exit 1
fi
"#).unwrap();

        let config = dir.path().join("stepwise.toml");
        fs::write(&config, format!(
            "[solver]\nprogram = \"sh\"\nscript = {:?}\ntimeout_secs = 5\n",
            script.display().to_string(),
        )).unwrap();
        (dir, config)
    }

    #[test]
    fn json_output() {
        let (dir, _) = fake_solver();
        let output = stepwise(&["-e", "5x+3=0", "--json"], dir.path());
        assert!(output.status.success());

        let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(envelope["status"], "success");
        assert_eq!(envelope["kind"], "equation");
        assert_eq!(envelope["stepCount"], 1);
        assert_eq!(envelope["steps"][0]["before"], "5x+3=0");
        assert_eq!(envelope["steps"][0]["after"], "x = -3/5");
    }

    #[test]
    fn human_output() {
        let (dir, _) = fake_solver();
        let output = stepwise(&["-e", "5x+3=0"], dir.path());
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("x = -3/5"));
    }

    #[test]
    fn single_failure() {
        let (dir, _) = fake_solver();
        let output = stepwise(&["-e", "2+"], dir.path());
        assert_eq!(output.status.code(), Some(1));
    }

    #[test]
    fn explicit_config() {
        let (dir, config) = fake_solver();
        let elsewhere = tempfile::tempdir().unwrap();
        let output = stepwise(&["--config", config.to_str().unwrap(), "-e", "5x+3=0", "--json"], elsewhere.path());
        assert!(output.status.success());
        drop(dir);
    }

    #[test]
    fn batch_save() {
        let (dir, _) = fake_solver();
        fs::write(dir.path().join("inputs.txt"), "# equations\n5x+3=0\n\n2+\n").unwrap();
        let output = stepwise(
            &["-f", "inputs.txt", "--batch", "-j", "2", "--save", "out/results.json"],
            dir.path(),
        );
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Total processed: 2"));
        assert!(stdout.contains("Successful: 1"));

        let saved = fs::read_to_string(dir.path().join("out/results.json")).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved["5x+3=0"]["status"], "success");
        assert_eq!(saved["2+"]["status"], "failure");
        assert_eq!(saved["2+"]["error"], "SolverError");
    }

    #[test]
    fn stdin_lines() {
        use std::{io::Write, process::Stdio};

        let (dir, _) = fake_solver();
        let mut child = Command::new(env!("CARGO_BIN_EXE_stepwise"))
            .args(["--json"])
            .current_dir(dir.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child.stdin.take().unwrap().write_all(b"5x+3=0\n").unwrap();

        let output = child.wait_with_output().unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("\"success\""));
    }
}

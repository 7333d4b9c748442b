#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create an `exemplar` command isolated from the caller's environment,
/// running in `cwd`.
#[allow(dead_code)]
pub fn exemplar_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("exemplar"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.current_dir(cwd);
    cmd.env_remove("EXEMPLAR_CONFIG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write a small examples tree under `root/examples` and return its path.
///
/// Contains two valid examples (one with a transcript and an image) and one
/// directory without a primary source file.
#[allow(dead_code)]
pub fn write_examples(root: &Path) -> PathBuf {
    let examples = root.join("examples");

    let hello = examples.join("001-hello-world");
    fs::create_dir_all(&hello).unwrap();
    fs::write(
        hello.join("hello-world.py"),
        "# Hello world\n# Print a greeting.\n\n# Say hello\nprint('hello')\n",
    )
    .unwrap();
    fs::write(
        hello.join("hello-world.sh"),
        "# Run the script\n$ python hello-world.py\nhello\n",
    )
    .unwrap();
    fs::write(hello.join("hello-world_links.txt"), "https://example.com/docs\n").unwrap();
    fs::write(hello.join("greeting-output.png"), b"\x89PNG\r\n").unwrap();

    let values = examples.join("002-values");
    fs::create_dir_all(&values).unwrap();
    fs::write(
        values.join("values.py"),
        "# Values\n\n# Strings concatenate\nprint('a' + 'b')\n",
    )
    .unwrap();

    let broken = examples.join("003-broken");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("notes.md"), "no source here\n").unwrap();

    examples
}

/// Run `exemplar build` in `root` with default paths and return the dataset path.
#[allow(dead_code)]
pub fn build_dataset(root: &Path) -> PathBuf {
    write_examples(root);
    exemplar_cmd(root).arg("build").assert().success();
    root.join("data").join("examples.json")
}

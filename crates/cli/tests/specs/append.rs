// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Appending entries from arguments and stdin

use crate::prelude::*;

#[test]
fn appends_argument_messages_in_order() {
    let dir = tempdir().unwrap();
    let path = log_path(&dir);

    cli()
        .file(&path)
        .args(&["first", "second", "third"])
        .passes()
        .stdout_eq("");

    assert_eq!(messages(&read_log(&path)), vec!["first", "second", "third"]);
}

#[test]
fn appends_stdin_lines_when_no_arguments() {
    let dir = tempdir().unwrap();
    let path = log_path(&dir);

    cli()
        .file(&path)
        .args(&["--buffer", "1"])
        .stdin("alpha\n\nbeta\n")
        .passes();

    assert_eq!(messages(&read_log(&path)), vec!["alpha", "", "beta"]);
}

#[test]
fn entries_are_separated_by_blank_lines() {
    let dir = tempdir().unwrap();
    let path = log_path(&dir);

    cli().file(&path).args(&["hello"]).passes();

    let content = read_log(&path);
    assert!(content.ends_with(": hello\n\n"), "got {content:?}");
    assert_eq!(content.len(), "Jan 02, 09:05: hello\n\n".len());
}

#[test]
fn existing_content_is_preserved() {
    let dir = tempdir().unwrap();
    let path = log_path(&dir);
    std::fs::write(&path, "earlier\n").unwrap();

    cli().file(&path).args(&["later"]).passes();
    cli().file(&path).args(&["latest"]).passes();

    let content = read_log(&path);
    let rest = content.strip_prefix("earlier\n").unwrap();
    assert_eq!(messages(rest), vec!["later", "latest"]);
}

#[test]
fn file_from_environment() {
    let dir = tempdir().unwrap();
    let path = log_path(&dir);

    cli()
        .env("SCRIBE_LOG_FILE", &path)
        .env("SCRIBE_FILE_MODE", "600")
        .env("SCRIBE_LOG_BUFFER", "2")
        .args(&["from env"])
        .passes();

    assert_eq!(messages(&read_log(&path)), vec!["from env"]);
}

#[cfg(unix)]
#[test]
fn new_file_is_write_only_by_default() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = log_path(&dir);
    let path_arg = path.to_string_lossy().into_owned();

    cli().args(&["--file", &path_arg, "hidden"]).passes();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode & 0o555, 0, "unexpected mode {:o}", mode);
    assert_eq!(mode & 0o200, 0o200, "unexpected mode {:o}", mode);
}

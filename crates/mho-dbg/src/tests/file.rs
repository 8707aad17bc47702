// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use crate::{DebugAllocator, Finding};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mho-dbg-{}-{}", std::process::id(), name))
}

fn read_write() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(true);
    options
}

#[test]
fn test_dropped_file_is_closed() {
    let dbg = DebugAllocator::new();
    let path = scratch_path("dropped");

    {
        let mut file = dbg.open_file(&path, &read_write()).expect("Failed to open");
        file.write_all(b"hello").expect("Failed to write");
        file.seek(SeekFrom::Start(0)).expect("Failed to seek");

        let mut contents = String::new();
        file.read_to_string(&mut contents).expect("Failed to read");
        assert_eq!(contents, "hello");
        assert_eq!(dbg.open_handles(), 1);
    }

    let report = dbg.report();
    assert!(report.is_clean(), "{:?}", report);
    assert_eq!(report.handles_opened, 1);
    assert_eq!(report.handles_closed, 1);

    std::fs::remove_file(&path).expect("Failed to remove");
}

#[test]
fn test_explicit_close_records_caller() {
    let dbg = DebugAllocator::new();
    let path = scratch_path("explicit");

    let file = dbg.open_file(&path, &read_write()).expect("Failed to open");
    let id = file.id();
    let line = line!() + 1;
    file.close();

    let handles = dbg.handles();
    assert_eq!(handles.len(), 1);
    assert_eq!(handles[0].id, id);
    assert_eq!(handles[0].closed_at.map(|l| l.line()), Some(line));
    assert_eq!(dbg.report().handles_closed, 1);

    std::fs::remove_file(&path).expect("Failed to remove");
}

#[test]
fn test_forgotten_file_is_unclosed() {
    let dbg = DebugAllocator::new();
    let path = scratch_path("forgotten");

    let (file, line) = (dbg.open_file(&path, &read_write()).expect("Failed to open"), line!());
    core::mem::forget(file);

    let report = dbg.report();
    assert_eq!(report.unclosed_handles(), 1);
    assert_eq!(report.handles_closed, 0);
    match report.findings[0] {
        Finding::UnclosedHandle { location, .. } => assert_eq!(location.line(), line),
        other => panic!("expected UnclosedHandle, got {:?}", other),
    }

    std::fs::remove_file(&path).expect("Failed to remove");
}

#[test]
fn test_failed_open_is_not_tracked() {
    let dbg = DebugAllocator::new();
    let path = scratch_path("missing-dir").join("nope");

    let result = dbg.open_file(&path, &OpenOptions::new().read(true).clone());

    assert!(result.is_err());
    let report = dbg.report();
    assert_eq!(report.handles_opened, 0);
    assert!(report.is_clean());
}

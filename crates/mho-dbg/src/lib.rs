// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Instrumented allocator for finding memory misuse in tests.
//!
//! [`DebugAllocator`] is a [`RawAllocator`](mho_alloc::RawAllocator) that
//! wraps another one and keeps a record of every block it hands out. Plug it
//! into any container built on `RawAllocator` and ask it for a [`Report`]
//! once the code under test is done.
//!
//! # What it finds
//!
//! | Finding | How |
//! |---------|-----|
//! | Leak | a record is still live when the report is taken |
//! | Double free | a release hits a record that is already freed |
//! | Underrun | the guard word before the block changed |
//! | Overrun | the guard word after the block changed |
//!
//! | Unclosed handle | a tracked handle is still open when the report is taken |
//!
//! Releases of pointers the allocator never handed out are ignored and
//! counted in [`Report::foreign_releases`].
//!
//! # Handles
//!
//! Resources that must be closed are tracked with
//! [`DebugAllocator::open_handle`] and [`DebugAllocator::close_handle`].
//! With the `std` feature, `DebugAllocator::open_file` returns a
//! `TrackedFile` that records its own close when dropped:
//!
//! ```toml
//! [dev-dependencies]
//! mho-dbg = { version = "*", features = ["std"] }
//! ```
//!
//! Every record carries the caller's source location, captured with
//! `#[track_caller]`, so findings point at the line that allocated.
//!
//! # Example
//!
//! ```rust
//! use mho_array::GrowableArray;
//! use mho_dbg::{DebugAllocator, Finding};
//!
//! let dbg = DebugAllocator::new();
//!
//! let mut arr = GrowableArray::new_in(&dbg);
//! arr.push(7u64).unwrap();
//! core::mem::forget(arr);
//!
//! let report = dbg.report();
//! assert_eq!(report.leaks(), 1);
//! assert!(matches!(report.findings[0], Finding::Leak { size, .. } if size > 0));
//! ```
//!
//! # Logging
//!
//! Tracked operations are logged through `tracing`: `trace` for every
//! allocate, release, handle open and close, `warn` for double frees,
//! damaged guards, foreign releases and double closes. No subscriber is
//! installed.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod config;
mod debug_allocator;
mod guard;
mod handle;
mod record;
mod report;

#[cfg(any(test, feature = "std"))]
mod file;

#[cfg(test)]
mod tests;

pub use config::{GuardConfig, OVER_GUARD, UNDER_GUARD};
pub use debug_allocator::DebugAllocator;
pub use handle::{HandleId, HandleRecord};
pub use record::AllocationRecord;
pub use report::{Finding, Report};

#[cfg(any(test, feature = "std"))]
pub use file::TrackedFile;

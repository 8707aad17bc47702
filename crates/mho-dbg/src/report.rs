// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;
use core::panic::Location;

use crate::handle::HandleId;
use crate::record::AllocationRecord;

/// One problem found by a [`DebugAllocator`](crate::DebugAllocator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
    /// A block that was never released.
    Leak {
        /// Address of the block.
        addr: usize,
        /// Size of the block in bytes.
        size: usize,
        /// Where it was allocated.
        location: &'static Location<'static>,
    },
    /// A block released more than once.
    DoubleFree {
        /// Address of the block.
        addr: usize,
        /// Size of the block in bytes.
        size: usize,
        /// Where it was allocated.
        location: &'static Location<'static>,
        /// Where it was released again.
        released_at: &'static Location<'static>,
    },
    /// The guard word before the block was overwritten.
    Underrun {
        /// Address of the block.
        addr: usize,
        /// Size of the block in bytes.
        size: usize,
        /// Where the block was allocated.
        location: &'static Location<'static>,
    },
    /// The guard word after the block was overwritten.
    Overrun {
        /// Address of the block.
        addr: usize,
        /// Size of the block in bytes.
        size: usize,
        /// Where the block was allocated.
        location: &'static Location<'static>,
    },
    /// A tracked handle that was never closed.
    UnclosedHandle {
        /// Identifier of the handle.
        id: HandleId,
        /// Where it was opened.
        location: &'static Location<'static>,
    },
}

impl Finding {
    /// Findings for one record, in leak / double free / underrun / overrun order.
    pub(crate) fn from_record(record: &AllocationRecord) -> Vec<Finding> {
        let mut findings = Vec::new();

        if record.is_live() {
            findings.push(Finding::Leak {
                addr: record.addr,
                size: record.size,
                location: record.location,
            });
        }

        if let Some(released_at) = record.double_free {
            findings.push(Finding::DoubleFree {
                addr: record.addr,
                size: record.size,
                location: record.location,
                released_at,
            });
        }

        if record.underrun {
            findings.push(Finding::Underrun {
                addr: record.addr,
                size: record.size,
                location: record.location,
            });
        }

        if record.overrun {
            findings.push(Finding::Overrun {
                addr: record.addr,
                size: record.size,
                location: record.location,
            });
        }

        findings
    }
}

/// Snapshot of a [`DebugAllocator`](crate::DebugAllocator)'s bookkeeping.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Successful tracked allocations.
    pub allocations: usize,
    /// Successful tracked releases.
    pub frees: usize,
    /// Bytes requested over the allocator's lifetime.
    pub total_bytes: usize,
    /// Releases of addresses this allocator never handed out.
    pub foreign_releases: usize,
    /// Tracked handles opened.
    pub handles_opened: usize,
    /// Tracked handles closed.
    pub handles_closed: usize,
    /// Problems found: block findings in allocation order, then unclosed
    /// handles in open order.
    pub findings: Vec<Finding>,
}

impl Report {
    /// No findings and no foreign releases.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.foreign_releases == 0
    }

    /// Number of leaked blocks.
    pub fn leaks(&self) -> usize {
        self.count(|f| matches!(f, Finding::Leak { .. }))
    }

    /// Number of blocks released more than once.
    pub fn double_frees(&self) -> usize {
        self.count(|f| matches!(f, Finding::DoubleFree { .. }))
    }

    /// Number of damaged guard words before blocks.
    pub fn underruns(&self) -> usize {
        self.count(|f| matches!(f, Finding::Underrun { .. }))
    }

    /// Number of damaged guard words after blocks.
    pub fn overruns(&self) -> usize {
        self.count(|f| matches!(f, Finding::Overrun { .. }))
    }

    /// Number of handles left open.
    pub fn unclosed_handles(&self) -> usize {
        self.count(|f| matches!(f, Finding::UnclosedHandle { .. }))
    }

    fn count(&self, pred: impl Fn(&Finding) -> bool) -> usize {
        self.findings.iter().filter(|f| pred(f)).count()
    }
}

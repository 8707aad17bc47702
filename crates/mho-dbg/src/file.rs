// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::ops::{Deref, DerefMut};
use std::panic::Location;
use std::path::Path;

use mho_alloc::RawAllocator;

use crate::debug_allocator::DebugAllocator;
use crate::handle::HandleId;

/// A [`File`] whose open and close are recorded by a [`DebugAllocator`].
///
/// Dropping the wrapper closes the file and marks the handle closed. A
/// wrapper passed to `mem::forget` shows up as
/// [`Finding::UnclosedHandle`](crate::Finding::UnclosedHandle).
pub struct TrackedFile<'a, A>
where
    A: RawAllocator,
{
    file: File,
    id: HandleId,
    closed: bool,
    dbg: &'a DebugAllocator<A>,
}

impl<A> DebugAllocator<A>
where
    A: RawAllocator,
{
    /// Opens `path` with `options` and tracks the handle.
    ///
    /// # Errors
    ///
    /// Any error from [`OpenOptions::open`], or
    /// [`io::ErrorKind::OutOfMemory`] if the handle cannot be recorded (the
    /// file is closed again).
    #[track_caller]
    pub fn open_file<P>(&self, path: P, options: &OpenOptions) -> io::Result<TrackedFile<'_, A>>
    where
        P: AsRef<Path>,
    {
        let location = Location::caller();
        let file = options.open(path)?;
        let id = self
            .open_handle_at(location)
            .map_err(|_| io::Error::from(io::ErrorKind::OutOfMemory))?;

        Ok(TrackedFile {
            file,
            id,
            closed: false,
            dbg: self,
        })
    }
}

impl<A> TrackedFile<'_, A>
where
    A: RawAllocator,
{
    /// Handle identifier in the allocator's records.
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Closes the file, recording the caller as the close location.
    #[track_caller]
    pub fn close(mut self) {
        self.dbg.close_handle_at(self.id, Location::caller());
        self.closed = true;
    }
}

impl<A> Drop for TrackedFile<'_, A>
where
    A: RawAllocator,
{
    fn drop(&mut self) {
        if !self.closed {
            self.dbg.close_handle_at(self.id, Location::caller());
        }
    }
}

impl<A> Deref for TrackedFile<'_, A>
where
    A: RawAllocator,
{
    type Target = File;

    fn deref(&self) -> &File {
        &self.file
    }
}

impl<A> DerefMut for TrackedFile<'_, A>
where
    A: RawAllocator,
{
    fn deref_mut(&mut self) -> &mut File {
        &mut self.file
    }
}

impl<A> Read for TrackedFile<'_, A>
where
    A: RawAllocator,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl<A> Write for TrackedFile<'_, A>
where
    A: RawAllocator,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl<A> Seek for TrackedFile<'_, A>
where
    A: RawAllocator,
{
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl<A> core::fmt::Debug for TrackedFile<'_, A>
where
    A: RawAllocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackedFile")
            .field("id", &self.id)
            .field("file", &self.file)
            .finish()
    }
}

//! Pool of reusable byte buffers
//!
//! Every emitted line is assembled in a buffer checked out from a
//! [`BufferPool`]. The checkout is a [`PooledBuffer`] guard that owns the
//! buffer exclusively and hands it back, cleared, when dropped.

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

/// Initial capacity of a freshly allocated buffer.
pub const INITIAL_CAPACITY: usize = 512;

/// Upper bound on idle buffers kept by a pool.
pub const MAX_POOLED_BUFFERS: usize = 64;

/// Buffers that grew beyond this capacity are freed instead of pooled.
pub const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

static GLOBAL_POOL: BufferPool = BufferPool::new();

/// Concurrent free list of growable byte buffers.
///
/// Acquisition never fails: an empty pool allocates a fresh buffer. Idle
/// memory is bounded by [`MAX_POOLED_BUFFERS`] and [`MAX_RETAINED_CAPACITY`].
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
    allocated: AtomicU64,
    reused: AtomicU64,
    discarded: AtomicU64,
}

/// Snapshot of pool counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Buffers allocated because the pool was empty
    pub allocated: u64,
    /// Checkouts served from the free list
    pub reused: u64,
    /// Buffers freed on release because the pool was full or they were too large
    pub discarded: u64,
    /// Buffers currently idle in the pool
    pub idle: usize,
}

impl PoolStats {
    /// Total number of checkouts.
    pub fn acquired(&self) -> u64 {
        self.allocated + self.reused
    }
}

impl BufferPool {
    pub const fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            allocated: AtomicU64::new(0),
            reused: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// Process-wide pool shared by loggers that were not given their own.
    pub fn global() -> &'static BufferPool {
        &GLOBAL_POOL
    }

    /// Check out an empty buffer.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let recycled = self.free.lock().pop();
        let buf = match recycled {
            Some(buf) => {
                self.reused.fetch_add(1, Ordering::Relaxed);
                buf
            }
            None => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                Vec::with_capacity(INITIAL_CAPACITY)
            }
        };

        PooledBuffer {
            buf: Some(buf),
            pool: self,
        }
    }

    /// Return a buffer to the free list. Normally called by [`PooledBuffer`]'s drop.
    pub fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            return;
        }
        buf.clear();

        let mut free = self.free.lock();
        if free.len() < MAX_POOLED_BUFFERS {
            free.push(buf);
        } else {
            drop(free);
            self.discarded.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            allocated: self.allocated.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            idle: self.free.lock().len(),
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive checkout of a pooled buffer.
///
/// Dereferences to `Vec<u8>`. Dropping the guard returns the buffer.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    buf: Option<Vec<u8>>,
    pool: &'a BufferPool,
}

impl PooledBuffer<'_> {
    /// Detach the buffer from the pool; it will not be returned.
    pub fn into_inner(mut self) -> Vec<u8> {
        self.buf.take().unwrap_or_default()
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        // Only `into_inner` and `drop` take the buffer, and both consume the guard.
        self.buf.as_ref().expect("pooled buffer present until drop")
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        self.buf.as_mut().expect("pooled buffer present until drop")
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}

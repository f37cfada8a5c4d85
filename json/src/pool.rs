//! Reusable output buffers.
//!
//! # Size Classes
//!
//! Buffers are organized into power-of-two size classes from `min_size` to `max_size`. For
//! example, with `min_size = 256` and `max_size = 2048`:
//! - Class 0: 256 bytes
//! - Class 1: 512 bytes
//! - Class 2: 1024 bytes
//! - Class 3: 2048 bytes
//!
//! Requests are rounded up to the next class. Requests larger than `max_size` get an untracked
//! heap allocation that is freed on drop.
//!
//! # Pool Lifecycle
//!
//! [BufferPool] is `Send + Sync` and cheap to clone. Each [PooledBuffer] holds a weak reference
//! to its pool and returns itself there when dropped, so a buffer handed out by a pool that has
//! since been dropped is simply freed.

use crossbeam_queue::ArrayQueue;
use std::{
    ops::{Deref, DerefMut},
    sync::{Arc, Weak},
};
use tracing::trace;

/// Configuration for a [BufferPool].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferPoolConfig {
    /// Smallest buffer size. Must be a power of two.
    pub min_size: usize,
    /// Largest pooled buffer size. Must be a power of two and >= `min_size`.
    pub max_size: usize,
    /// Maximum number of idle buffers retained per size class.
    pub max_per_class: usize,
}

impl Default for BufferPoolConfig {
    fn default() -> Self {
        Self {
            min_size: 256,
            max_size: 1 << 20,
            max_per_class: 32,
        }
    }
}

impl BufferPoolConfig {
    /// Validates the configuration, panicking on invalid values.
    ///
    /// # Panics
    ///
    /// - `min_size` is not a power of two
    /// - `max_size` is not a power of two
    /// - `max_size < min_size`
    /// - `max_per_class` is zero
    fn validate(&self) {
        assert!(
            self.min_size.is_power_of_two(),
            "min_size must be a power of two"
        );
        assert!(
            self.max_size.is_power_of_two(),
            "max_size must be a power of two"
        );
        assert!(
            self.max_size >= self.min_size,
            "max_size must be >= min_size"
        );
        assert!(self.max_per_class > 0, "max_per_class must be non-zero");
    }

    /// Returns the number of size classes.
    fn num_classes(&self) -> usize {
        if self.max_size < self.min_size {
            return 0;
        }
        // Classes are: min_size, min_size*2, min_size*4, ..., max_size
        (self.max_size / self.min_size).trailing_zeros() as usize + 1
    }

    /// Returns the size class index for a given size.
    /// Returns None if size > max_size.
    fn class_index(&self, size: usize) -> Option<usize> {
        if size > self.max_size {
            return None;
        }
        if size <= self.min_size {
            return Some(0);
        }
        let size_class = size.next_power_of_two();
        let index = (size_class / self.min_size).trailing_zeros() as usize;
        if index < self.num_classes() {
            Some(index)
        } else {
            None
        }
    }

    /// Returns the buffer size for a given class index.
    const fn class_size(&self, index: usize) -> usize {
        self.min_size << index
    }
}

struct Inner {
    config: BufferPoolConfig,
    /// Idle buffers per size class, each cleared and with at least the class capacity.
    classes: Vec<ArrayQueue<Vec<u8>>>,
}

impl Inner {
    fn release(&self, class: usize, mut buffer: Vec<u8>) {
        let size = self.config.class_size(class);
        if buffer.capacity() < size {
            return;
        }
        buffer.clear();
        if self.classes[class].push(buffer).is_err() {
            trace!(size, "size class full, discarding buffer");
        }
    }
}

/// A pool of reusable byte buffers keyed by power-of-two size class.
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.inner.config)
            .field("num_classes", &self.inner.classes.len())
            .finish()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(BufferPoolConfig::default())
    }
}

impl BufferPool {
    /// Creates a new buffer pool with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn new(config: BufferPoolConfig) -> Self {
        config.validate();
        let classes = (0..config.num_classes())
            .map(|_| ArrayQueue::new(config.max_per_class))
            .collect();
        Self {
            inner: Arc::new(Inner { config, classes }),
        }
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &BufferPoolConfig {
        &self.inner.config
    }

    /// Returns an empty buffer with `capacity() >= capacity`.
    ///
    /// An idle buffer of the matching class is reused when one is available. Requests larger
    /// than `max_size` fall back to an untracked allocation.
    pub fn acquire(&self, capacity: usize) -> PooledBuffer {
        let Some(class) = self.inner.config.class_index(capacity) else {
            trace!(capacity, "oversized request, allocating untracked buffer");
            return PooledBuffer::unpooled(capacity);
        };
        let buf = self.inner.classes[class]
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(self.inner.config.class_size(class)));
        PooledBuffer {
            buf,
            class: Some(class),
            pool: Arc::downgrade(&self.inner),
        }
    }

    /// Number of idle buffers currently held across all size classes.
    pub fn idle(&self) -> usize {
        self.inner.classes.iter().map(ArrayQueue::len).sum()
    }
}

/// A byte buffer that returns to its [BufferPool] when dropped.
pub struct PooledBuffer {
    buf: Vec<u8>,
    class: Option<usize>,
    pool: Weak<Inner>,
}

impl std::fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.buf.len())
            .field("capacity", &self.buf.capacity())
            .field("class", &self.class)
            .finish()
    }
}

impl PooledBuffer {
    /// A buffer that belongs to no pool and is freed on drop.
    pub fn unpooled(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            class: None,
            pool: Weak::new(),
        }
    }

    /// Returns `true` if this buffer will be returned to a live pool when dropped.
    pub fn is_pooled(&self) -> bool {
        self.class.is_some() && self.pool.strong_count() > 0
    }
}

impl Deref for PooledBuffer {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        let (Some(class), Some(pool)) = (self.class, self.pool.upgrade()) else {
            return;
        };
        pool.release(class, std::mem::take(&mut self.buf));
    }
}

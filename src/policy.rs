//! Buffer growth policies.
//!
//! When a record does not fit into the parser's buffer, the reader asks its
//! [`BufPolicy`](BufPolicy) for the next buffer size. The default,
//! [`StdPolicy`](StdPolicy), doubles the buffer up to 32 MiB, continues in
//! 32 MiB steps afterwards, and refuses to go beyond 1 GiB; refusal is
//! reported by the reader as `ErrorKind::BufferLimit`.
//!
//! # Choosing a different policy
//!
//! ```no_run
//! use fq_io::fastq::Reader;
//! use fq_io::policy::DoubleUntil;
//! use std::io::stdin;
//!
//! // double up to 16 MiB, then grow linearly, without any size cap
//! let policy = DoubleUntil(16 * 1024 * 1024);
//! let mut reader = Reader::with_cap_and_policy(stdin(), 8192, policy);
//! // (...)
//! ```
//!
//! # Custom policies
//!
//! A policy is a single method deciding the next buffer size, with `None`
//! meaning the buffer may not grow any further:
//!
//! ```
//! use fq_io::policy::BufPolicy;
//!
//! /// Doubles every time, but never exceeds 1 GiB.
//! struct DoublingMax1G;
//!
//! impl BufPolicy for DoublingMax1G {
//!     fn next_size(&mut self, current: usize) -> Option<usize> {
//!         Some(current * 2).filter(|size| *size <= 1 << 30)
//!     }
//! }
//! ```

const MIB: usize = 1 << 20;

// Thresholds of the standard policy.
const STD_DOUBLE_UNTIL: usize = 32 * MIB;
const STD_LIMIT: usize = 1024 * MIB;

/// Decides how the parse buffer grows when a record does not fit.
pub trait BufPolicy {
    /// Given the current buffer size in bytes, returns the size the buffer
    /// should grow to. `None` means the policy does not allow the buffer to
    /// grow any further; the reader then fails with
    /// `ErrorKind::BufferLimit`.
    fn next_size(&mut self, current: usize) -> Option<usize>;
}

// Doubles below the threshold, then continues in threshold-sized steps.
#[inline]
fn step(current: usize, threshold: usize) -> usize {
    current.saturating_add(current.min(threshold))
}

/// The standard policy: buffer size doubles until it reaches 32 MiB, then
/// increases in steps of 32 MiB up to a hard cap of 1 GiB.
pub struct StdPolicy;

impl BufPolicy for StdPolicy {
    fn next_size(&mut self, current: usize) -> Option<usize> {
        Some(step(current, STD_DOUBLE_UNTIL)).filter(|size| *size <= STD_LIMIT)
    }
}

/// Buffer size doubles until it reaches the given size in bytes, then
/// increases linearly in steps of that size. There is no cap, so the buffer
/// could theoretically grow indefinitely.
pub struct DoubleUntil(pub usize);

impl BufPolicy for DoubleUntil {
    fn next_size(&mut self, current: usize) -> Option<usize> {
        Some(step(current, self.0))
    }
}

/// Like [`DoubleUntil`](DoubleUntil), but additionally refuses to grow the
/// buffer beyond `limit` bytes.
pub struct DoubleUntilLimited {
    double_until: usize,
    limit: usize,
}

impl DoubleUntilLimited {
    pub fn new(double_until: usize, limit: usize) -> Self {
        DoubleUntilLimited {
            double_until,
            limit,
        }
    }
}

impl BufPolicy for DoubleUntilLimited {
    fn next_size(&mut self, current: usize) -> Option<usize> {
        Some(step(current, self.double_until)).filter(|size| *size <= self.limit)
    }
}

//! Recoverable error kinds surfaced to callers.
//!
//! Programming errors (double reserve/release, unknown pid, ring
//! corruption) are deliberately *not* members of this enum: they are bugs
//! in the harness, not input for it to handle, and fail fast via `panic!`
//! at the point of detection instead (see the module docs on
//! [`crate::frame`] and [`crate::process`]).

use thiserror::Error;

/// Recoverable failures the public API can report instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PagerError {
    /// `extend` found the block pool empty.
    #[error("block pool exhausted")]
    PoolExhausted,

    /// `syslog` was asked to read outside the process's extended range.
    #[error("syslog range out of bounds")]
    BadRange,

    /// `syslog` addressed a page that is not currently resident.
    ///
    /// This implementation deliberately does not fault pages in on
    /// `syslog`'s behalf; a non-resident page in the requested range is
    /// reported this way instead.
    #[error("page is not resident")]
    NotResident,
}

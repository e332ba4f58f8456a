//! Page protection flags.

use bitflags::bitflags;

bitflags! {
    /// Page protection, matching the host platform's read/write vocabulary.
    ///
    /// `NONE` doubles as the clock algorithm's "not recently used" marker
    /// (see [`crate::ring`]): a resident page with `NONE` protection has had
    /// its reference bit cleared by a sweep and is the next eviction
    /// candidate, not a page the owning process can actually access without
    /// first taking a fault.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Prot: u8 {
        const READ = 0b01;
        const WRITE = 0b10;
    }
}

impl Default for Prot {
    fn default() -> Self {
        Prot::empty()
    }
}

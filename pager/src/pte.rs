//! The page-table entry itself.
//!
//! A [`Pte`] is created on a page's first fault and lives until its
//! owning process is destroyed; eviction only toggles `in_mem`, it never
//! removes the entry. Storage and ring linkage live in [`crate::ring`] —
//! this module only describes the record.

use crate::{block::BlockId, frame::FrameId, process::Pid, prot::Prot};

/// Identifies one PTE within the arena owned by [`crate::ring::Ring`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PteId(pub(crate) usize);

/// A page-table entry.
///
/// `page_number`, `pid`, and `disk_block` never change after creation;
/// `frame`, `prot`, `in_mem`, and `dirty` are mutated by fault resolution
/// and eviction.
#[derive(Debug, Clone)]
pub struct Pte {
    pub pid: Pid,
    pub page_number: usize,
    pub disk_block: BlockId,
    pub frame: FrameId,
    pub prot: Prot,
    pub in_mem: bool,
    pub dirty: bool,
}

impl Pte {
    pub(crate) fn new(pid: Pid, page_number: usize, disk_block: BlockId, frame: FrameId) -> Self {
        Self {
            pid,
            page_number,
            disk_block,
            frame,
            prot: Prot::READ,
            in_mem: true,
            dirty: false,
        }
    }
}

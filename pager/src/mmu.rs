//! The MMU facade: the one seam the pager talks across.
//!
//! An `Mmu` implementation is an external collaborator — typically a
//! simulator, such as `pager_sim::SimMmu` — that tracks which physical
//! frame backs which `(pid, vaddr)` mapping and owns the byte-addressable
//! `pmem[]` array. The pager never inspects `pmem[]` directly except
//! through [`Mmu::pmem_read`], used by the syslog reader.
//!
//! Every method takes `&self`, not `&mut self`: callers already hold the
//! ring lock before invoking any of these, so the trait itself does
//! not need to serialize access. An implementation backed by shared,
//! mutable state should use its own interior mutability (a lock, a cell,
//! a channel to a real emulator) to honor that contract.
use crate::{block::BlockId, frame::FrameId, process::Pid, prot::Prot, addr::VirtAddr};

/// The external MMU collaborator's interface.
pub trait Mmu: Send + Sync {
    /// Zero-fills the given frame's contents in `pmem[]`.
    fn zero_fill(&self, frame: FrameId);

    /// Installs a resident mapping for `pid`'s `vaddr` at `frame` with
    /// protection `prot`.
    fn resident(&self, pid: Pid, vaddr: VirtAddr, frame: FrameId, prot: Prot);

    /// Tears down the resident mapping for `pid`'s `vaddr` (the page
    /// remains owned by `pid`, it is simply no longer backed by a frame).
    fn nonresident(&self, pid: Pid, vaddr: VirtAddr);

    /// Changes the protection of an existing resident mapping without
    /// changing its frame.
    fn chprot(&self, pid: Pid, vaddr: VirtAddr, prot: Prot);

    /// Reads `block`'s contents from the backing store into `frame`.
    fn disk_read(&self, block: BlockId, frame: FrameId);

    /// Writes `frame`'s contents to `block` in the backing store.
    fn disk_write(&self, frame: FrameId, block: BlockId);

    /// Copies `len` bytes out of `pmem[]` starting at `frame`'s `offset`.
    ///
    /// Used exclusively by the syslog reader, which never needs to
    /// mutate `pmem[]` — only the six methods above do.
    fn pmem_read(&self, frame: FrameId, offset: usize, len: usize) -> Vec<u8>;
}

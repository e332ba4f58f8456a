//! A reference [`Mmu`] implementation: an in-process simulator backed by a
//! flat `pmem[]` buffer and a log of every call it receives.
//!
//! Real MMU hardware does not exist here; this stands in for it so the
//! pager library is runnable and testable end to end.

use pager::{BlockId, FrameId, Mmu, Pid, Prot, VirtAddr, PAGE_SIZE};
use std::sync::Mutex;

/// One call the pager issued against the simulated MMU, kept for the
/// harness to print and for tests to assert against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MmuCall {
    ZeroFill { frame: FrameId },
    Resident { pid: Pid, vaddr: VirtAddr, frame: FrameId, prot: Prot },
    NonResident { pid: Pid, vaddr: VirtAddr },
    Chprot { pid: Pid, vaddr: VirtAddr, prot: Prot },
    DiskRead { block: BlockId, frame: FrameId },
    DiskWrite { frame: FrameId, block: BlockId },
}

/// Owns the byte-addressable physical memory array and the backing store,
/// both sized in pages at construction.
pub struct SimMmu {
    pmem: Mutex<Vec<u8>>,
    disk: Mutex<Vec<u8>>,
    calls: Mutex<Vec<MmuCall>>,
}

impl SimMmu {
    #[must_use]
    pub fn new(nframes: usize, nblocks: usize) -> Self {
        Self {
            pmem: Mutex::new(vec![0; nframes * PAGE_SIZE]),
            disk: Mutex::new(vec![0; nblocks * PAGE_SIZE]),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Directly writes a byte into `pmem[]`, bypassing the pager. Used by
    /// the harness to exercise the round-trip write/evict/read-back
    /// property without needing a write-fault code path of its own.
    pub fn poke(&self, frame: FrameId, offset: usize, value: u8) {
        self.pmem.lock().unwrap()[frame.pmem_offset() + offset] = value;
    }

    /// Drains and returns every call recorded so far, in order.
    pub fn take_calls(&self) -> Vec<MmuCall> {
        std::mem::take(&mut self.calls.lock().unwrap())
    }

    fn record(&self, call: MmuCall) {
        log::trace!("mmu: {call:?}");
        self.calls.lock().unwrap().push(call);
    }
}

impl Mmu for SimMmu {
    fn zero_fill(&self, frame: FrameId) {
        let mut pmem = self.pmem.lock().unwrap();
        let start = frame.pmem_offset();
        pmem[start..start + PAGE_SIZE].fill(0);
        drop(pmem);
        self.record(MmuCall::ZeroFill { frame });
    }

    fn resident(&self, pid: Pid, vaddr: VirtAddr, frame: FrameId, prot: Prot) {
        self.record(MmuCall::Resident { pid, vaddr, frame, prot });
    }

    fn nonresident(&self, pid: Pid, vaddr: VirtAddr) {
        self.record(MmuCall::NonResident { pid, vaddr });
    }

    fn chprot(&self, pid: Pid, vaddr: VirtAddr, prot: Prot) {
        self.record(MmuCall::Chprot { pid, vaddr, prot });
    }

    fn disk_read(&self, block: BlockId, frame: FrameId) {
        let disk = self.disk.lock().unwrap();
        let mut pmem = self.pmem.lock().unwrap();
        let src = block.pmem_offset_on_disk();
        let dst = frame.pmem_offset();
        pmem[dst..dst + PAGE_SIZE].copy_from_slice(&disk[src..src + PAGE_SIZE]);
        drop(disk);
        drop(pmem);
        self.record(MmuCall::DiskRead { block, frame });
    }

    fn disk_write(&self, frame: FrameId, block: BlockId) {
        let pmem = self.pmem.lock().unwrap();
        let mut disk = self.disk.lock().unwrap();
        let src = frame.pmem_offset();
        let dst = block.pmem_offset_on_disk();
        disk[dst..dst + PAGE_SIZE].copy_from_slice(&pmem[src..src + PAGE_SIZE]);
        drop(pmem);
        drop(disk);
        self.record(MmuCall::DiskWrite { frame, block });
    }

    fn pmem_read(&self, frame: FrameId, offset: usize, len: usize) -> Vec<u8> {
        let pmem = self.pmem.lock().unwrap();
        let start = frame.pmem_offset() + offset;
        pmem[start..start + len].to_vec()
    }
}

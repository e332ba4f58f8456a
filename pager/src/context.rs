//! The pager's public entry points, tying the four tables together
//! behind a strict lock-acquisition order.
//!
//! [`Pager`] owns the four mutexes directly as fields, in the order they
//! must be acquired: `registry`, then `ring`, then `frames`, then `blocks`.
//! Every method below acquires only the prefix of that chain it
//! actually needs and releases guards in the reverse order they were
//! taken, simply by letting them go out of scope in declaration order.

use crate::{
    addr::VirtAddr,
    block::BlockPool,
    error::PagerError,
    fault,
    frame::FramePool,
    mmu::Mmu,
    process::{Pid, Registry},
    ring::Ring,
    syslog,
};
use std::io::Write;
use std::sync::Mutex;

/// The pager's full state: the process registry, the page-table ring, and
/// the two fixed-size resource pools, each behind its own mutex.
///
/// Field declaration order is load-bearing: it documents the only
/// permitted lock-acquisition order. Do not reorder these fields, and
/// do not acquire `ring` before `registry` is already held if a call needs
/// both.
pub struct Pager {
    registry: Mutex<Registry>,
    ring: Mutex<Ring>,
    frames: Mutex<FramePool>,
    blocks: Mutex<BlockPool>,
}

impl Pager {
    /// Establishes empty pools and an empty registry (`pager_init`).
    ///
    /// Must be called once, before any other method, and before any
    /// worker thread is given access to the returned `Pager`.
    #[must_use]
    pub fn new(nframes: usize, nblocks: usize) -> Self {
        log::info!("pager init: {nframes} frames, {nblocks} blocks");
        Self {
            registry: Mutex::new(Registry::new()),
            ring: Mutex::new(Ring::new()),
            frames: Mutex::new(FramePool::new(nframes)),
            blocks: Mutex::new(BlockPool::new(nblocks)),
        }
    }

    /// Registers a new, empty process (`pager_create`).
    ///
    /// # Panics
    /// Panics if `pid` is already registered.
    pub fn create(&self, pid: Pid) {
        self.registry
            .lock()
            .expect("pager mutex poisoned by a prior panic")
            .create(pid);
        log::info!("{pid}: created");
    }

    /// Reserves one more page for `pid`, returning its virtual address, or
    /// `None` if the block pool is exhausted (`pager_extend`).
    ///
    /// # Panics
    /// Panics if `pid` is not registered.
    #[must_use]
    pub fn extend(&self, pid: Pid) -> Option<VirtAddr> {
        let mut registry = self.registry.lock().expect("pager mutex poisoned by a prior panic");
        let mut blocks = self.blocks.lock().expect("pager mutex poisoned by a prior panic");

        let block = match blocks.reserve() {
            Some(block) => block,
            None => {
                log::info!("{pid}: extend failed, block pool exhausted");
                return None;
            }
        };
        let page_number = registry.extend(pid, block);
        let vaddr = VirtAddr::of_page(page_number);
        log::debug!("{pid}: extended to page {page_number} ({vaddr}), block {block}");
        Some(vaddr)
    }

    /// Resolves one page fault at `vaddr` in `pid`'s address space.
    ///
    /// # Panics
    /// Panics if `pid` is unregistered or `vaddr` is outside `pid`'s
    /// currently extended pages — both are fatal harness bugs.
    pub fn fault(&self, mmu: &dyn Mmu, pid: Pid, vaddr: VirtAddr) {
        let mut registry = self.registry.lock().expect("pager mutex poisoned by a prior panic");
        let mut ring = self.ring.lock().expect("pager mutex poisoned by a prior panic");
        let mut frames = self.frames.lock().expect("pager mutex poisoned by a prior panic");
        fault::resolve(&mut registry, &mut ring, &mut frames, mmu, pid, vaddr);
    }

    /// Reads `len` bytes of `pid`'s memory starting at `vaddr`, writing
    /// them as hex to `out`.
    ///
    /// # Errors
    /// See [`syslog::read`] for the exact error conditions.
    pub fn syslog(
        &self,
        mmu: &dyn Mmu,
        pid: Pid,
        vaddr: VirtAddr,
        len: usize,
        out: &mut dyn Write,
    ) -> Result<(), PagerError> {
        let registry = self.registry.lock().expect("pager mutex poisoned by a prior panic");
        let ring = self.ring.lock().expect("pager mutex poisoned by a prior panic");
        syslog::read(&registry, &ring, mmu, pid, vaddr, len, out)
    }

    /// Tears down `pid`, releasing every frame and block it owns and
    /// unlinking its PTEs from the ring.
    ///
    /// Acquires the full lock chain (`registry`, `ring`, `frames`,
    /// `blocks`) since destroy is the one operation that touches all four
    /// tables.
    ///
    /// # Panics
    /// Panics if `pid` is not registered.
    pub fn destroy(&self, mmu: &dyn Mmu, pid: Pid) {
        let mut registry = self.registry.lock().expect("pager mutex poisoned by a prior panic");
        let mut ring = self.ring.lock().expect("pager mutex poisoned by a prior panic");
        let mut frames = self.frames.lock().expect("pager mutex poisoned by a prior panic");
        let mut blocks = self.blocks.lock().expect("pager mutex poisoned by a prior panic");

        let process = registry.remove(pid);
        for (page_number, page) in process.pages.into_iter().enumerate() {
            if let Some(pte_id) = page.pte {
                let pte = ring.remove(pte_id);
                if pte.in_mem {
                    frames.release(pte.frame);
                    mmu.nonresident(pid, VirtAddr::of_page(page_number));
                }
            }
            blocks.release(page.disk_block);
        }
        log::debug!("{pid}: destroyed");
    }
}

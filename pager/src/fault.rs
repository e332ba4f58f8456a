//! The fault resolution state machine.
//!
//! `resolve` is the only entry point; it is free functions rather than
//! methods on [`crate::Pager`] because it operates on already-locked
//! guards (the caller in `lib.rs` is the one that acquires `registry`,
//! `ring`, and `frames` in the required lock order).

use crate::{
    addr::VirtAddr,
    frame::FramePool,
    mmu::Mmu,
    process::{Pid, Registry},
    prot::Prot,
    pte::Pte,
    ring::Ring,
};

/// Resolves one page fault via a three-way (plus no-op) dispatch.
///
/// Only the `registry`, `ring`, and `frames` locks are needed here:
/// eviction never touches the block pool, because every resident page
/// already owns a block from the `extend` call that created it.
///
/// # Panics
/// Panics if `pid` is unregistered or `vaddr` does not correspond to one
/// of `pid`'s currently extended pages — both are fatal harness bugs,
/// not recoverable conditions.
pub(crate) fn resolve(
    registry: &mut Registry,
    ring: &mut Ring,
    frames: &mut FramePool,
    mmu: &dyn Mmu,
    pid: Pid,
    vaddr: VirtAddr,
) {
    let (page_number, _offset) = vaddr.page_and_offset();
    let process = registry.lookup_mut(pid);
    let page = process.pages.get_mut(page_number).unwrap_or_else(|| {
        log::error!("{pid} has no page {page_number} (fault at {vaddr})");
        panic!("{pid} has no page {page_number} (fault at {vaddr})")
    });

    if !page.zero_filled {
        // A. First touch.
        let frame = frames.reserve().unwrap_or_else(|| evict(ring, mmu));
        let pte = Pte::new(pid, page_number, page.disk_block, frame);
        page.pte = Some(ring.insert(pte));
        page.zero_filled = true;
        log::debug!("{pid}: zero-fill page {page_number} into {frame}");

        mmu.zero_fill(frame);
        mmu.resident(pid, vaddr, frame, Prot::READ);
        return;
    }

    let pte_id = page.pte.unwrap_or_else(|| {
        log::error!("{pid}: page {page_number} is zero-filled but has no PTE");
        panic!("zero_filled page must already have a PTE")
    });

    if ring.get(pte_id).in_mem {
        let prot = ring.get(pte_id).prot;
        if prot == Prot::empty() || prot == Prot::READ {
            // B. Resident write fault (or second-chance reference reuse).
            let pte = ring.get_mut(pte_id);
            pte.prot = Prot::READ | Prot::WRITE;
            pte.dirty = true;
            log::debug!("{pid}: write-upgrade page {page_number}");
            mmu.chprot(pid, vaddr, Prot::READ | Prot::WRITE);
        }
        // D. Already resident with sufficient protection: no-op.
        return;
    }

    // C. Swap-in.
    let frame = frames.reserve().unwrap_or_else(|| evict(ring, mmu));
    let dirty = ring.get(pte_id).dirty;
    let disk_block = ring.get(pte_id).disk_block;
    if dirty {
        mmu.disk_read(disk_block, frame);
    } else {
        mmu.zero_fill(frame);
    }
    let pte = ring.get_mut(pte_id);
    pte.frame = frame;
    pte.in_mem = true;
    pte.prot = Prot::READ;
    log::debug!("{pid}: swap-in page {page_number} into {frame} (dirty={dirty})");

    mmu.resident(pid, vaddr, frame, Prot::READ);
}

/// Frees one frame by evicting the clock algorithm's chosen victim.
///
/// # Panics
/// Panics (via [`crate::ring::Ring::victim`]) if the ring has no
/// in-memory entry to evict, which cannot happen given this function is
/// only called when the frame pool is exhausted.
pub(crate) fn evict(ring: &mut Ring, mmu: &dyn Mmu) -> crate::frame::FrameId {
    let victim_id = ring.victim(mmu);
    let victim = ring.get(victim_id);
    let frame = victim.frame;
    let (pid, page_number, dirty, disk_block) =
        (victim.pid, victim.page_number, victim.dirty, victim.disk_block);

    if dirty {
        mmu.disk_write(frame, disk_block);
    }
    mmu.nonresident(pid, VirtAddr::of_page(page_number));
    ring.get_mut(victim_id).in_mem = false;
    log::debug!("{pid}: evicted page {page_number} from {frame} (dirty={dirty})");
    frame
}

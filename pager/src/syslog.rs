//! The syslog reader: a safe, cross-page snapshot read of a process's
//! virtual memory, emitted as hex.

use crate::{
    addr::{VirtAddr, PAGE_SIZE},
    error::PagerError,
    mmu::Mmu,
    process::{Pid, Registry},
    ring::Ring,
};
use std::io::Write;

/// Copies `len` bytes starting at `vaddr` out of `pid`'s virtual memory
/// and writes them as lowercase hex (two nibbles per byte, no separator,
/// trailing newline) to `out`.
///
/// Both `registry` and `ring` are held for the whole call so the read is
/// a consistent snapshot: no concurrent eviction can move a frame out
/// from under this read.
///
/// Non-resident pages are not faulted in on the caller's behalf: if any
/// byte in the requested range lands on a page that is not currently
/// resident, the whole call fails with [`PagerError::NotResident`] and
/// nothing is written to `out`.
///
/// # Errors
/// - [`PagerError::BadRange`] if the process has no pages, `vaddr` is
///   below `BASE`, or the requested range extends past the process's
///   currently extended pages.
/// - [`PagerError::NotResident`] if any byte in range is on a
///   non-resident (or never-faulted) page.
pub(crate) fn read(
    registry: &Registry,
    ring: &Ring,
    mmu: &dyn Mmu,
    pid: Pid,
    vaddr: VirtAddr,
    len: usize,
    out: &mut dyn Write,
) -> Result<(), PagerError> {
    let process = registry.get(pid).ok_or(PagerError::BadRange)?;
    if process.pages.is_empty() {
        return Err(PagerError::BadRange);
    }

    let end = vaddr.checked_add(len as u64).ok_or(PagerError::BadRange)?;
    let region_end = crate::addr::BASE + (PAGE_SIZE as u64) * process.n_pages() as u64;
    if vaddr.as_u64() < crate::addr::BASE || end.as_u64() > region_end {
        return Err(PagerError::BadRange);
    }

    let mut bytes = Vec::with_capacity(len);
    let mut remaining = len;
    let mut cursor = vaddr;
    while remaining > 0 {
        let (page_number, offset) = cursor.page_and_offset();
        let page = &process.pages[page_number];
        let pte_id = page.pte.ok_or(PagerError::NotResident)?;
        let pte = ring.get(pte_id);
        if !pte.in_mem {
            return Err(PagerError::NotResident);
        }

        let chunk = (PAGE_SIZE - offset).min(remaining);
        bytes.extend_from_slice(&mmu.pmem_read(pte.frame, offset, chunk));
        remaining -= chunk;
        cursor = cursor.checked_add(chunk as u64).expect("range already validated");
    }

    let mut hex = String::with_capacity(bytes.len() * 2 + 1);
    for byte in bytes {
        use std::fmt::Write as _;
        write!(hex, "{byte:02x}").expect("writing into a String cannot fail");
    }
    hex.push('\n');
    out.write_all(hex.as_bytes())
        .expect("syslog output sink rejected a write");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{block::BlockId, frame::FrameId};

    struct NullMmu;
    impl Mmu for NullMmu {
        fn zero_fill(&self, _frame: FrameId) {}
        fn resident(&self, _pid: Pid, _vaddr: VirtAddr, _frame: FrameId, _prot: crate::prot::Prot) {}
        fn nonresident(&self, _pid: Pid, _vaddr: VirtAddr) {}
        fn chprot(&self, _pid: Pid, _vaddr: VirtAddr, _prot: crate::prot::Prot) {}
        fn disk_read(&self, _block: BlockId, _frame: FrameId) {}
        fn disk_write(&self, _frame: FrameId, _block: BlockId) {}
        fn pmem_read(&self, _frame: FrameId, _offset: usize, len: usize) -> Vec<u8> {
            vec![0xAB; len]
        }
    }

    #[test]
    fn bad_range_below_base() {
        let mut registry = Registry::new();
        registry.create(Pid(1));
        registry.extend(Pid(1), BlockId(0));
        let ring = Ring::new();
        let mut out = Vec::new();
        let err = read(
            &registry,
            &ring,
            &NullMmu,
            Pid(1),
            VirtAddr::new(crate::addr::BASE - 1),
            4,
            &mut out,
        );
        assert_eq!(err, Err(PagerError::BadRange));
    }

    #[test]
    fn bad_range_no_pages() {
        let mut registry = Registry::new();
        registry.create(Pid(1));
        let ring = Ring::new();
        let mut out = Vec::new();
        let err = read(&registry, &ring, &NullMmu, Pid(1), VirtAddr::of_page(0), 1, &mut out);
        assert_eq!(err, Err(PagerError::BadRange));
    }

    #[test]
    fn not_resident_before_first_fault() {
        let mut registry = Registry::new();
        registry.create(Pid(1));
        registry.extend(Pid(1), BlockId(0));
        let ring = Ring::new();
        let mut out = Vec::new();
        let err = read(&registry, &ring, &NullMmu, Pid(1), VirtAddr::of_page(0), 1, &mut out);
        assert_eq!(err, Err(PagerError::NotResident));
    }
}

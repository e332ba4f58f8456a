//! Process registry and per-process page bookkeeping.

use crate::{block::BlockId, pte::PteId};
use std::collections::HashMap;
use std::fmt;

/// Identifies a hosted process. Opaque to the pager: the harness assigns
/// these however it likes, as long as they are unique among live processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid {}", self.0)
    }
}

/// One page of one process's address space.
///
/// `pte` is `None` until the page's first fault; it is only ever set
/// once a page has a backing PTE, and stays `Some` for the rest of the
/// page's life (eviction toggles the PTE's `in_mem` flag, it never
/// removes the PTE).
#[derive(Debug, Clone)]
pub struct Page {
    pub disk_block: BlockId,
    pub zero_filled: bool,
    pub pte: Option<PteId>,
}

impl Page {
    fn new(disk_block: BlockId) -> Self {
        Self {
            disk_block,
            zero_filled: false,
            pte: None,
        }
    }
}

/// A registered process: its pid and its pages in extend order.
///
/// Page number `k` is `pages[k]`; this is why pages are never reordered
/// or removed individually.
#[derive(Debug)]
pub struct Process {
    pub pid: Pid,
    pub pages: Vec<Page>,
}

impl Process {
    fn new(pid: Pid) -> Self {
        Self {
            pid,
            pages: Vec::new(),
        }
    }

    /// Number of pages currently extended for this process.
    #[must_use]
    pub fn n_pages(&self) -> usize {
        self.pages.len()
    }
}

/// Global registry mapping pid to process record.
#[derive(Debug, Default)]
pub struct Registry {
    processes: HashMap<Pid, Process>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new, empty process.
    ///
    /// # Panics
    /// Panics if `pid` is already registered: re-creating a live process
    /// is a logic error, not a recoverable condition.
    pub fn create(&mut self, pid: Pid) {
        if self.processes.contains_key(&pid) {
            log::error!("{pid} already exists, refusing to re-create");
            panic!("{pid} already exists");
        }
        self.processes.insert(pid, Process::new(pid));
    }

    /// Looks up a process record, leaving the decision of how to report a
    /// miss to the caller (unlike [`Registry::lookup`], which panics).
    #[must_use]
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(&pid)
    }

    /// Mutable variant of [`Registry::get`].
    #[must_use]
    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        self.processes.get_mut(&pid)
    }

    /// Looks up a process, panicking if it does not exist.
    ///
    /// # Panics
    /// Panics if `pid` has no registered process: the harness contract
    /// treats a fault or syslog call on an unknown pid as fatal.
    #[must_use]
    pub fn lookup(&self, pid: Pid) -> &Process {
        self.processes.get(&pid).unwrap_or_else(|| {
            log::error!("no such process: {pid}");
            panic!("no such process: {pid}")
        })
    }

    /// Mutable variant of [`Registry::lookup`].
    ///
    /// # Panics
    /// Panics if `pid` has no registered process.
    #[must_use]
    pub fn lookup_mut(&mut self, pid: Pid) -> &mut Process {
        self.processes.get_mut(&pid).unwrap_or_else(|| {
            log::error!("no such process: {pid}");
            panic!("no such process: {pid}")
        })
    }

    /// Unlinks and returns a process record for teardown.
    ///
    /// # Panics
    /// Panics if `pid` has no registered process.
    #[must_use]
    pub fn remove(&mut self, pid: Pid) -> Process {
        self.processes.remove(&pid).unwrap_or_else(|| {
            log::error!("no such process: {pid}");
            panic!("no such process: {pid}")
        })
    }

    /// Number of currently registered processes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Appends a freshly reserved page to `pid`'s address space.
    ///
    /// # Panics
    /// Panics if `pid` has no registered process.
    pub fn extend(&mut self, pid: Pid, disk_block: BlockId) -> usize {
        let process = self.lookup_mut(pid);
        process.pages.push(Page::new(disk_block));
        process.pages.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockId;

    #[test]
    #[should_panic(expected = "already exists")]
    fn double_create_panics() {
        let mut registry = Registry::new();
        registry.create(Pid(1));
        registry.create(Pid(1));
    }

    #[test]
    fn extend_appends_in_order() {
        let mut registry = Registry::new();
        registry.create(Pid(1));
        let i0 = registry.extend(Pid(1), BlockId(0));
        let i1 = registry.extend(Pid(1), BlockId(1));
        assert_eq!((i0, i1), (0, 1));
        assert_eq!(registry.lookup(Pid(1)).n_pages(), 2);
    }

    #[test]
    #[should_panic(expected = "no such process")]
    fn lookup_unknown_pid_panics() {
        let registry = Registry::new();
        registry.lookup(Pid(99));
    }
}

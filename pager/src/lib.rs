//! A user-space, demand-paged virtual memory manager.
//!
//! This crate is the pager half of a simulated MMU pairing: it owns the
//! page tables, the physical frame pool, and the backing-store block pool,
//! and resolves page faults reported by an external [`Mmu`] collaborator
//! (typically a simulator driving multiple worker threads concurrently).
//! It never touches `pmem[]` directly, and it never decides *when* a fault
//! happens — only how to resolve one once reported.
//!
//! The public surface is [`Pager`]; everything else is exposed for testing
//! and for harnesses that want to drive the pieces directly.

mod addr;
mod block;
mod context;
mod error;
mod fault;
mod frame;
mod mmu;
mod pool;
mod process;
mod prot;
mod pte;
mod ring;
mod syslog;

pub use addr::{VirtAddr, BASE, PAGE_SIZE};
pub use block::{BlockId, BlockPool};
pub use context::Pager;
pub use error::PagerError;
pub use frame::{FrameId, FramePool};
pub use mmu::Mmu;
pub use process::{Page, Pid, Process, Registry};
pub use prot::Prot;
pub use pte::{Pte, PteId};
pub use ring::Ring;

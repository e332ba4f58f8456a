//! Reference harness: drives the `pager` library against [`SimMmu`] from
//! several OS threads, matching the concurrency model the library assumes.

mod sim_mmu;

use clap::Parser;
use pager::{Pager, Pid};
use sim_mmu::SimMmu;
use std::sync::Arc;
use std::thread;

/// Multi-threaded demand paging harness.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Number of physical frames.
    #[arg(long, default_value_t = 4)]
    frames: usize,

    /// Number of backing-store blocks.
    #[arg(long, default_value_t = 8)]
    blocks: usize,

    /// Virtual base address (informational; the pager's own BASE constant
    /// governs actual addresses — this only gets echoed in the startup log).
    #[arg(long, default_value_t = pager::BASE)]
    base: u64,

    /// Canned scenario to run.
    #[arg(long, value_enum, default_value_t = Scenario::Basic)]
    scenario: Scenario,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Scenario {
    /// One process, two pages: first touch, write upgrade, syslog, destroy.
    Basic,
    /// Several processes faulting concurrently, sized to force eviction.
    Contention,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::info!(
        "starting pager-sim: frames={} blocks={} base={:#x} scenario={:?}",
        cli.frames,
        cli.blocks,
        cli.base,
        cli.scenario
    );

    let pager = Arc::new(Pager::new(cli.frames, cli.blocks));
    let mmu = Arc::new(SimMmu::new(cli.frames, cli.blocks));

    match cli.scenario {
        Scenario::Basic => run_basic(&pager, &mmu),
        Scenario::Contention => run_contention(&pager, &mmu, cli.frames, cli.blocks),
    }
}

fn run_basic(pager: &Pager, mmu: &SimMmu) {
    let pid = Pid(1);
    pager.create(pid);
    let v0 = pager.extend(pid).expect("block pool has room");
    let v1 = pager.extend(pid).expect("block pool has room");

    pager.fault(mmu, pid, v0);
    pager.fault(mmu, pid, v0); // write upgrade
    pager.fault(mmu, pid, v1);

    let mut out = Vec::new();
    pager
        .syslog(mmu, pid, v0, 16, &mut out)
        .expect("v0 is resident");
    log::info!("syslog(v0, 16) = {}", String::from_utf8_lossy(&out).trim_end());

    pager.destroy(mmu, pid);
}

fn run_contention(pager: &Arc<Pager>, mmu: &Arc<SimMmu>, nframes: usize, nblocks: usize) {
    let nworkers = 4;
    let pages_per_worker = (nblocks / nworkers).max(1);
    log::info!(
        "contention scenario: {nworkers} workers, {pages_per_worker} pages each, {nframes} frames"
    );

    let handles: Vec<_> = (1..=nworkers as u32)
        .map(|n| {
            let pager = Arc::clone(pager);
            let mmu = Arc::clone(mmu);
            thread::spawn(move || {
                let pid = Pid(n);
                pager.create(pid);
                let pages: Vec<_> = (0..pages_per_worker)
                    .filter_map(|_| pager.extend(pid))
                    .collect();
                for vaddr in &pages {
                    pager.fault(&*mmu, pid, *vaddr);
                }
                pager.destroy(&*mmu, pid);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
    log::info!("contention scenario complete");
}

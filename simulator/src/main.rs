mod report;
mod task_file_loader;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use vm::{
    frame_selector::RandomFrameSelector, loader::WorkloadError, Mmu, VmConfig, ACCESS_QUANTUM,
    FRAME_COUNT,
};

use crate::task_file_loader::TaskFileLoader;

#[derive(Parser)]
#[command(name = "simulator")]
#[command(about = "Paged memory simulator with a round-robin dispatcher and a TLB")]
struct Args {
    /// Task file: one process per line, `<executable> <offset> ...`
    #[arg(short, long, default_value = "tasks.txt")]
    tasks: PathBuf,

    /// Seed for frame selection (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of physical frames
    #[arg(long, default_value_t = FRAME_COUNT)]
    frames: usize,

    /// Accesses per dispatch turn
    #[arg(long, default_value_t = ACCESS_QUANTUM)]
    quantum: usize,

    /// Print turn and TLB totals after the statistics
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = VmConfig {
        frame_count: args.frames,
        quantum: args.quantum,
        ..VmConfig::default()
    };

    let selector = match args.seed {
        Some(seed) => {
            info!("main: using seed {}", seed);
            RandomFrameSelector::seeded(seed)
        }
        None => RandomFrameSelector::from_entropy(),
    };

    let mut mmu = Mmu::new(config, selector).context("invalid configuration")?;
    let mut loader = TaskFileLoader::new(&args.tasks);

    let rejections = match mmu.admit_from(&mut loader) {
        Ok(rejections) => rejections,
        Err(WorkloadError::Load(err)) => return Err(err),
        Err(WorkloadError::Admission(err)) => return Err(err.into()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for rejection in &rejections {
        report::write_rejection(&mut out, rejection)?;
    }

    report::write_page_tables(&mut out, &mmu.report())?;

    let summary = mmu.run().context("translation failed")?;

    report::write_statistics(&mut out, &mmu.report())?;

    if args.summary {
        report::write_summary(&mut out, &summary, mmu.tlb().len())?;
    }

    out.flush()?;

    Ok(())
}

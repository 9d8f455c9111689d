use std::io::{self, Write};

use vm::{dispatcher::RunSummary, ProcessReport, Rejection};

const SEPARATOR: &str = "---------------------------------------------";

pub fn write_rejection<W: Write>(out: &mut W, rejection: &Rejection) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "!!!Memory doesn't have enough space for process {}!!!", rejection.id)?;
    writeln!(out)
}

/// Tabela de páginas de cada processo, na ordem de admissão.
pub fn write_page_tables<W: Write>(out: &mut W, reports: &[ProcessReport]) -> io::Result<()> {
    for report in reports {
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "process {}'s page table:", report.id)?;
        writeln!(out)?;

        for (page, frame) in report.page_table.iter().enumerate() {
            writeln!(out, "page {} - frame {}", page, frame)?;
        }
    }

    Ok(())
}

pub fn write_statistics<W: Write>(out: &mut W, reports: &[ProcessReport]) -> io::Result<()> {
    writeln!(out, "{}", SEPARATOR)?;

    for report in reports {
        writeln!(
            out,
            "process name: {}, dispatch: {}, hit: {}, miss: {}",
            report.id, report.dispatch_count, report.hit_count, report.miss_count
        )?;
    }

    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary, tlb_entries: usize) -> io::Result<()> {
    writeln!(
        out,
        "turns: {}, accesses: {}, tlb entries: {}",
        summary.turns, summary.accesses, tlb_entries
    )
}

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::pipeline::CheckReport;

/// Wall time spent in each dictionary phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct Timings {
    pub load: Duration,
    pub check: Duration,
    pub size: Duration,
    pub unload: Duration,
}

impl Timings {
    pub fn total(&self) -> Duration {
        self.load + self.check + self.size + self.unload
    }
}

/// Runs `f` and returns its result with the time it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let started = Instant::now();
    let value = f();
    (value, started.elapsed())
}

pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\nMISSPELLED WORDS\n\n")
}

pub fn write_misspellings<W: Write>(out: &mut W, report: &CheckReport) -> io::Result<()> {
    for token in &report.misspelled {
        writeln!(out, "{}", token.lexeme)?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(
    out: &mut W,
    report: &CheckReport,
    dictionary_size: usize,
    timings: &Timings,
) -> io::Result<()> {
    writeln!(out, "\nWORDS MISSPELLED:     {}", report.misspelled.len())?;
    writeln!(out, "WORDS IN DICTIONARY:  {}", dictionary_size)?;
    writeln!(out, "WORDS IN TEXT:        {}", report.words)?;
    writeln!(out, "TIME IN load:         {:.2}", timings.load.as_secs_f64())?;
    writeln!(out, "TIME IN check:        {:.2}", timings.check.as_secs_f64())?;
    writeln!(out, "TIME IN size:         {:.2}", timings.size.as_secs_f64())?;
    writeln!(out, "TIME IN unload:       {:.2}", timings.unload.as_secs_f64())?;
    write!(
        out,
        "TIME IN TOTAL:        {:.2}\n\n",
        timings.total().as_secs_f64()
    )
}

//! Markdown rendering of benchmark comparisons
//!
//! Lines are written to the output as soon as they are produced. If rendering
//! fails halfway, everything written up to that point stays.

use std::fmt;
use std::io::Write;

use itertools::Itertools;

use crate::error::ReportError;
use crate::model::{CounterDiff, ModuleRecord, ScopeSummary, ToolDetails};
use crate::order::CounterOrder;

const TOTAL_SCOPE: &str = "total";

pub struct Renderer<'a, W: Write> {
    out: W,
    order: &'a CounterOrder,
    verbose: u8,
}

impl<'a, W: Write> Renderer<'a, W> {
    pub fn new(out: W, order: &'a CounterOrder) -> Self {
        Self {
            out,
            order,
            verbose: 0,
        }
    }

    pub fn verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, benches: &[ModuleRecord]) -> Result<(), ReportError> {
        writeln!(self.out, "# Benchmark Results")?;

        for bench in benches {
            if self.verbose > 0 {
                eprintln!(
                    "bench-summary: rendering {} ({} profile(s))",
                    bench.module_path,
                    bench.profiles.len()
                );
            }
            self.render_module(bench)?;
        }

        Ok(())
    }

    fn render_module(&mut self, bench: &ModuleRecord) -> Result<(), ReportError> {
        writeln!(self.out, "## `{}`", bench.module_path)?;

        for (n, profile) in bench.profiles.iter().enumerate() {
            let total = profile.total().ok_or_else(|| ReportError::MissingScope {
                module: bench.module_path.clone(),
                profile: n,
                scope: TOTAL_SCOPE.to_string(),
            })?;
            self.render_summary(total)?;
        }

        Ok(())
    }

    fn render_summary(&mut self, total: &ScopeSummary) -> Result<(), ReportError> {
        for (tool, details) in total.summary.iter().sorted_by_key(|(tool, _)| *tool) {
            self.render_tool(tool, details)?;
        }
        Ok(())
    }

    fn render_tool(&mut self, tool: &str, details: &ToolDetails) -> Result<(), ReportError> {
        writeln!(self.out, "### {tool}")?;
        writeln!(self.out, "| Counter | Diff | Factor |")?;
        writeln!(self.out, "| -- | --: | --: |")?;

        let order = self.order;
        for counter in order.counters_for(tool, details) {
            let diff = CounterDiff::lookup(details, tool, counter)?;
            let (diff_pct, factor) = diff.diffs.values(counter)?;
            writeln!(self.out, "{}", Row::new(counter, diff_pct, factor))?;
        }

        Ok(())
    }
}

/// One table row, classified by the sign of the percentage change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Row<'a> {
    Regression {
        counter: &'a str,
        diff_pct: f64,
        factor: f64,
    },
    Improvement {
        counter: &'a str,
        diff_pct: f64,
        factor: f64,
    },
    Unchanged {
        counter: &'a str,
    },
}

impl<'a> Row<'a> {
    /// Only `diff_pct` decides the row kind; `factor` is shown as-is.
    pub fn new(counter: &'a str, diff_pct: f64, factor: f64) -> Self {
        if diff_pct > 0.0 {
            Row::Regression {
                counter,
                diff_pct,
                factor,
            }
        } else if diff_pct < 0.0 {
            Row::Improvement {
                counter,
                diff_pct,
                factor,
            }
        } else {
            // zero, negative zero and NaN
            Row::Unchanged { counter }
        }
    }
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Row::Regression {
                counter,
                diff_pct,
                factor,
            } => write!(f, "| 🟠 {counter} | {diff_pct:+.4}% | {factor:+.4}x |"),
            Row::Improvement {
                counter,
                diff_pct,
                factor,
            } => write!(f, "| 🟢 {counter} | {diff_pct:+.4}% | {factor:+.4}x |"),
            Row::Unchanged { counter } => write!(f, "| ⚪ {counter} | No change |  |"),
        }
    }
}

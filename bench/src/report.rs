//! Report module: the per-run results record, a human-readable summary and
//! the append-only metrics CSV.

use crate::sandbox::SandboxOutcome;
use crate::timing::duration_ms;
use crate::txn::{UpdateOutcome, UpdateScenario};
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const METRICS_FILE: &str = "metrics_tripbench.csv";
pub const IMPL_NAME: &str = "tripbench";

pub const METRICS_HEADER: &str = "impl,profile,cache,run,ts,work_mem,dataset_rows,load_ms,\
q1_ms,q2_ms,q3_ms,\
u1_target,u1_update_rows,u1_ms,\
u2_target,u2_update_rows,u2_ms,\
u3_ctas_rows,u3_ctas_ms,u3_update_rows,u3_update_ms,u3_total_ms";

/// Everything one run of the phases produces.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchResults {
    /// 1-based run index.
    pub run: u32,
    pub dataset_rows: usize,
    pub load: Duration,
    pub q1: Duration,
    pub q1_groups: usize,
    pub q2: Duration,
    pub q3: Duration,
    pub q3_groups: usize,
    pub u1: UpdateOutcome,
    pub u2: UpdateOutcome,
    pub sandbox: SandboxOutcome,
}

impl BenchResults {
    /// Update scenarios whose target and updated counts disagree.
    pub fn divergent_updates(&self) -> Vec<UpdateScenario> {
        [&self.u1, &self.u2]
            .into_iter()
            .filter(|u| !u.is_consistent())
            .map(|u| u.scenario)
            .collect()
    }

    /// One metrics CSV line (no trailing newline).
    pub fn metrics_line(&self, ts: &str) -> String {
        format!(
            "{IMPL_NAME},default,na,{},{ts},NA,{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.run,
            self.dataset_rows,
            duration_ms(self.load),
            duration_ms(self.q1),
            duration_ms(self.q2),
            duration_ms(self.q3),
            self.u1.target,
            self.u1.updated,
            duration_ms(self.u1.elapsed),
            self.u2.target,
            self.u2.updated,
            duration_ms(self.u2.elapsed),
            self.sandbox.rows,
            duration_ms(self.sandbox.materialize),
            self.sandbox.updated,
            duration_ms(self.sandbox.update),
            duration_ms(self.sandbox.total),
        )
    }

    /// Sum of all query, update and sandbox phases (load excluded).
    pub fn phases_total(&self) -> Duration {
        self.q1 + self.q2 + self.q3 + self.u1.elapsed + self.u2.elapsed + self.sandbox.total
    }
}

/// Append one line per result to `<dir>/metrics_tripbench.csv`, creating the
/// directory and writing the header when the file does not exist yet.
pub fn append_metrics(dir: &Path, results: &[BenchResults]) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    let path = dir.join(METRICS_FILE);
    let need_header = !path.exists();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot write {}", path.display()))?;

    let ts = chrono::Local::now().to_rfc3339();
    let mut out = String::new();
    if need_header {
        out.push_str(METRICS_HEADER);
        out.push('\n');
    }
    for r in results {
        out.push_str(&r.metrics_line(&ts));
        out.push('\n');
    }
    file.write_all(out.as_bytes())
        .with_context(|| format!("cannot write {}", path.display()))?;

    Ok(path)
}

/// Print a formatted summary of every run.
pub fn print_report(results: &[BenchResults]) {
    println!("\n{}", "=".repeat(72));
    println!("  Taxi Trip In-Memory Benchmark Report");
    println!("{}", "=".repeat(72));

    for r in results {
        println!(
            "\n  Run {} | Rows: {} | Load: {:.2}ms",
            r.run,
            r.dataset_rows,
            duration_ms(r.load)
        );
        println!("  {}", "-".repeat(60));
        println!(
            "  Q1 hourly volume:      {:>10.3}ms  ({} groups)",
            duration_ms(r.q1),
            r.q1_groups
        );
        println!("  Q2 top distances:      {:>10.3}ms", duration_ms(r.q2));
        println!(
            "  Q3 location ranking:   {:>10.3}ms  ({} locations)",
            duration_ms(r.q3),
            r.q3_groups
        );
        for u in [&r.u1, &r.u2] {
            println!(
                "  {} update/rollback:    {:>10.3}ms  (target {}, updated {}){}",
                u.scenario.label().to_uppercase(),
                duration_ms(u.elapsed),
                u.target,
                u.updated,
                if u.is_consistent() { "" } else { "  MISMATCH" }
            );
        }
        println!(
            "  U3 sandbox copy:       {:>10.3}ms  ({} rows)",
            duration_ms(r.sandbox.materialize),
            r.sandbox.rows
        );
        println!(
            "  U3 sandbox update:     {:>10.3}ms  ({} rows)",
            duration_ms(r.sandbox.update),
            r.sandbox.updated
        );
        println!("  U3 sandbox total:      {:>10.3}ms", duration_ms(r.sandbox.total));
    }

    println!("\n{}", "=".repeat(72));

    if results.len() >= 2 {
        print_means(results);
    }

    println!();
}

fn mean_ms(results: &[BenchResults], phase: impl Fn(&BenchResults) -> Duration) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let sum: f64 = results.iter().map(|r| duration_ms(phase(r))).sum();
    sum / results.len() as f64
}

fn print_means(results: &[BenchResults]) {
    println!("\n  Mean over {} runs:", results.len());
    println!("  {:24} {:>12}", "Phase", "Mean (ms)");
    println!("  {}", "-".repeat(37));
    let rows = [
        ("Q1 hourly volume", mean_ms(results, |r| r.q1)),
        ("Q2 top distances", mean_ms(results, |r| r.q2)),
        ("Q3 location ranking", mean_ms(results, |r| r.q3)),
        ("U1 update/rollback", mean_ms(results, |r| r.u1.elapsed)),
        ("U2 update/rollback", mean_ms(results, |r| r.u2.elapsed)),
        ("U3 sandbox total", mean_ms(results, |r| r.sandbox.total)),
        ("All phases", mean_ms(results, BenchResults::phases_total)),
    ];
    for (label, ms) in rows {
        println!("  {:24} {:>12.3}", label, ms);
    }
}

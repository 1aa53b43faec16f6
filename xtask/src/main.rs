use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "dual-atomic workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the library builds for every backend's reference target
    Backends {
        /// Only check these targets (default: the whole matrix)
        #[arg(long = "target")]
        targets: Vec<String>,

        /// Write the results as JSON to this path
        #[arg(long)]
        json: Option<String>,
    },
    /// Run the criterion benchmarks and summarize them
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

/// Reference target for each backend, and whether it needs a nightly `build-std`.
const BACKEND_TARGETS: &[(&str, &str, bool)] = &[
    ("x86_64-unknown-linux-gnu", "builtin", false),
    ("x86_64-pc-windows-msvc", "interlocked", false),
    ("wasm32-unknown-unknown", "portable", false),
    ("nvptx64-nvidia-cuda", "device", true),
];

const BENCHES: &[&str] = &["atomic_benchmark", "contention_benchmark"];

#[derive(Serialize)]
struct BackendCheck {
    target: String,
    backend: String,
    ok: bool,
    seconds: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Backends { targets, json } => {
            let results = check_backends(&targets)?;
            if let Some(path) = json {
                let body = serde_json::to_string_pretty(&results)?;
                fs::write(&path, body).with_context(|| format!("Failed to write {path}"))?;
            }
            if results.iter().any(|r| !r.ok) {
                anyhow::bail!("One or more backend targets failed to build");
            }
        }
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn check_backends(only: &[String]) -> Result<Vec<BackendCheck>> {
    let mut results = Vec::new();

    for &(target, backend, build_std) in BACKEND_TARGETS {
        if !only.is_empty() && !only.iter().any(|t| t == target) {
            continue;
        }
        println!("\n>>> Checking {} backend on {}", backend, target);
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        if build_std {
            cmd.arg("+nightly");
        }
        cmd.args(["check", "--lib", "--target", target]);
        if build_std {
            cmd.args(["-Z", "build-std=core"]);
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to run cargo check for {}", target))?;
        let seconds = start.elapsed().as_secs_f64();

        if status.success() {
            println!("Finished {} in {:.2}s", target, seconds);
        } else {
            eprintln!("Warning: check failed for {}", target);
        }

        results.push(BackendCheck {
            target: target.to_string(),
            backend: backend.to_string(),
            ok: status.success(),
            seconds,
        });
    }

    println!("\n| Target | Backend | Result |");
    println!("|---|---|---|");
    for r in &results {
        println!(
            "| {} | {} | {} |",
            r.target,
            r.backend,
            if r.ok { "ok" } else { "FAILED" }
        );
    }

    Ok(results)
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running benchmarks...");

    // Build first to avoid measuring build time
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["bench", "--no-run"])
        .status()?;
    if !status.success() {
        anyhow::bail!("Failed to compile benchmarks");
    }

    for bench in BENCHES {
        println!("\n>>> Running {}", bench);
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");
        cmd.arg("bench").arg("--bench").arg(bench);

        // Args for the test runner (Criterion) go after --
        cmd.arg("--");
        if quick {
            cmd.arg("--measurement-time").arg("0.1");
            cmd.arg("--noplot");
            cmd.arg("--sample-size").arg("10");
        }

        let status = cmd.status().context(format!("Failed to run bench {}", bench))?;

        if !status.success() {
            eprintln!("Warning: Benchmark failed for {}", bench);
        } else {
            println!("Finished {} in {:.2?}", bench, start.elapsed());
        }
    }

    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    // group -> function -> ops/s
    let mut results: HashMap<String, HashMap<String, f64>> = HashMap::new();

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    collect_results(criterion_dir, criterion_dir, &mut results);

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }

    use std::io::Write;
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Benchmark Report")?;

    let mut groups: Vec<_> = results.keys().cloned().collect();
    groups.sort();

    for group in groups {
        writeln!(file, "\n## {}\n", group)?;
        writeln!(file, "| Benchmark | Ops/s |")?;
        writeln!(file, "|---|---|")?;

        let mut rows: Vec<_> = results[&group].iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        for (name, ops) in rows {
            writeln!(file, "| {} | {} |", name, format_ops(*ops))?;
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{:.0}", ops)
    }
}

fn collect_results(root: &Path, dir: &Path, results: &mut HashMap<String, HashMap<String, f64>>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(root, &path, results);
            continue;
        }
        // Structure: target/criterion/<group>/<function>[/<input>]/new/estimates.json
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }
        let Some(run_dir) = path.parent() else { continue };
        if run_dir.file_name().and_then(|s| s.to_str()) != Some("new") {
            continue;
        }
        let Some(bench_dir) = run_dir.parent() else { continue };
        let Ok(relative) = bench_dir.strip_prefix(root) else { continue };

        let mut parts = relative.iter().filter_map(|p| p.to_str());
        let Some(group) = parts.next() else { continue };
        let name = parts.collect::<Vec<_>>().join("/");
        if group == "report" || name.is_empty() || name.ends_with("report") {
            continue;
        }

        // Get throughput from benchmark.json
        let mut elements = 1.0;
        let mut is_throughput = false;
        if let Ok(content) = fs::read_to_string(run_dir.join("benchmark.json")) {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) {
                if let Some(t) = json.get("throughput").and_then(|t| t.get("Elements")) {
                    elements = t.as_f64().unwrap_or(1.0);
                    is_throughput = true;
                }
            }
        }

        // Get time
        let Ok(content) = fs::read_to_string(&path) else { continue };
        let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) else { continue };
        let Some(mean) = json.get("mean").and_then(|m| m.get("point_estimate")) else { continue };
        let time_ns = mean.as_f64().unwrap_or(0.0);
        if time_ns > 0.0 {
            let metric = if is_throughput {
                (elements * 1e9) / time_ns
            } else {
                1e9 / time_ns
            };
            results
                .entry(group.to_string())
                .or_default()
                .insert(name, metric);
        }
    }
}

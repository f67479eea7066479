//! N-Queens benchmark driver.
//!
//! Runs every variant over its board-size range, prints each solve, and ends
//! with a table of median durations.
//!
//! Usage: bitqueens [-v] [-t] [-s N] [--size N] [--variant NAME] [--json] [--html]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bitqueens::config::BenchConfig;
use bitqueens::error::{QueensError, Result};
use bitqueens::logging::init_tracing;
use bitqueens::masks::{COMPACT_TABLES, WIDE_TABLES};
use bitqueens::render::{render_html_table, render_report};
use bitqueens::report::BenchTable;
use bitqueens::solver::{Solver, Variant, simd_available};
use bitqueens::{KNOWN_SOLUTION_COUNTS, symmetry};

/// Order in which the sweep visits the variants.
const SWEEP_ORDER: [Variant; 4] = [
    Variant::Scalar64,
    Variant::Threaded256,
    Variant::Simd256,
    Variant::Scalar256,
];

/// Largest board checked in test mode.
const TEST_MAX_SIZE: usize = 12;

#[derive(Debug, Parser)]
#[command(name = "bitqueens")]
#[command(about = "Bitboard N-Queens solver and kernel benchmark (N = 4..16)", long_about = None)]
struct Cli {
    /// Trace every pruned column of the first trial
    #[arg(short, long)]
    verbose: bool,

    /// Run the self-checks instead of the benchmark
    #[arg(short, long)]
    test: bool,

    /// Only trace the first N failures
    #[arg(short, long, value_name = "N")]
    short: Option<u64>,

    /// Only benchmark this board size
    #[arg(long, value_name = "N")]
    size: Option<usize>,

    /// Only benchmark this variant (scalar64, scalar256, simd256, threaded256)
    #[arg(long)]
    variant: Option<Variant>,

    /// Cap on timed trials per solve
    #[arg(long, value_name = "N")]
    max_trials: Option<usize>,

    /// JSON file overriding the benchmark defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the duration table as JSON
    #[arg(long)]
    json: bool,

    /// Also print 8×8 solutions as an HTML table
    #[arg(long)]
    html: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = if cli.test { run_tests(&cli) } else { run_sweep(&cli) };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<BenchConfig> {
    let mut config = match &cli.config {
        Some(path) => BenchConfig::from_json_file(path)?,
        None => BenchConfig::default(),
    };
    if cli.max_trials.is_some() {
        config.max_trials = cli.max_trials;
    }
    Ok(config)
}

fn make_solver(cli: &Cli, variant: Variant, config: &BenchConfig) -> Solver {
    let mut solver = Solver::new(variant, config.clone());
    solver.set_verbose(cli.verbose);
    if let Some(n) = cli.short.filter(|&n| n > 0) {
        solver.set_short(n);
    }
    solver
}

fn selected_variants(cli: &Cli) -> impl Iterator<Item = Variant> + '_ {
    SWEEP_ORDER
        .into_iter()
        .filter(move |v| cli.variant.is_none_or(|only| only == *v))
}

// ============================================================================
// Benchmark sweep
// ============================================================================

fn run_sweep(cli: &Cli) -> Result<bool> {
    let config = load_config(cli)?;
    let mut table = BenchTable::new();

    for variant in selected_variants(cli) {
        if variant == Variant::Simd256 && !simd_available() {
            tracing::warn!("AVX2 not available, skipping {variant}");
            continue;
        }

        println!("****************************** {} ******************************", variant.label());
        let mut solver = make_solver(cli, variant, &config);
        let sizes = config.sizes.for_variant(variant);

        for size in sizes.sizes().filter(|&n| cli.size.is_none_or(|only| only == n)) {
            if !solver.set_board_size(size) {
                continue;
            }
            let median = solver.solve()?;
            table.record(size, variant, median);

            if let Some(report) = solver.last_report() {
                println!("{}", render_report(report)?);
                if cli.html && size == 8 {
                    let expanded = symmetry::expand(&report.solutions, size)?;
                    println!("{}", render_html_table(&expanded, size));
                }
            }
        }
    }

    if cli.json {
        println!("{}", table.to_json());
    } else {
        println!("{}", table.render_text());
    }
    Ok(true)
}

// ============================================================================
// Self-checks
// ============================================================================

fn run_tests(cli: &Cli) -> Result<bool> {
    let mut config = load_config(cli)?;
    config.max_trials = Some(1);
    let mut passed = true;

    let masks_ok = COMPACT_TABLES.first_mismatch().is_none() && WIDE_TABLES.first_mismatch().is_none();
    println!("mask tables: {}", if masks_ok { "PASS" } else { "FAIL" });
    passed &= masks_ok;

    for variant in selected_variants(cli) {
        let mut solver = make_solver(cli, variant, &config);
        for size in 4..=variant.max_board_size().min(TEST_MAX_SIZE) {
            solver.set_board_size(size);
            match solver.solve() {
                Ok(_) => {}
                Err(QueensError::SimdUnavailable) => {
                    println!("{variant}: skipped, AVX2 not available");
                    break;
                }
                Err(err) => return Err(err),
            }
            let Some(report) = solver.last_report() else {
                continue;
            };
            let expanded = symmetry::expand(&report.solutions, size)?;
            let total = report.counters.total_solutions();
            let ok = total == KNOWN_SOLUTION_COUNTS[size]
                && expanded.iter().all(|s| s.is_valid());
            println!(
                "{variant} {size}x{size}: {total} solutions, {}",
                if ok { "PASS" } else { "FAIL" }
            );
            passed &= ok;
        }
    }
    Ok(passed)
}

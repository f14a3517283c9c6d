use anyhow::Context;
use clap::Parser;
use generator::profile::{build_lhco_sample, GeneratorConfig};
use hhcore::processing::FeatureMode;
use hhcore::telemetry::{FileSummary, Metrics};
use std::fs::{self, File};
use std::collections::VecDeque;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::runtime::Builder as TokioBuilder;
use workflow::config::WorkflowConfig;
use workflow::inputs::{resolve_inputs, InputSet};
use workflow::runner::{FileReport, Runner};

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Turns LHCO files into selected di-Higgs feature rows")]
struct Args {
    /// Input lhco files (a single directory runs over every lhco file inside)
    inputs: Vec<PathBuf>,
    #[arg(short, long, required_unless_present = "emit_synthetic")]
    output_file: Option<PathBuf>,
    /// Event type written first on every row (0 for bkg, 1 for signal)
    #[arg(short = 't', long, allow_hyphen_values = true)]
    event_type: Option<i64>,
    /// Output features (low, high or all)
    #[arg(short, long, default_value_t = FeatureMode::All)]
    features: FeatureMode,
    /// Load event type, features and analysis constants from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Number of files processed concurrently
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,
    /// Write per-file summaries as JSON
    #[arg(long)]
    report: Option<PathBuf>,
    /// Write a seeded synthetic LHCO sample to this path and exit
    #[arg(long)]
    emit_synthetic: Option<PathBuf>,
    #[arg(long, default_value_t = 100)]
    synthetic_events: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn emit_synthetic(path: &Path, events: usize, seed: u64) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        events,
        seed,
        ..Default::default()
    };
    let sample = build_lhco_sample(&config)?;
    fs::write(path, sample)
        .with_context(|| format!("writing synthetic sample {}", path.display()))?;
    println!(
        "Synthetic sample with {} events saved in {}",
        events,
        path.display()
    );
    Ok(())
}

fn print_header(inputs: &InputSet, config: &WorkflowConfig, output: &Path) {
    match &inputs.directory {
        Some(dir) => println!(
            "# Input       = found {} lhco files inside the directory {}",
            inputs.files.len(),
            dir.display()
        ),
        None => println!("# Input       = {} lhco files", inputs.files.len()),
    }
    println!("# Event type  = {}", config.event_type);
    println!("# Features    = {}", config.features);
    println!("# Output file = {}", output.display());
}

/// Runs files on the blocking pool with at most `jobs` in flight and hands
/// reports back in input order. `on_start` fires when a file is dispatched.
fn run_files(
    runner: &Runner,
    files: &[PathBuf],
    jobs: usize,
    mut on_start: impl FnMut(&Path),
    mut on_report: impl FnMut(&Path, anyhow::Result<FileReport>) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let jobs = jobs.max(1);
    let runtime = TokioBuilder::new_multi_thread()
        .max_blocking_threads(jobs)
        .enable_all()
        .build()
        .context("creating runtime for file workers")?;

    runtime.block_on(async {
        let mut queue = files.iter().cloned();
        let mut pending = VecDeque::with_capacity(jobs);
        loop {
            while pending.len() < jobs {
                let Some(path) = queue.next() else { break };
                on_start(&path);
                let runner = runner.clone();
                pending.push_back(tokio::task::spawn_blocking(move || {
                    let outcome = runner.execute(&path);
                    (path, outcome)
                }));
            }
            let Some(handle) = pending.pop_front() else { break };
            let (path, outcome) = handle.await.context("file worker stopped unexpectedly")?;
            on_report(&path, outcome)?;
        }
        Ok::<(), anyhow::Error>(())
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = &args.emit_synthetic {
        return emit_synthetic(path, args.synthetic_events, args.seed);
    }

    let mut workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        let event_type = args
            .event_type
            .context("--event-type is required unless a --workflow file provides it")?;
        WorkflowConfig::from_args(event_type, args.features)
    };
    if let Some(event_type) = args.event_type {
        workflow_config.event_type = event_type;
    }

    let output_path = args
        .output_file
        .clone()
        .context("--output-file is required")?;
    let inputs = resolve_inputs(&args.inputs)?;
    print_header(&inputs, &workflow_config, &output_path);

    let file = File::create(&output_path)
        .with_context(|| format!("creating output file {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    let runner = Runner::new(workflow_config);
    let mut summaries = Vec::with_capacity(inputs.files.len());
    let mut failures = 0usize;

    let on_start = |path: &Path| println!("Reading {}", path.display());
    run_files(&runner, &inputs.files, args.jobs, on_start, |path, outcome| {
        match outcome {
            Ok(report) => {
                for row in &report.rows {
                    writeln!(writer, "{}", row)
                        .with_context(|| format!("writing {}", output_path.display()))?;
                }
                println!("{}", report.summary.summary_line());
                summaries.push(report.summary);
            }
            Err(err) => {
                log::error!("{:#}", err);
                failures += 1;
                let summary = FileSummary::new(path.display().to_string(), Metrics::default())
                    .with_error(format!("{:#}", err));
                println!("{}", summary.summary_line());
                summaries.push(summary);
            }
        }
        Ok(())
    })?;

    writer
        .flush()
        .with_context(|| format!("writing {}", output_path.display()))?;

    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&summaries).context("encoding run report")?;
        fs::write(report_path, json)
            .with_context(|| format!("writing run report {}", report_path.display()))?;
    }

    if failures > 0 {
        anyhow::bail!(
            "{} of {} input files could not be read",
            failures,
            inputs.files.len()
        );
    }
    println!("Done. Output saved in {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn write_sample(dir: &Path, name: &str, events: usize) -> PathBuf {
        let path = dir.join(name);
        let sample = build_lhco_sample(&GeneratorConfig {
            events,
            ..Default::default()
        })
        .unwrap();
        fs::write(&path, sample).unwrap();
        path
    }

    #[test]
    fn single_job_announces_each_file_before_its_report() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_sample(dir.path(), "a.lhco", 3),
            dir.path().join("missing.lhco"),
            write_sample(dir.path(), "b.lhco", 4),
        ];
        let runner = Runner::new(WorkflowConfig::from_args(0, FeatureMode::Low));
        let trace = RefCell::new(Vec::new());

        run_files(
            &runner,
            &files,
            1,
            |path| trace.borrow_mut().push(format!("start {}", path.display())),
            |path, outcome| {
                let state = if outcome.is_ok() { "ok" } else { "failed" };
                trace
                    .borrow_mut()
                    .push(format!("{} {}", state, path.display()));
                Ok(())
            },
        )
        .unwrap();

        let expected: Vec<String> = files
            .iter()
            .zip(["ok", "failed", "ok"])
            .flat_map(|(path, state)| {
                [
                    format!("start {}", path.display()),
                    format!("{} {}", state, path.display()),
                ]
            })
            .collect();
        assert_eq!(trace.into_inner(), expected);
    }

    #[test]
    fn parallel_jobs_still_report_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<_> = (0..5)
            .map(|i| write_sample(dir.path(), &format!("run_{i}.lhco"), 2 + i))
            .collect();
        let runner = Runner::new(WorkflowConfig::from_args(1, FeatureMode::High));
        let mut reported = Vec::new();

        run_files(&runner, &files, 3, |_| {}, |path, outcome| {
            assert_eq!(outcome.unwrap().summary.events_total, reported.len() + 2);
            reported.push(path.to_path_buf());
            Ok(())
        })
        .unwrap();

        assert_eq!(reported, files);
    }
}

use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use hhcore::processing::{EventPipeline, FeatureSerializer};
use hhcore::telemetry::{FileSummary, LogManager, MetricsRecorder};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Rows and counters produced by one input file.
pub struct FileReport {
    pub summary: FileSummary,
    pub rows: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    logger: LogManager,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            logger: LogManager::new("runner"),
        }
    }

    pub fn execute(&self, path: &Path) -> anyhow::Result<FileReport> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        self.execute_reader(BufReader::new(file), &path.display().to_string())
    }

    /// Processes one LHCO stream. A malformed line discards the whole stream.
    pub fn execute_reader<R: BufRead>(&self, input: R, name: &str) -> anyhow::Result<FileReport> {
        let analysis = &self.config.analysis;
        let mut pipeline = EventPipeline::new(analysis).context("initializing event pipeline")?;
        let serializer =
            FeatureSerializer::new(self.config.features, self.config.event_type, analysis.sentinel);
        let metrics = MetricsRecorder::new();
        self.logger.record(&format!("processing {}", name));
        let mut rows = Vec::new();

        let result = pipeline.for_each_event(input, |event| {
            metrics.record_event(event.is_selected());
            if let Some(row) = serializer.serialize(&event)? {
                rows.push(row);
            }
            Ok(())
        });
        pipeline.cleanup();
        result.with_context(|| format!("reading {}", name))?;

        let summary = FileSummary::new(name, metrics.snapshot());
        self.logger
            .record(&format!("finished {}: {}", name, summary.summary_line()));
        Ok(FileReport { summary, rows })
    }
}

use crate::Result;
use crate::log::extract::BracketExtractor;
use crate::log::pairs::parse_pairs;
use crate::log::record::{SkipReason, classify};
use crate::model::{ChartTypeSpec, TimeSeriesStore};
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Per-session line counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub lines: usize,
    /// Lines whose title was accepted.
    pub accepted: usize,
    pub observations: usize,
    pub no_groups: usize,
    pub missing_pairs: usize,
    pub invalid_title: usize,
}

impl IngestStats {
    pub fn dropped(&self) -> usize {
        self.no_groups + self.missing_pairs + self.invalid_title
    }

    fn record(&mut self, outcome: &LineOutcome) {
        match outcome {
            LineOutcome::Accepted { observations } => {
                self.accepted += 1;
                self.observations += observations;
            }
            LineOutcome::Skipped(SkipReason::NoGroups) => self.no_groups += 1,
            LineOutcome::Skipped(SkipReason::MissingPairs) => self.missing_pairs += 1,
            LineOutcome::Skipped(SkipReason::InvalidTitle(_)) => self.invalid_title += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Accepted { observations: usize },
    Skipped(SkipReason),
}

/// One parsing session. Owns the store for the whole run; lines must be fed
/// in arrival order.
#[derive(Debug)]
pub struct LogParser {
    extractor: BracketExtractor,
    store: TimeSeriesStore,
    stats: IngestStats,
}

impl LogParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: BracketExtractor::new()?,
            store: TimeSeriesStore::new(),
            stats: IngestStats::default(),
        })
    }

    /// Fold one line into the store. Malformed lines are skipped, never errors.
    pub fn ingest_line(&mut self, line: &str) -> LineOutcome {
        self.stats.lines += 1;
        let lno = self.stats.lines;
        let outcome = self.fold_line(line, lno);
        self.stats.record(&outcome);
        outcome
    }

    fn fold_line(&mut self, line: &str, lno: usize) -> LineOutcome {
        let record = match classify(self.extractor.groups(line)) {
            Ok(r) => r,
            Err(reason) => {
                tracing::debug!(line = lno, %reason, "dropping line");
                return LineOutcome::Skipped(reason);
            }
        };

        let (ordinal, created) = self.store.register_title(record.title);
        if created {
            tracing::info!(title = record.title, ordinal, "creating new plot data for title");
        }

        let mut observations = 0;
        for (label, value) in parse_pairs(record.pairs) {
            if self.store.append_observation(record.title, label, value) {
                tracing::info!(title = record.title, label, "creating new axis for label");
            }
            observations += 1;
        }

        if let Some(group) = record.chart_types {
            if !self
                .store
                .record_chart_types(record.title, ChartTypeSpec::parse(group))
            {
                tracing::debug!(
                    line = lno,
                    title = record.title,
                    "chart types already recorded; ignoring"
                );
            }
        }

        LineOutcome::Accepted { observations }
    }

    /// Ingest every line of `reader`. Invalid UTF-8 is replaced, not rejected.
    pub fn ingest_reader<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let text = String::from_utf8_lossy(&buf);
            self.ingest_line(text.trim_end_matches(['\n', '\r']));
        }
        Ok(())
    }

    pub fn store(&self) -> &TimeSeriesStore {
        &self.store
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    pub fn finish(self) -> (TimeSeriesStore, IngestStats) {
        (self.store, self.stats)
    }
}

/// Parse a whole log source. `-` reads standard input.
pub fn parse_log_file(path: &str) -> Result<LogParser> {
    let mut parser = LogParser::new()?;

    if path == "-" {
        parser
            .ingest_reader(io::stdin().lock())
            .context("read log from stdin")?;
    } else {
        let file = File::open(path).with_context(|| format!("open log file {}", path))?;
        parser
            .ingest_reader(BufReader::new(file))
            .with_context(|| format!("read log file {}", path))?;
    }

    tracing::debug!(
        lines = parser.stats.lines,
        accepted = parser.stats.accepted,
        dropped = parser.stats.dropped(),
        "finished parsing {}",
        path
    );
    Ok(parser)
}

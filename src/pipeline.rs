use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::buffer::AlignmentBuffer;
use crate::domain::{RelabeledRecord, ResidueMode, SourceDescriptor};
use crate::error::FeedError;
use crate::source::SourceClient;
use crate::{fasta, header, label};

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub residue_mode: ResidueMode,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Contributed { label: String, records: usize },
    Skipped { kind: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    pub source: String,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, SourceStatus::Skipped { .. })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub buffer: AlignmentBuffer,
    pub outcomes: Vec<SourceOutcome>,
}

impl PipelineResult {
    pub fn skipped(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_skipped())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelabeledGroup {
    pub label: String,
    pub records: Vec<RelabeledRecord>,
}

pub struct Pipeline<C: SourceClient> {
    client: C,
    options: PipelineOptions,
}

impl<C: SourceClient> Pipeline<C> {
    pub fn new(client: C, options: PipelineOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Processes `sources` one at a time, in order, and never fails as a whole.
    ///
    /// A source that cannot be fetched or carries no usable annotation is logged, recorded
    /// as skipped and contributes nothing to the buffer.
    pub fn run(&self, sources: &[SourceDescriptor], sink: &dyn ProgressSink) -> PipelineResult {
        let mut buffer = AlignmentBuffer::new();
        let mut outcomes = Vec::with_capacity(sources.len());

        for (index, descriptor) in sources.iter().enumerate() {
            sink.event(ProgressEvent {
                message: format!(
                    "phase=Fetch; source {}/{} {descriptor}",
                    index + 1,
                    sources.len()
                ),
                elapsed: None,
            });
            let start = Instant::now();
            let status = match self.process_source(descriptor) {
                Ok(group) => {
                    info!(
                        source = %descriptor,
                        label = %group.label,
                        records = group.records.len(),
                        "source contributed"
                    );
                    buffer.extend_group(&group.records);
                    SourceStatus::Contributed {
                        label: group.label,
                        records: group.records.len(),
                    }
                }
                Err(err) => {
                    warn!(source = %descriptor, kind = err.kind(), "skipping source: {err}");
                    SourceStatus::Skipped {
                        kind: err.kind().to_string(),
                        reason: err.to_string(),
                    }
                }
            };
            sink.event(ProgressEvent {
                message: match &status {
                    SourceStatus::Contributed { records, .. } => {
                        format!("phase=Relabel; {descriptor} contributed {records} records")
                    }
                    SourceStatus::Skipped { kind, .. } => {
                        format!("phase=Relabel; {descriptor} skipped ({kind})")
                    }
                },
                elapsed: Some(start.elapsed()),
            });
            outcomes.push(SourceOutcome {
                source: descriptor.to_string(),
                status,
            });
        }

        PipelineResult { buffer, outcomes }
    }

    fn process_source(&self, descriptor: &SourceDescriptor) -> Result<RelabeledGroup, FeedError> {
        let document = self.client.fetch(descriptor)?;
        relabel_document(descriptor, &document.text, self.options.residue_mode)
    }
}

pub fn relabel_document(
    descriptor: &SourceDescriptor,
    raw_text: &str,
    residue_mode: ResidueMode,
) -> Result<RelabeledGroup, FeedError> {
    let annotation = header::extract(raw_text)
        .ok_or_else(|| FeedError::AnnotationNotFound(descriptor.to_string()))?;
    let label = label::derive_label(&annotation)?;
    let records = label::apply_label(&label, fasta::parse(raw_text, residue_mode));
    Ok(RelabeledGroup { label, records })
}

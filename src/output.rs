use std::fs;
use std::io::{self, Write};

use camino::Utf8Path;
use serde::Serialize;

use crate::buffer::LongestRecord;
use crate::domain::ResidueMode;
use crate::error::FeedError;
use crate::pipeline::{PipelineResult, ProgressEvent, ProgressSink, SourceOutcome};

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub generated_at: String,
    pub tool: String,
    pub origin: String,
    pub residue_mode: String,
    pub record_count: usize,
    pub longest: Option<LongestRecord>,
    pub sources: Vec<SourceOutcome>,
    pub alignment: String,
}

impl BuildReport {
    pub fn new(origin: &str, residue_mode: ResidueMode, result: &PipelineResult) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool: format!("msa-feed/{}", env!("CARGO_PKG_VERSION")),
            origin: origin.to_string(),
            residue_mode: residue_mode.to_string(),
            record_count: result.buffer.record_count(),
            longest: result.buffer.longest().cloned(),
            sources: result.outcomes.clone(),
            alignment: result.buffer.as_str().to_string(),
        }
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_report(report: &BuildReport) -> io::Result<()> {
        Self::print_json(report)
    }

    pub fn print_catalog(names: &[&str]) -> io::Result<()> {
        Self::print_json(&names)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

pub struct StderrProgress;

impl ProgressSink for StderrProgress {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => eprintln!("{} ({} ms)", event.message, elapsed.as_millis()),
            None => eprintln!("{}", event.message),
        }
    }
}

pub fn write_stdout(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

pub fn write_file_atomic(dest: &Utf8Path, text: &str) -> Result<(), FeedError> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(parent.as_std_path())
        .map_err(|err| FeedError::Filesystem(err.to_string()))?;
    let mut temp = tempfile::Builder::new()
        .prefix("msa-feed")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| FeedError::Filesystem(err.to_string()))?;
    temp.write_all(text.as_bytes())
        .map_err(|err| FeedError::Filesystem(err.to_string()))?;
    temp.persist(dest.as_std_path())
        .map_err(|err| FeedError::Filesystem(err.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;
    use crate::buffer::AlignmentBuffer;
    use crate::domain::RelabeledRecord;
    use crate::pipeline::SourceStatus;

    #[test]
    fn atomic_write_replaces_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let dest = Utf8PathBuf::from_path_buf(temp.path().join("out").join("msa.fasta")).unwrap();

        write_file_atomic(&dest, ">old\nA\n").unwrap();
        write_file_atomic(&dest, ">Glycine-max\nACGT\n").unwrap();

        let written = fs::read_to_string(dest.as_std_path()).unwrap();
        assert_eq!(written, ">Glycine-max\nACGT\n");
    }

    #[test]
    fn report_serializes_outcomes() {
        let mut buffer = AlignmentBuffer::new();
        buffer.push(&RelabeledRecord {
            label: "Glycine-max".to_string(),
            residues: "ACGT".to_string(),
        });
        let result = PipelineResult {
            buffer,
            outcomes: vec![
                SourceOutcome {
                    source: "a.fna".to_string(),
                    status: SourceStatus::Contributed {
                        label: "Glycine-max".to_string(),
                        records: 1,
                    },
                },
                SourceOutcome {
                    source: "b.fna".to_string(),
                    status: SourceStatus::Skipped {
                        kind: "fetch_failure".to_string(),
                        reason: "b.fna returned status 404".to_string(),
                    },
                },
            ],
        };

        let report = BuildReport::new("https://example.org/", ResidueMode::Concatenate, &result);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["origin"], "https://example.org/");
        assert_eq!(value["record_count"], 1);
        assert_eq!(value["residue_mode"], "concatenate");
        assert_eq!(value["longest"]["length"], 4);
        assert_eq!(value["sources"][0]["status"], "contributed");
        assert_eq!(value["sources"][1]["status"], "skipped");
        assert_eq!(value["sources"][1]["kind"], "fetch_failure");
        assert_eq!(value["alignment"], ">Glycine-max\nACGT\n");
    }
}

use std::iter::Peekable;
use std::str::Lines;

use crate::domain::{ResidueMode, SequenceRecord};

/// Lazily parses FASTA records out of an in-memory document.
///
/// Text before the first `>` line is ignored, so a document without any header yields
/// nothing. Blank lines and whitespace inside residue lines are dropped. The iterator is
/// consumed as it goes; call [`parse`] again to walk the same text twice.
pub struct FastaRecords<'a> {
    lines: Peekable<Lines<'a>>,
    mode: ResidueMode,
}

pub fn parse(raw_text: &str, mode: ResidueMode) -> FastaRecords<'_> {
    FastaRecords {
        lines: raw_text.lines().peekable(),
        mode,
    }
}

impl Iterator for FastaRecords<'_> {
    type Item = SequenceRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let title = loop {
            let line = self.lines.next()?;
            if let Some(title) = line.strip_prefix('>') {
                break title.trim();
            }
        };
        let (id, description) = match title.split_once(char::is_whitespace) {
            Some((id, rest)) => (id.to_string(), rest.trim().to_string()),
            None => (title.to_string(), String::new()),
        };

        let mut residues = String::new();
        let mut residue_lines = 0usize;
        while let Some(line) = self.lines.next_if(|line| !line.starts_with('>')) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if self.mode == ResidueMode::FirstLine && residue_lines > 0 {
                continue;
            }
            residues.extend(line.chars().filter(|ch| !ch.is_whitespace()));
            residue_lines += 1;
        }

        Some(SequenceRecord {
            id,
            description,
            residues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTI: &str = ">seq1 first gene\nACGT\nTTGA\n\n>seq2\r\nGG CC\r\n>seq3\n";

    #[test]
    fn parses_records_in_order() {
        let records: Vec<_> = parse(MULTI, ResidueMode::Concatenate).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].description, "first gene");
        assert_eq!(records[0].residues, "ACGTTTGA");
        assert_eq!(records[1].id, "seq2");
        assert_eq!(records[1].residues, "GGCC");
        assert_eq!(records[2].id, "seq3");
        assert_eq!(records[2].residues, "");
    }

    #[test]
    fn first_line_mode_truncates() {
        let records: Vec<_> = parse(MULTI, ResidueMode::FirstLine).collect();
        assert_eq!(records[0].residues, "ACGT");
        assert_eq!(records[1].residues, "GGCC");
    }

    #[test]
    fn leading_text_is_ignored() {
        let text = "... [organism=Homo sapiens] ...\n>seq1\nACGT\n";
        let records: Vec<_> = parse(text, ResidueMode::Concatenate).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].residues, "ACGT");
    }

    #[test]
    fn no_header_yields_nothing() {
        assert_eq!(parse("ACGT\nTTGA\n", ResidueMode::Concatenate).count(), 0);
        assert_eq!(parse("", ResidueMode::Concatenate).count(), 0);
    }
}

use std::fmt;

use serde::Serialize;

use crate::domain::RelabeledRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongestRecord {
    pub label: String,
    pub length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentBuffer {
    text: String,
    record_count: usize,
    longest: Option<LongestRecord>,
}

impl AlignmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &RelabeledRecord) {
        self.text.push('>');
        self.text.push_str(&record.label);
        self.text.push('\n');
        self.text.push_str(&record.residues);
        self.text.push('\n');
        self.record_count += 1;

        let length = record.residues.chars().count();
        let is_longer = self
            .longest
            .as_ref()
            .map(|current| length > current.length)
            .unwrap_or(true);
        if is_longer {
            self.longest = Some(LongestRecord {
                label: record.label.clone(),
                length,
            });
        }
    }

    pub fn extend_group(&mut self, group: &[RelabeledRecord]) {
        for record in group {
            self.push(record);
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn longest(&self) -> Option<&LongestRecord> {
        self.longest.as_ref()
    }
}

impl fmt::Display for AlignmentBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub fn build<I, G>(groups: I) -> AlignmentBuffer
where
    I: IntoIterator<Item = G>,
    G: AsRef<[RelabeledRecord]>,
{
    let mut buffer = AlignmentBuffer::new();
    for group in groups {
        buffer.extend_group(group.as_ref());
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relabeled(label: &str, residues: &str) -> RelabeledRecord {
        RelabeledRecord {
            label: label.to_string(),
            residues: residues.to_string(),
        }
    }

    #[test]
    fn serializes_groups_in_order() {
        let groups = vec![
            vec![relabeled("Glycine-max", "ACGT"), relabeled("Glycine-max", "AC")],
            vec![],
            vec![relabeled("Vitis-vinifera", "TTGACC")],
        ];
        let buffer = build(&groups);
        assert_eq!(
            buffer.as_str(),
            ">Glycine-max\nACGT\n>Glycine-max\nAC\n>Vitis-vinifera\nTTGACC\n"
        );
        assert_eq!(buffer.record_count(), 3);
        assert_eq!(
            buffer.longest(),
            Some(&LongestRecord {
                label: "Vitis-vinifera".to_string(),
                length: 6
            })
        );
    }

    #[test]
    fn ties_keep_first_longest() {
        let buffer = build([vec![relabeled("a", "ACGT"), relabeled("b", "TTTT")]]);
        assert_eq!(buffer.longest().unwrap().label, "a");
    }

    #[test]
    fn empty_input_is_empty_buffer() {
        let buffer = build(Vec::<Vec<RelabeledRecord>>::new());
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_str(), "");
        assert!(buffer.longest().is_none());
        let no_records: [Vec<RelabeledRecord>; 2] = [Vec::new(), Vec::new()];
        assert_eq!(build(&no_records).to_string(), "");
    }

    #[test]
    fn build_is_deterministic() {
        let groups = vec![vec![relabeled("x", "A")], vec![relabeled("y", "C")]];
        assert_eq!(build(&groups), build(&groups));
    }
}

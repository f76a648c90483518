use crate::domain::{OrganismAnnotation, RelabeledRecord, SequenceRecord};
use crate::error::FeedError;

pub const ANNOTATION_TAG_WIDTH: usize = 9;

/// Turns `organism=Homo sapiens` into `Homo-sapiens`.
///
/// The first [`ANNOTATION_TAG_WIDTH`] characters are dropped whatever they are, then
/// spaces become hyphens. Annotations with nothing left after the tag are rejected.
pub fn derive_label(annotation: &OrganismAnnotation) -> Result<String, FeedError> {
    let value = annotation.as_str();
    let rest = match value.char_indices().nth(ANNOTATION_TAG_WIDTH) {
        Some((offset, _)) => &value[offset..],
        None => {
            return Err(FeedError::AnnotationTooShort {
                annotation: value.to_string(),
            });
        }
    };
    Ok(rest.replace(' ', "-"))
}

pub fn rewrite<I>(
    annotation: &OrganismAnnotation,
    records: I,
) -> Result<Vec<RelabeledRecord>, FeedError>
where
    I: IntoIterator<Item = SequenceRecord>,
{
    let label = derive_label(annotation)?;
    Ok(apply_label(&label, records))
}

pub fn apply_label<I>(label: &str, records: I) -> Vec<RelabeledRecord>
where
    I: IntoIterator<Item = SequenceRecord>,
{
    records
        .into_iter()
        .map(|record| RelabeledRecord {
            label: label.to_string(),
            residues: record.residues,
        })
        .collect()
}

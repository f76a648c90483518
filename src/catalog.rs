use crate::domain::SourceDescriptor;
use crate::error::FeedError;

pub const KNOWN_SOURCES: [&str; 7] = [
    "gene_Arabidopsis-thaliana.fna",
    "gene_Aspergillus-niger.fna",
    "gene_Dictyostelium-discoideum-AX4.fna",
    "gene_Glycine-max.fna",
    "gene_Penicillium-chrysogenum-Wisconsin-54-1255.fna",
    "gene_Solanum-lycopersicum.fna",
    "gene_Vitis-vinifera.fna",
];

pub const DEFAULT_SOURCE: &str = "gene_Arabidopsis-thaliana.fna";

pub fn known_sources() -> Result<Vec<SourceDescriptor>, FeedError> {
    KNOWN_SOURCES.iter().map(|name| name.parse()).collect()
}

pub fn default_selection() -> Result<Vec<SourceDescriptor>, FeedError> {
    Ok(vec![DEFAULT_SOURCE.parse()?])
}

/// Concatenates selection groups in group order, keeping duplicates.
///
/// Falls back to [`default_selection`] when every group is empty.
pub fn merge_selections<I, G>(groups: I) -> Result<Vec<SourceDescriptor>, FeedError>
where
    I: IntoIterator<Item = G>,
    G: IntoIterator<Item = SourceDescriptor>,
{
    let merged: Vec<SourceDescriptor> = groups.into_iter().flatten().collect();
    if merged.is_empty() {
        return default_selection();
    }
    Ok(merged)
}

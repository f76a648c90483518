use std::fs;

use assert_matches::assert_matches;

use msa_feed::catalog;
use msa_feed::config::ConfigLoader;
use msa_feed::domain::ResidueMode;
use msa_feed::error::FeedError;
use msa_feed::source::DEFAULT_BASE_URL;

#[test]
fn resolve_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("msa-feed.json");
    fs::write(
        &path,
        r#"{
            "schema_version": 1,
            "sources": ["gene_Glycine-max.fna", { "name": "gene_Aspergillus-niger.fna" }]
        }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    assert_eq!(resolved.residue_mode, ResidueMode::Concatenate);
    assert_eq!(resolved.timeout, None);
    let names: Vec<&str> = resolved.sources.iter().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["gene_Glycine-max.fna", "gene_Aspergillus-niger.fna"]);
}

#[test]
fn explicit_missing_path_is_a_read_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("absent.json");
    let err = ConfigLoader::resolve_or_default(path.to_str()).unwrap_err();
    assert_matches!(err, FeedError::ConfigRead(_));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("msa-feed.json");
    fs::write(&path, "{ sources: ").unwrap();
    assert_matches!(
        ConfigLoader::resolve(path.to_str()),
        Err(FeedError::ConfigParse(_))
    );
}

#[test]
fn empty_config_selects_default_source() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("msa-feed.json");
    fs::write(&path, "{}").unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    let selection = catalog::merge_selections([resolved.sources]).unwrap();
    assert_eq!(selection.len(), 1);
    assert_eq!(selection[0].as_str(), catalog::DEFAULT_SOURCE);
}

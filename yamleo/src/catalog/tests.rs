//! Loading and writing catalogs through the filesystem.

use anyhow::{Result, ensure};
use camino::Utf8Path;
use rstest::rstest;
use test_helpers::catalog::CatalogDir;

use super::*;
use crate::tree::Tree;

#[rstest]
#[case("en.yaml", CatalogFormat::Yaml)]
#[case("EN.YML", CatalogFormat::Yaml)]
#[case("en.json", CatalogFormat::Json)]
fn format_follows_extension(#[case] name: &str, #[case] expected: CatalogFormat) -> Result<()> {
    let format = CatalogFormat::from_path(Utf8Path::new(name))?;
    ensure!(format == expected, "unexpected format {format:?} for {name}");
    Ok(())
}

#[rstest]
#[case("en.toml")]
#[case("en")]
fn unknown_extensions_are_rejected(#[case] name: &str) {
    let err = CatalogFormat::from_path(Utf8Path::new(name)).expect_err("unsupported");
    assert!(matches!(err, CatalogError::UnsupportedFormat { .. }));
}

#[rstest]
fn loads_yaml_with_raw_text() -> Result<()> {
    let dir = CatalogDir::new()?;
    let path = dir.write("en.yaml", "title: Shop\ncart:\n  empty: Empty\n")?;
    let catalog = load_catalog(&path)?;
    ensure!(catalog.raw == "title: Shop\ncart:\n  empty: Empty\n");
    ensure!(catalog.format == CatalogFormat::Yaml);
    ensure!(catalog.path == path);
    let title = catalog.tree.as_mapping().and_then(|map| map.get("title"));
    ensure!(title.and_then(Tree::as_str) == Some("Shop"));
    Ok(())
}

#[rstest]
#[case("en.yaml", "\u{feff}title: Shop\nnav:\n  home: Home\n")]
#[case("en.json", "\u{feff}{\"title\": \"Shop\", \"nav\": {\"home\": \"Home\"}}")]
fn byte_order_marks_are_stripped_before_parsing(#[case] name: &str, #[case] raw: &str) -> Result<()> {
    let dir = CatalogDir::new()?;
    let path = dir.write(name, raw)?;
    let catalog = load_catalog(&path)?;
    ensure!(!catalog.raw.starts_with('\u{feff}'), "raw text kept the mark");
    let title = catalog.tree.as_mapping().and_then(|map| map.get("title"));
    ensure!(title.and_then(Tree::as_str) == Some("Shop"));
    ensure!(catalog.tree.as_mapping().is_some_and(|map| map.contains_key("nav")));
    Ok(())
}

#[rstest]
#[case("en.yaml", "")]
#[case("en.yaml", "# only a comment\n")]
#[case("en.yaml", "~\n")]
#[case("en.json", "  \n")]
fn blank_documents_load_as_empty_mappings(#[case] name: &str, #[case] raw: &str) -> Result<()> {
    let catalog = parse_catalog(Utf8Path::new(name), raw.to_owned())?;
    ensure!(catalog.tree == Tree::empty(), "expected empty mapping");
    Ok(())
}

#[rstest]
#[case("en.yaml", "- a\n- b\n")]
#[case("en.yaml", "just text\n")]
#[case("en.json", "[1, 2]")]
fn non_mapping_roots_are_rejected(#[case] name: &str, #[case] raw: &str) {
    let err = parse_catalog(Utf8Path::new(name), raw.to_owned()).expect_err("non-mapping root");
    assert!(matches!(err, CatalogError::RootNotMapping { .. }), "{err}");
}

#[rstest]
#[case("en.yaml", "title: [unclosed\n")]
#[case("en.json", "{\"title\": ")]
fn malformed_documents_are_load_failures(#[case] name: &str, #[case] raw: &str) {
    let err = parse_catalog(Utf8Path::new(name), raw.to_owned()).expect_err("malformed");
    assert!(matches!(err, CatalogError::Parse { .. }), "{err}");
    assert!(err.to_string().contains(name));
}

#[rstest]
fn missing_files_are_load_failures() -> Result<()> {
    let dir = CatalogDir::new()?;
    let err = load_catalog(&dir.join("absent.yaml")).expect_err("missing file");
    ensure!(matches!(err, CatalogError::Read { .. }), "unexpected error {err}");
    Ok(())
}

#[rstest]
#[case("out.yaml")]
#[case("out.json")]
fn written_catalogs_load_back_unchanged(#[case] name: &str) -> Result<()> {
    let dir = CatalogDir::new()?;
    let source = parse_catalog(
        Utf8Path::new("source.yaml"),
        concat!(
            "title: Shop\n",
            "count: 3\n",
            "ratio: 0.5\n",
            "enabled: false\n",
            "nothing: ~\n",
            "quoted: 'yes'\n",
            "forms: [one, many]\n",
            "nested:\n",
            "  empty: {}\n",
        )
        .to_owned(),
    )?;
    let path = dir.join(name);
    write_catalog(&path, &source.tree)?;
    let reloaded = load_catalog(&path)?;
    ensure!(reloaded.tree == source.tree, "round trip changed the tree");
    Ok(())
}

#[rstest]
fn writing_replaces_existing_contents() -> Result<()> {
    let dir = CatalogDir::new()?;
    let path = dir.write("en.yaml", "a: 1\nb: 2\nc: 3\nd: 4\n")?;
    let smaller = parse_catalog(&path, "a: 1\n".to_owned())?;
    write_catalog(&path, &smaller.tree)?;
    ensure!(dir.read("en.yaml")? == "a: 1\n");
    Ok(())
}

#[rstest]
fn json_output_is_pretty_and_ordered() -> Result<()> {
    let source = parse_catalog(Utf8Path::new("en.yaml"), "z: 1\na: two\n".to_owned())?;
    let text = serialise(Utf8Path::new("en.json"), &source.tree)?;
    ensure!(text == "{\n  \"z\": 1,\n  \"a\": \"two\"\n}\n", "got {text:?}");
    Ok(())
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn non_finite_numbers_cannot_be_written_as_json(#[case] number: f64) {
    let mut entries = crate::tree::Mapping::new();
    entries.insert("ratio".to_owned(), Tree::from(number));
    let outcome = serialise(Utf8Path::new("en.json"), &Tree::Mapping(entries));
    assert!(matches!(outcome, Err(CatalogError::Serialise { .. })), "{outcome:?}");
}

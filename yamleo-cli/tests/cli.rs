//! End-to-end tests running the compiled `yamleo` binary.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use rstest::{fixture, rstest};
use test_helpers::catalog::CatalogDir;

const BASE: &str = "\
title: Shop
cart:
  empty: Your cart is empty
  checkout: Checkout
";

const TARGET: &str = "\
title: Boutique
extra: Only here
";

fn yamleo(dir: &CatalogDir) -> Command {
    #[expect(
        deprecated,
        clippy::expect_used,
        reason = "cargo_bin is the standard assert_cmd API and test panics are acceptable"
    )]
    let mut cmd = Command::cargo_bin("yamleo").expect("binary should exist");
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("RUST_BACKTRACE", "0")
        .env("NO_COLOR", "1");
    cmd
}

#[fixture]
fn catalogs() -> CatalogDir {
    let dir = CatalogDir::new().expect("create catalog directory");
    dir.write("en.yaml", BASE).expect("write base");
    dir.write("fr.yaml", TARGET).expect("write target");
    dir
}

#[rstest]
fn compare_lists_missing_keys_in_both_directions(catalogs: CatalogDir) {
    yamleo(&catalogs)
        .args(["compare", "en.yaml", "fr.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Missing keys in fr.yaml (present in en.yaml):\n - cart.empty\n - cart.checkout\n",
        ))
        .stdout(predicate::str::contains(
            "Missing keys in en.yaml (present in fr.yaml):\n - extra\n",
        ));
}

#[rstest]
fn compare_reports_duplicates(catalogs: CatalogDir) -> Result<()> {
    catalogs.write("dup.yaml", "home:\n  title: Home\nabout:\n  title: home\n")?;
    yamleo(&catalogs)
        .args(["compare", "dup.yaml", "dup.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No missing keys in dup.yaml."))
        .stdout(predicate::str::contains(
            "Duplicate keys found in dup.yaml:\n - title\n - home.title, about.title\n",
        ));
    Ok(())
}

#[rstest]
fn compare_prints_json_on_request(catalogs: CatalogDir) -> Result<()> {
    let output = yamleo(&catalogs)
        .args(["compare", "en.yaml", "fr.yaml", "--json"])
        .output()?;
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        report,
        serde_json::json!({
            "missingInTarget": ["cart.empty", "cart.checkout"],
            "missingInBase": ["extra"],
            "duplicatesInBase": [],
            "duplicatesInTarget": [],
        })
    );
    Ok(())
}

#[rstest]
fn compare_fails_when_a_catalog_is_missing(catalogs: CatalogDir) {
    yamleo(&catalogs)
        .args(["compare", "en.yaml", "absent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.yaml"));
}

#[rstest]
fn compare_rejects_unsupported_extensions(catalogs: CatalogDir) -> Result<()> {
    catalogs.write("en.toml", "title = 'Shop'\n")?;
    yamleo(&catalogs)
        .args(["compare", "en.toml", "fr.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("en.toml"));
    Ok(())
}

#[rstest]
fn sort_rewrites_the_catalog_in_place(catalogs: CatalogDir) -> Result<()> {
    catalogs.write("messy.json", r#"{"b": {"z": "1", "a": "2"}, "a": "3"}"#)?;
    yamleo(&catalogs).args(["sort", "messy.json"]).assert().success();
    assert_eq!(
        catalogs.read("messy.json")?,
        "{\n  \"a\": \"3\",\n  \"b\": {\n    \"a\": \"2\",\n    \"z\": \"1\"\n  }\n}\n"
    );
    Ok(())
}

#[rstest]
fn sync_adds_marked_keys_to_the_target(catalogs: CatalogDir) -> Result<()> {
    yamleo(&catalogs)
        .args(["sync", "en.yaml", "fr.yaml"])
        .assert()
        .success();
    assert_eq!(
        catalogs.read("fr.yaml")?,
        "title: Boutique\nextra: Only here\ncart:\n  empty: empty TMP\n  checkout: checkout TMP\n"
    );
    Ok(())
}

#[rstest]
fn sync_marker_comes_from_flag_then_environment_then_file(catalogs: CatalogDir) -> Result<()> {
    catalogs.write("yamleo.toml", "marker = \" (file)\"\n")?;
    catalogs.write("a.yaml", "x: hello\n")?;

    catalogs.write("b.yaml", "{}\n")?;
    yamleo(&catalogs).args(["sync", "a.yaml", "b.yaml"]).assert().success();
    assert_eq!(catalogs.read("b.yaml")?, "x: x (file)\n");

    catalogs.write("b.yaml", "{}\n")?;
    yamleo(&catalogs)
        .env("YAMLEO_MARKER", "-env")
        .args(["sync", "a.yaml", "b.yaml"])
        .assert()
        .success();
    assert_eq!(catalogs.read("b.yaml")?, "x: x-env\n");

    catalogs.write("b.yaml", "{}\n")?;
    yamleo(&catalogs)
        .env("YAMLEO_MARKER", "-env")
        .args(["sync", "a.yaml", "b.yaml", "--marker", "-flag"])
        .assert()
        .success();
    assert_eq!(catalogs.read("b.yaml")?, "x: x-flag\n");
    Ok(())
}

#[rstest]
fn spreadsheet_round_trip_restores_the_catalog(catalogs: CatalogDir) -> Result<()> {
    yamleo(&catalogs)
        .args(["to-excel", "en.yaml", "en.xlsx"])
        .assert()
        .success();
    yamleo(&catalogs)
        .args(["from-excel", "en.xlsx", "copy.yaml"])
        .assert()
        .success();
    assert_eq!(catalogs.read("copy.yaml")?, BASE);
    Ok(())
}

#[rstest]
fn from_excel_fails_for_invalid_workbooks(catalogs: CatalogDir) -> Result<()> {
    catalogs.write("broken.xlsx", "plain text")?;
    yamleo(&catalogs)
        .args(["from-excel", "broken.xlsx", "out.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.xlsx"));
    Ok(())
}

#[fixture]
fn project() -> CatalogDir {
    let dir = CatalogDir::new().expect("create project directory");
    dir.write("en.yaml", BASE).expect("write catalog");
    dir.write("src/App.vue", "<p>{{ t('title') }}</p>")
        .expect("write App.vue");
    dir.write("src/cart/Cart.ts", "t('cart.checkout')")
        .expect("write Cart.ts");
    dir
}

#[rstest]
fn unused_prints_a_preview(project: CatalogDir) {
    yamleo(&project)
        .args(["unused", "en.yaml", "src"])
        .assert()
        .success()
        .stdout(" - cart.empty\n");
}

#[rstest]
fn unused_truncates_long_previews(project: CatalogDir) {
    yamleo(&project)
        .env("YAMLEO_AUDIT__PREVIEW_LIMIT", "0")
        .args(["unused", "en.yaml", "src"])
        .assert()
        .success()
        .stdout("... and 1 more.\n");
}

#[rstest]
fn unused_writes_the_list_to_a_file(project: CatalogDir) -> Result<()> {
    project.write("src/Other.js", "")?;
    project.write("en.yaml", "unusedOne: A\nunusedTwo: B\ntitle: T\n")?;
    yamleo(&project)
        .args(["unused", "en.yaml", "src", "--output", "unused.txt"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(project.read("unused.txt")?, "unusedOne\nunusedTwo");
    Ok(())
}

#[rstest]
fn unused_delete_prunes_the_catalog(project: CatalogDir) -> Result<()> {
    yamleo(&project)
        .args(["unused", "en.yaml", "src", "--delete"])
        .assert()
        .success();
    assert_eq!(
        project.read("en.yaml")?,
        "title: Shop\ncart:\n  checkout: Checkout\n"
    );
    Ok(())
}

#[rstest]
fn unused_without_sources_leaves_the_catalog_alone(project: CatalogDir) -> Result<()> {
    yamleo(&project)
        .env("YAMLEO_AUDIT__EXTENSIONS", "[svelte]")
        .args(["unused", "en.yaml", "src", "--delete"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(project.read("en.yaml")?, BASE);
    Ok(())
}

#[rstest]
fn indexed_arrays_compare_element_paths(catalogs: CatalogDir) -> Result<()> {
    catalogs.write("a.yaml", "forms:\n  - one\n  - two\n")?;
    catalogs.write("b.yaml", "forms:\n  - un\n")?;
    yamleo(&catalogs)
        .args(["--arrays", "indexed", "compare", "a.yaml", "b.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" - forms.1\n"));
    yamleo(&catalogs)
        .args(["compare", "a.yaml", "b.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No missing keys in b.yaml."));
    Ok(())
}

#[rstest]
fn missing_config_file_is_an_error(catalogs: CatalogDir) {
    yamleo(&catalogs)
        .args(["--config", "absent.toml", "compare", "en.yaml", "fr.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

#[rstest]
fn help_lists_every_subcommand(catalogs: CatalogDir) -> Result<()> {
    let output = yamleo(&catalogs).arg("--help").output()?;
    assert!(output.status.success());
    let help = String::from_utf8(output.stdout)?;
    for name in ["compare", "sort", "sync", "to-excel", "from-excel", "unused"] {
        assert!(help.contains(name), "help does not mention {name}");
    }
    Ok(())
}

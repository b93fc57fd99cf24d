//! Integration tests for the sweep over real directory trees
//!
//! Each test lays out a small asset tree on disk, sweeps it from a set of
//! roots and checks which files end up reported as unused.

use assetsweep::{sweep_tree, Config, RelativePath, SweepError, SweepOutcome, TreeRoot};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn tree(files: &[(&str, &[u8])]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, contents) in files {
        write(dir.path(), rel, contents);
    }
    dir
}

fn config_with_roots(roots: &[&str]) -> Config {
    Config {
        roots: roots.iter().map(|r| r.to_string()).collect(),
        ..Config::default()
    }
}

fn sweep(dir: &TempDir, roots: &[&str]) -> SweepOutcome {
    sweep_tree(&TreeRoot::new(dir.path()), &config_with_roots(roots)).unwrap()
}

fn unused(outcome: &SweepOutcome) -> Vec<&str> {
    outcome.unreached.iter().map(|p| p.as_str()).collect()
}

fn rel(raw: &str) -> RelativePath {
    RelativePath::parse(raw).unwrap()
}

#[test]
fn test_plain_text_reference() {
    let dir = tree(&[
        ("A.txt", b"\"material\" \"MATERIALS\\B.vmt\"".as_slice()),
        ("materials/B.vmt", b"".as_slice()),
        ("C.txt", b"".as_slice()),
    ]);

    let outcome = sweep(&dir, &["A.txt"]);

    assert_eq!(unused(&outcome), vec!["C.txt"]);
    assert!(outcome.reached.contains_key("materials\\b.vmt"));
}

#[test]
fn test_model_implies_mesh_and_physics_files() {
    let dir = tree(&[
        ("models/foo.mdl", b"IDST\x30\x00\x00\x00".as_slice()),
        ("models/foo.phy", b"".as_slice()),
        ("models/foo.vvd", b"".as_slice()),
        ("models/foo.dx80.vtx", b"".as_slice()),
        ("models/foo.dx90.vtx", b"".as_slice()),
        ("models/foo.sw.vtx", b"".as_slice()),
        ("models/foo.ani", b"".as_slice()),
    ]);

    let outcome = sweep(&dir, &["models/foo.mdl"]);

    assert_eq!(unused(&outcome), vec!["models\\foo.ani"]);
}

#[test]
fn test_changelogs_reached_but_not_scanned() {
    let dir = tree(&[
        ("hc_changelog.txt", b"v1: initial release".as_slice()),
        ("hc_changelog_chris.txt", b"fixed scripts/orphan.txt".as_slice()),
        ("hc_changelog_dky.txt", b"".as_slice()),
        ("hc_changelog_jeff.txt", b"".as_slice()),
        ("scripts/orphan.txt", b"".as_slice()),
    ]);

    let outcome = sweep(&dir, &["hc_changelog.txt"]);

    assert_eq!(unused(&outcome), vec!["scripts\\orphan.txt"]);
    assert_eq!(outcome.scanned, vec![rel("hc_changelog.txt")]);
}

#[test]
fn test_model_skin_materials() {
    let dir = tree(&[
        ("root.txt", b"models/props/foo.mdl".as_slice()),
        (
            "models/props/foo.mdl",
            b"IDST\x30\x00\x00\x00\x01\x02\x00skin1\x00skin2\x00models\\props\\foo\x00".as_slice(),
        ),
        ("materials/props/foo/skin1.vmt", b"".as_slice()),
        ("materials/props/bar/skin1.vmt", b"".as_slice()),
    ]);

    let outcome = sweep(&dir, &["root.txt"]);

    assert_eq!(unused(&outcome), vec!["materials\\props\\bar\\skin1.vmt"]);
}

#[test]
fn test_texture_shorthand() {
    let dir = tree(&[
        ("materials/metal/wall.vmt", b"\"LightmappedGeneric\" { \"$basetexture\" \"Metal/Wall\" }".as_slice()),
        ("materials/metal/wall.vtf", b"VTF\x00 materials/metal/unused.vmt".as_slice()),
        ("materials/metal/unused.vmt", b"".as_slice()),
    ]);

    let outcome = sweep(&dir, &["materials/metal/wall.vmt"]);

    // The texture is reached, but never scanned for the path it contains
    assert_eq!(unused(&outcome), vec!["materials\\metal\\unused.vmt"]);
    assert!(outcome.reached.contains_key("materials\\metal\\wall.vtf"));
}

#[test]
fn test_sound_shorthand_and_map_artifacts() {
    let dir = tree(&[
        ("maps/src/hc_t0a0.vmf", b"\"message\" \"ambient/wind.wav\"".as_slice()),
        ("maps/hc_t0a0.bsp", b"".as_slice()),
        ("maps/graphs/hc_t0a0.ain", b"".as_slice()),
        ("maps/soundcache/hc_t0a0.cache", b"".as_slice()),
        ("maps/hc_t0a1.bsp", b"".as_slice()),
        ("sound/ambient/wind.wav", b"".as_slice()),
    ]);

    let outcome = sweep(&dir, &["maps/src/hc_t0a0.vmf"]);

    assert_eq!(unused(&outcome), vec!["maps\\hc_t0a1.bsp"]);
}

#[test]
fn test_version_control_directories_are_ignored() {
    let dir = tree(&[
        ("root.txt", b"".as_slice()),
        (".svn/entries", b"".as_slice()),
        ("scripts/.svn/text-base/a.txt.svn-base", b"".as_slice()),
    ]);

    let outcome = sweep(&dir, &["root.txt"]);

    assert!(outcome.unreached.is_empty());
    assert_eq!(outcome.total_files(), 1);
}

#[test]
fn test_partition_covers_universe() {
    let dir = tree(&[
        ("a.txt", b"b.txt".as_slice()),
        ("b.txt", b"sound/x.wav".as_slice()),
        ("sound/x.wav", b"".as_slice()),
        ("c.txt", b"a.txt".as_slice()),
        ("d/e.txt", b"".as_slice()),
    ]);

    let outcome = sweep(&dir, &["a.txt"]);

    assert_eq!(outcome.total_files(), 5);
    for path in &outcome.unreached {
        assert!(!outcome.reached.contains_key(&path.key()));
    }
    // Never more scans than files
    assert!(outcome.scanned.len() <= outcome.total_files());
    assert_eq!(unused(&outcome), vec!["c.txt", "d\\e.txt"]);
}

#[test]
fn test_sweep_is_idempotent() {
    let dir = tree(&[
        ("a.txt", b"b.txt materials/m.vmt".as_slice()),
        ("b.txt", b"".as_slice()),
        ("materials/m.vmt", b"\"$basetexture\" \"m\"".as_slice()),
        ("materials/m.vtf", b"".as_slice()),
        ("x.txt", b"".as_slice()),
        ("y.txt", b"".as_slice()),
    ]);

    let first = sweep(&dir, &["a.txt"]);
    let second = sweep(&dir, &["a.txt"]);

    assert_eq!(first.unreached, second.unreached);
    assert_eq!(unused(&first), vec!["x.txt", "y.txt"]);
}

#[test]
fn test_missing_root_aborts() {
    let dir = tree(&[("a.txt", b"".as_slice())]);

    let err = sweep_tree(&TreeRoot::new(dir.path()), &config_with_roots(&["nope.txt"])).unwrap_err();

    assert!(matches!(err, SweepError::MissingRoot(_)));
}

#[test]
fn test_no_roots_aborts() {
    let dir = tree(&[("a.txt", b"".as_slice())]);

    let err = sweep_tree(&TreeRoot::new(dir.path()), &Config::default()).unwrap_err();

    assert!(matches!(err, SweepError::NoRoots));
}

#[test]
fn test_config_and_report_in_tree_are_not_assets() {
    let dir = tree(&[
        ("root.txt", b"".as_slice()),
        ("orphan.txt", b"".as_slice()),
        ("assetsweep.yml", b"roots: [root.txt]\n".as_slice()),
    ]);
    let base = fs::canonicalize(dir.path()).unwrap();
    write(&base, "reports/unused.txt", b"orphan.txt");

    let mut config = Config::from_file(&base.join("assetsweep.yml")).unwrap();
    config.report.output = base.join("reports").join("unused.txt");

    let outcome = sweep_tree(&TreeRoot::new(&base), &config).unwrap();

    assert_eq!(unused(&outcome), vec!["orphan.txt"]);
    assert_eq!(outcome.total_files(), 2);
}

#[test]
fn test_config_listed_as_root_is_still_reached() {
    let dir = tree(&[
        ("assetsweep.yml", b"roots: [assetsweep.yml, scripts/titles.txt]\n".as_slice()),
        ("scripts/titles.txt", b"".as_slice()),
    ]);
    let base = fs::canonicalize(dir.path()).unwrap();

    let config = Config::from_file(&base.join("assetsweep.yml")).unwrap();
    let outcome = sweep_tree(&TreeRoot::new(&base), &config).unwrap();

    assert!(outcome.unreached.is_empty());
    assert!(outcome.reached.contains_key("assetsweep.yml"));
}

#[test]
fn test_directory_qualified_exclude() {
    let dir = tree(&[
        ("root.txt", b"".as_slice()),
        ("maps/old.bak", b"".as_slice()),
        ("materials/dev/grid.vmt", b"".as_slice()),
        ("sound/old.bak", b"".as_slice()),
    ]);

    let config = Config {
        exclude: vec!["maps/*.bak".to_string(), "materials/dev/*".to_string()],
        ..config_with_roots(&["root.txt"])
    };
    let outcome = sweep_tree(&TreeRoot::new(dir.path()), &config).unwrap();

    assert_eq!(unused(&outcome), vec!["sound\\old.bak"]);
}

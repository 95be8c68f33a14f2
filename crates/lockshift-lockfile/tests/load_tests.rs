//! Loading real-shaped pnpm lockfiles and converting them end to end.

use std::fs;

use lockshift_graph::{DepPath, PackageLock, ProjectMetadata, Warning, convert};
use lockshift_lockfile::{
    LoadOptions, LockfileError, load_lockfile, parse_lockfile, read_manifest,
};
use tempfile::TempDir;

const V5: &str = include_str!("fixtures/v5.yaml");
const V6: &str = include_str!("fixtures/v6.yaml");
const WORKSPACE: &str = include_str!("fixtures/workspace.yaml");

#[test]
fn test_v5_lockfile_parses() {
    let lockfile = parse_lockfile(V5, &LoadOptions::default()).unwrap();

    assert_eq!(lockfile.graph.lockfile_version(), Some("5.4"));
    assert_eq!(lockfile.graph.len(), 10);

    let roots: Vec<&str> = lockfile.roots.keys().map(String::as_str).collect();
    assert_eq!(
        roots,
        vec!["left-pad", "react", "react-dom", "string-width-cjs", "typescript"]
    );

    let react_dom = lockfile
        .graph
        .get(&DepPath::parse("/react-dom/17.0.2_react@17.0.2").unwrap())
        .unwrap();
    assert!(react_dom.is_peer("react"));
    assert_eq!(react_dom.name, "react-dom");
    assert_eq!(react_dom.version, "17.0.2");
}

#[test]
fn test_v5_lockfile_converts_flat() {
    let lockfile = parse_lockfile(V5, &LoadOptions::default()).unwrap();
    let conversion = convert(
        &lockfile.graph,
        &lockfile.roots,
        ProjectMetadata::new("app", "1.0.0"),
    )
    .unwrap();
    let tree = &conversion.tree;

    assert!(conversion.warnings.is_empty());
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.node_count(), 10);

    let react_dom = &tree.dependencies["react-dom"];
    assert_eq!(react_dom.requires.get("react").map(String::as_str), Some("17.0.2"));
    assert!(react_dom.dependencies.is_empty());

    assert!(tree.dependencies["typescript"].dev);
    assert!(!tree.dependencies["react"].dev);
    assert_eq!(
        tree.dependencies["string-width-cjs"].version,
        "npm:string-width@4.2.3"
    );
    assert_eq!(
        tree.dependencies["left-pad"].resolved.as_deref(),
        Some("https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz")
    );
}

#[test]
fn test_v6_lockfile_converts_with_conflict_and_links() {
    let lockfile = parse_lockfile(V6, &LoadOptions::default()).unwrap();
    assert_eq!(lockfile.graph.lockfile_version(), Some("6.0"));

    let conversion = convert(
        &lockfile.graph,
        &lockfile.roots,
        ProjectMetadata::new("app", "1.0.0"),
    )
    .unwrap();
    let tree = &conversion.tree;

    assert_eq!(tree.dependencies["left-pad"].version, "1.3.0");
    assert_eq!(
        tree.find(&["@scope/util", "left-pad"]).map(|n| n.version.as_str()),
        Some("1.0.0")
    );

    let shared = &tree.dependencies["shared"];
    assert_eq!(shared.version, "file:../shared");
    assert!(shared.resolved.is_none());

    let my_lib = &tree.dependencies["my-lib"];
    assert_eq!(my_lib.version, "0.1.0");
    assert_eq!(
        my_lib.resolved.as_deref(),
        Some("https://codeload.github.com/user/my-lib/tar.gz/abc123")
    );

    let json = PackageLock::from_tree(tree).to_json().unwrap();
    assert!(json.contains("\"lockfileVersion\": 1"));
    assert!(json.contains("\"version\": \"file:../shared\""));
}

#[test]
fn test_custom_registry_for_derived_tarballs() {
    let options = LoadOptions {
        registry: "https://npm.example.com/".to_string(),
    };
    let lockfile = parse_lockfile(V6, &options).unwrap();
    let (_, snapshot) = lockfile.graph.lookup("left-pad", "1.3.0").unwrap();
    assert_eq!(
        snapshot.resolution.locator().as_deref(),
        Some("https://npm.example.com/left-pad/-/left-pad-1.3.0.tgz")
    );
}

#[test]
fn test_workspace_importers_merge_roots() {
    let lockfile = parse_lockfile(WORKSPACE, &LoadOptions::default()).unwrap();
    let roots: Vec<(&str, &str)> = lockfile
        .roots
        .iter()
        .map(|(name, id)| (name.as_str(), id.as_str()))
        .collect();
    assert_eq!(
        roots,
        vec![
            ("a", "1.0.0"),
            ("web", "link:packages/web"),
            ("b", "1.0.0"),
            ("shared", "link:packages/shared"),
        ]
    );

    let conversion = convert(
        &lockfile.graph,
        &lockfile.roots,
        ProjectMetadata::new("monorepo", "0.0.1"),
    )
    .unwrap();
    let tree = &conversion.tree;
    assert_eq!(tree.node_count(), 4);
    assert_eq!(tree.dependencies["web"].version, "file:packages/web");
    // `../shared` as seen from packages/web
    assert_eq!(tree.dependencies["shared"].version, "file:packages/shared");
}

#[test]
fn test_newer_lockfile_version_warns() {
    let text = V6.replace("lockfileVersion: '6.0'", "lockfileVersion: '6.1'");
    let lockfile = parse_lockfile(&text, &LoadOptions::default()).unwrap();
    let conversion = convert(
        &lockfile.graph,
        &lockfile.roots,
        ProjectMetadata::new("app", "1.0.0"),
    )
    .unwrap();
    assert!(matches!(
        conversion.warnings.as_slice(),
        [Warning::UnsupportedLockVersion { found, .. }] if found == "6.1"
    ));
}

#[test]
fn test_load_from_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pnpm-lock.yaml"), WORKSPACE).unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "monorepo", "version": "0.0.1", "private": true}"#,
    )
    .unwrap();

    let lockfile = load_lockfile(dir.path(), &LoadOptions::default()).unwrap();
    assert_eq!(lockfile.roots.len(), 4);

    let metadata = read_manifest(dir.path()).unwrap().into_metadata();
    assert_eq!(metadata, ProjectMetadata::new("monorepo", "0.0.1"));
}

#[test]
fn test_missing_lockfile() {
    let dir = TempDir::new().unwrap();
    let err = load_lockfile(dir.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LockfileError::LockfileNotFound(_)));
    assert!(err.to_string().starts_with("pnpm lockfile not found"));
}

#[test]
fn test_missing_manifest_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_manifest(dir.path()).unwrap_err();
    assert!(matches!(err, LockfileError::Io { .. }));
}

#[test]
fn test_malformed_package_key() {
    let text = "lockfileVersion: 5.4\npackages:\n  /lodash:\n    resolution: {integrity: sha512-x}\n";
    let err = parse_lockfile(text, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LockfileError::Convert(_)));
}

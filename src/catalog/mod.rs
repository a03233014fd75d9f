//! The package being browsed: its snippet groups and test targets.
//!
//! Snippets are `.rs` files under the snippets directory (`snippets/` by
//! default). Files at the top level form one group named after that
//! directory; every subdirectory is a group of its own, explained by an
//! optional `README.md`.
//!
//! A snippet is runnable when cargo knows it as an example: either an
//! `[[example]]` entry whose `path` points at the file, or a file cargo
//! discovers on its own under `examples/`.

pub mod snippet;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::defaults::Defaults;
use crate::errors::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub name: String,
    pub path: PathBuf,
    /// Cargo example target that runs this snippet.
    pub example: Option<String>,
    pub explanation: String,
    #[serde(rename = "presentationCode")]
    pub presentation_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetGroup {
    pub name: String,
    pub explanation: String,
    pub snippets: Vec<Snippet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    pub root: PathBuf,
    #[serde(rename = "snippetGroups")]
    pub snippet_groups: Vec<SnippetGroup>,
    #[serde(rename = "testTargets")]
    pub test_targets: Vec<String>,
}

#[derive(Deserialize)]
struct Manifest {
    package: Option<ManifestPackage>,
    #[serde(default)]
    test: Vec<ManifestTarget>,
    #[serde(default)]
    example: Vec<ManifestTarget>,
}

#[derive(Deserialize)]
struct ManifestPackage {
    name: Option<String>,
    autoexamples: Option<bool>,
}

#[derive(Deserialize)]
struct ManifestTarget {
    name: Option<String>,
    path: Option<String>,
}

/// Snippet file, relative to the package root, to the example target that runs it.
#[derive(Debug, Default)]
struct ExampleTargets {
    by_path: BTreeMap<PathBuf, String>,
    auto_discover: bool,
}

impl ExampleTargets {
    fn from_manifest(declared: Vec<ManifestTarget>, auto_discover: bool) -> Self {
        let by_path = declared
            .into_iter()
            .filter_map(|t| {
                let name = t.name?;
                let path = t.path.unwrap_or_else(|| format!("examples/{name}.rs"));
                Some((normalize(Path::new(&path)), name))
            })
            .collect();
        Self { by_path, auto_discover }
    }

    fn target_for(&self, relative: &Path) -> Option<String> {
        let relative = normalize(relative);
        if let Some(name) = self.by_path.get(&relative) {
            return Some(name.clone());
        }
        if !self.auto_discover {
            return None;
        }
        // Cargo picks up `examples/<name>.rs` and `examples/<name>/main.rs`.
        let parts: Vec<String> =
            relative.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        match parts.as_slice() {
            [dir, file] if dir == "examples" => Some(stem(Path::new(file))),
            [dir, name, file] if dir == "examples" && file == "main.rs" => Some(name.clone()),
            _ => None,
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path)
        .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_rust_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rs")
}

fn stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Resolve the package at `root`.
pub fn load(root: &Path, snippets_dir: &str) -> Result<Package, CatalogError> {
    let manifest_path = root.join(Defaults::MANIFEST);
    let manifest: Manifest = toml::from_str(&read(&manifest_path)?)
        .map_err(|source| CatalogError::Manifest { path: manifest_path.clone(), source })?;

    let package = manifest
        .package
        .ok_or_else(|| CatalogError::MissingPackageName { path: manifest_path.clone() })?;
    let name = package
        .name
        .ok_or_else(|| CatalogError::MissingPackageName { path: manifest_path.clone() })?;

    let mut test_targets: BTreeSet<String> =
        manifest.test.into_iter().filter_map(|t| t.name).collect();
    test_targets.extend(test_files(&root.join(Defaults::TESTS_DIR))?);

    let examples =
        ExampleTargets::from_manifest(manifest.example, package.autoexamples.unwrap_or(true));
    let snippet_groups = load_groups(root, &root.join(snippets_dir), &examples)?;
    tracing::debug!(
        package = %name,
        groups = snippet_groups.len(),
        test_targets = test_targets.len(),
        "loaded catalog"
    );

    Ok(Package {
        name,
        root: root.to_path_buf(),
        snippet_groups,
        test_targets: test_targets.into_iter().collect(),
    })
}

fn test_files(dir: &Path) -> Result<Vec<String>, CatalogError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    let walker =
        WalkDir::new(dir).min_depth(1).max_depth(1).into_iter().filter_entry(|e| !is_hidden(e));
    for entry in walker {
        let entry =
            entry.map_err(|source| CatalogError::Walk { path: dir.to_path_buf(), source })?;
        if entry.file_type().is_file() && is_rust_source(entry.path()) {
            names.push(stem(entry.path()));
        }
    }
    Ok(names)
}

fn load_groups(
    root: &Path,
    dir: &Path,
    examples: &ExampleTargets,
) -> Result<Vec<SnippetGroup>, CatalogError> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "no snippets directory");
        return Ok(Vec::new());
    }

    // Group directory -> snippets inside it.
    let mut grouped: BTreeMap<PathBuf, Vec<Snippet>> = BTreeMap::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry =
            entry.map_err(|source| CatalogError::Walk { path: dir.to_path_buf(), source })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_rust_source(path) {
            continue;
        }
        let parsed = snippet::parse(&read(path)?);
        let example = examples.target_for(path.strip_prefix(root).unwrap_or(path));
        if example.is_none() {
            tracing::debug!(snippet = %path.display(), "no example target");
        }
        let group_dir = path.parent().unwrap_or(dir).to_path_buf();
        grouped.entry(group_dir).or_default().push(Snippet {
            name: stem(path),
            path: path.to_path_buf(),
            example,
            explanation: parsed.explanation,
            presentation_code: parsed.presentation_code,
        });
    }

    let mut groups = Vec::with_capacity(grouped.len());
    for (group_dir, snippets) in grouped {
        let readme = group_dir.join(Defaults::GROUP_README);
        let explanation =
            if readme.is_file() { read(&readme)?.trim().to_string() } else { String::new() };
        let name =
            group_dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        groups.push(SnippetGroup {
            name,
            explanation,
            snippets,
        });
    }
    groups.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(groups)
}

impl Package {
    pub fn total_snippets(&self) -> usize {
        self.snippet_groups.iter().map(|g| g.snippets.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, body: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, body).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "Cargo.toml",
            concat!(
                "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n\n",
                "[[test]]\nname = \"api\"\npath = \"it/api.rs\"\n\n",
                "[[example]]\nname = \"basics-vars\"\npath = \"./snippets/basics/a_vars.rs\"\n\n",
                "[[example]]\nname = \"hello\"\npath = \"snippets/hello.rs\"\n",
            ),
        );
        write(root, "tests/smoke.rs", "#[test] fn ok() {}\n");
        write(root, "tests/.scratch.rs", "");
        write(root, "snippets/hello.rs", "//! Says hello.\nfn main() { println!(\"hi\"); }\n");
        write(root, "snippets/basics/README.md", "Getting started.\n");
        write(root, "snippets/basics/b_loop.rs", "fn main() { for _ in 0..2 {} }\n");
        write(
            root,
            "snippets/basics/a_vars.rs",
            concat!(
                "//! Variables.\n",
                "// MARK: Hide\nuse std::fmt;\n// MARK: Show\n",
                "fn main() { let x = 1; }\n",
            ),
        );
        write(root, "snippets/basics/notes.txt", "not a snippet");
        write(root, "snippets/empty/README.md", "Nothing here.");
        write(root, "snippets/.hidden/secret.rs", "fn main() {}");
        dir
    }

    #[test]
    fn loads_groups_snippets_and_test_targets() {
        let dir = fixture();
        let pkg = load(dir.path(), "snippets").unwrap();

        assert_eq!(pkg.name, "demo");
        assert_eq!(pkg.test_targets, vec!["api".to_string(), "smoke".to_string()]);

        let names: Vec<&str> = pkg.snippet_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["basics", "snippets"]);

        let basics = &pkg.snippet_groups[0];
        assert_eq!(basics.explanation, "Getting started.");
        let snippet_names: Vec<&str> = basics.snippets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(snippet_names, vec!["a_vars", "b_loop"]);
        assert_eq!(basics.snippets[0].explanation, "Variables.");
        assert_eq!(basics.snippets[0].presentation_code, "fn main() { let x = 1; }");

        assert_eq!(pkg.snippet_groups[1].snippets[0].explanation, "Says hello.");
        assert_eq!(pkg.total_snippets(), 3);
    }

    #[test]
    fn snippets_map_to_their_declared_example_targets() {
        let dir = fixture();
        let pkg = load(dir.path(), "snippets").unwrap();

        let targets: Vec<(&str, Option<&str>)> = pkg
            .snippet_groups
            .iter()
            .flat_map(|g| &g.snippets)
            .map(|s| (s.name.as_str(), s.example.as_deref()))
            .collect();
        assert_eq!(
            targets,
            vec![("a_vars", Some("basics-vars")), ("b_loop", None), ("hello", Some("hello"))]
        );
    }

    #[test]
    fn snippets_under_examples_are_discovered_like_cargo_does() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "Cargo.toml", "[package]\nname = \"demo\"\n");
        write(root, "examples/first.rs", "fn main() {}\n");
        write(root, "examples/server/main.rs", "fn main() {}\n");
        write(root, "examples/server/util.rs", "pub fn help() {}\n");

        let pkg = load(root, "examples").unwrap();
        let targets: Vec<(&str, Option<&str>)> = pkg
            .snippet_groups
            .iter()
            .flat_map(|g| &g.snippets)
            .map(|s| (s.name.as_str(), s.example.as_deref()))
            .collect();
        assert_eq!(
            targets,
            vec![("first", Some("first")), ("main", Some("server")), ("util", None)]
        );

        write(root, "Cargo.toml", "[package]\nname = \"demo\"\nautoexamples = false\n");
        let pkg = load(root, "examples").unwrap();
        assert!(pkg.snippet_groups.iter().flat_map(|g| &g.snippets).all(|s| s.example.is_none()));
    }

    #[test]
    fn missing_snippets_directory_means_no_groups() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Cargo.toml", "[package]\nname = \"bare\"\n");
        let pkg = load(dir.path(), "snippets").unwrap();
        assert!(pkg.snippet_groups.is_empty());
        assert!(pkg.test_targets.is_empty());
    }

    #[test]
    fn manifest_errors_are_typed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load(dir.path(), "snippets"), Err(CatalogError::Read { .. })));

        write(dir.path(), "Cargo.toml", "[package\n");
        assert!(matches!(load(dir.path(), "snippets"), Err(CatalogError::Manifest { .. })));

        write(dir.path(), "Cargo.toml", "[workspace]\nmembers = []\n");
        assert!(matches!(
            load(dir.path(), "snippets"),
            Err(CatalogError::MissingPackageName { .. })
        ));
    }
}

//! End-to-end discovery scenarios against real directory trees

use llmcontext::config::{self, CONFIG_FILENAME};
use llmcontext::scan::DiscoveryEngine;
use llmcontext::{
    DiscoveredFile, GitignoreMatcher, Policy, PolicyOverrides, ProgressTracker, aggregate,
    discover,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Resolve config and gitignore the same way the CLI does, then walk
fn run_discovery(root: &Path) -> Vec<String> {
    let policy = config::resolve(root);
    let gitignore = GitignoreMatcher::load(root).unwrap();
    discover(root, &policy, gitignore.as_ref())
        .unwrap()
        .into_iter()
        .map(|file| file.relative_path)
        .collect()
}

#[test]
fn test_vcs_directory_is_pruned() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a.py", "print(1)");
    write(temp.path(), ".git/config", "[core]");

    assert_eq!(run_discovery(temp.path()), vec!["a.py"]);
}

#[test]
fn test_key_files_excluded_without_gitignore() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "secrets.key", "-----BEGIN-----");

    assert!(run_discovery(temp.path()).is_empty());
}

#[test]
fn test_gitignore_excludes_matching_files() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".gitignore", "*.log\n");
    write(temp.path(), "run.log", "started");
    write(temp.path(), "app.py", "main()");

    assert_eq!(run_discovery(temp.path()), vec!["app.py"]);
}

#[test]
fn test_allowed_extension_overrides_ignore_rules() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        CONFIG_FILENAME,
        "[tool.llmcontext]\nallowed_extensions = [\".env\"]\nignored_files = [\"*.env\"]\n",
    );
    write(temp.path(), "secrets.env", "TOKEN=abc");
    write(temp.path(), ".gitignore", "secrets.env\n");

    assert_eq!(run_discovery(temp.path()), vec!["secrets.env"]);
}

#[test]
fn test_allowed_dirs_restricts_to_prefix() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        CONFIG_FILENAME,
        "[tool.llmcontext]\nallowed_dirs = [\"src/\"]\n",
    );
    write(temp.path(), "src/main.go", "package main");
    write(temp.path(), "tools/build.go", "package tools");

    assert_eq!(run_discovery(temp.path()), vec!["src/main.go"]);
}

#[test]
fn test_allowed_dirs_still_admits_force_allowed_files() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        CONFIG_FILENAME,
        "[tool.llmcontext]\nallowed_dirs = [\"src/\"]\nallowed_files = [\"tools/build.go\"]\n",
    );
    write(temp.path(), "src/main.go", "package main");
    write(temp.path(), "tools/build.go", "package tools");
    write(temp.path(), "tools/other.go", "package tools");

    assert_eq!(
        run_discovery(temp.path()),
        vec!["src/main.go", "tools/build.go"]
    );
}

#[test]
fn test_pruned_directory_hides_force_allowed_files() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        CONFIG_FILENAME,
        "[tool.llmcontext]\nallowed_extensions = [\".js\"]\nallowed_files = [\"node_modules/pkg/index.js\"]\n",
    );
    write(temp.path(), "node_modules/pkg/index.js", "module.exports = 1");
    write(temp.path(), "web/app.js", "start()");

    assert_eq!(run_discovery(temp.path()), vec!["web/app.js"]);
}

#[test]
fn test_gitignored_directory_is_pruned_for_force_allow_too() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        CONFIG_FILENAME,
        "[tool.llmcontext]\nallowed_extensions = [\".py\"]\n",
    );
    write(temp.path(), ".gitignore", "generated/\n");
    write(temp.path(), "generated/models.py", "");
    write(temp.path(), "app.py", "");

    assert_eq!(run_discovery(temp.path()), vec!["app.py"]);
}

#[test]
fn test_gitignore_negation() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".gitignore", "*.txt\n!keep.txt\n");
    write(temp.path(), "drop.txt", "");
    write(temp.path(), "keep.txt", "");

    assert_eq!(run_discovery(temp.path()), vec!["keep.txt"]);
}

#[test]
fn test_ignored_dirs_from_config_match_relative_paths() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        CONFIG_FILENAME,
        "[tool.llmcontext]\nignored_dirs = [\"src/vendor\"]\n",
    );
    write(temp.path(), "src/vendor/lib.c", "");
    write(temp.path(), "src/main.c", "");
    write(temp.path(), "vendor/keep.c", "");

    assert_eq!(run_discovery(temp.path()), vec!["src/main.c", "vendor/keep.c"]);
}

#[test]
fn test_bracketed_entries_match_exact_paths() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        CONFIG_FILENAME,
        "[tool.llmcontext]\n\
         ignored_files = [\"pages/[id].tsx\"]\n\
         ignored_dirs = [\"app/[locale]\"]\n\
         allowed_files = [\"data/[raw].json\"]\n",
    );
    write(temp.path(), "pages/[id].tsx", "export default Page");
    write(temp.path(), "pages/index.tsx", "export default Home");
    write(temp.path(), "app/[locale]/page.tsx", "export default Locale");
    write(temp.path(), "data/[raw].json", "{}");
    write(temp.path(), "notes.log", "");

    assert_eq!(
        run_discovery(temp.path()),
        vec!["data/[raw].json", "pages/index.tsx"]
    );
}

#[test]
fn test_empty_section_matches_no_config() {
    let with_empty = TempDir::new().unwrap();
    write(with_empty.path(), CONFIG_FILENAME, "[tool.llmcontext]\n");
    let without = TempDir::new().unwrap();

    let empty_policy = config::resolve(with_empty.path());
    let default_policy = config::resolve(without.path());
    assert_eq!(empty_policy, default_policy);
    assert_eq!(empty_policy.to_toml().unwrap(), default_policy.to_toml().unwrap());
}

#[test]
fn test_runs_do_not_mutate_defaults() {
    let before = Policy::defaults().clone();

    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        CONFIG_FILENAME,
        "[tool.llmcontext]\nignored_dirs = [\"extra\"]\nallowed_extensions = [\".md\"]\n",
    );
    let derived = config::resolve(temp.path());
    assert!(derived.ignored_dirs.contains("extra"));

    let _ = Policy::defaults().with_overrides(&PolicyOverrides {
        ignored_files: Some(vec!["more".to_string()]),
        ..PolicyOverrides::default()
    });

    assert_eq!(Policy::defaults(), &before);
    assert!(!Policy::defaults().ignored_dirs.contains("extra"));
}

#[test]
fn test_output_headings_match_discovered_files() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/lib.rs", "pub fn a() {}");
    write(temp.path(), "src/cli/main.rs", "fn main() {}");
    write(temp.path(), "Makefile", "all:");
    write(temp.path(), "notes.md", "ignored by extension");

    let policy = config::resolve(temp.path());
    let files = discover(temp.path(), &policy, None).unwrap();
    let mut document = Vec::new();
    aggregate::write_context("demo", &files, &mut document, &ProgressTracker::silent()).unwrap();
    let document = String::from_utf8(document).unwrap();

    let headings: Vec<&str> = document
        .lines()
        .filter_map(|line| line.strip_prefix("## File: `"))
        .filter_map(|rest| rest.strip_suffix('`'))
        .collect();
    let discovered: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();

    assert_eq!(headings, discovered);
    assert_eq!(headings, vec!["Makefile", "src/lib.rs", "src/cli/main.rs"]);
}

#[test]
fn test_parallel_walk_yields_same_list() {
    let temp = TempDir::new().unwrap();
    for i in 0..20 {
        write(temp.path(), &format!("pkg{}/mod{}/file{}.py", i % 4, i % 3, i), "x = 1");
    }
    write(temp.path(), "node_modules/dep/index.js", "");

    let policy = config::resolve(temp.path());
    let sequential = DiscoveryEngine::new(temp.path(), &policy, None)
        .unwrap()
        .discover()
        .unwrap();
    let parallel = DiscoveryEngine::new(temp.path(), &policy, None)
        .unwrap()
        .with_mode(llmcontext::DiscoveryMode::Parallel)
        .discover()
        .unwrap();

    let names = |files: &[DiscoveredFile]| {
        files
            .iter()
            .map(|f| f.relative_path.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(names(&sequential.files), names(&parallel.files));
    assert_eq!(sequential.files.len(), 20);
    assert_eq!(parallel.stats.directories_pruned, 1);
}

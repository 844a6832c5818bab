use super::*;

fn overrides() -> PolicyOverrides {
    PolicyOverrides::default()
}

#[test]
fn test_defaults_loaded() {
    let policy = Policy::defaults();
    assert!(policy.ignored_dirs.contains(".git"));
    assert!(policy.ignored_dirs.contains("node_modules"));
    assert!(policy.ignored_files.contains("yarn.lock"));
    assert!(policy.ignored_extensions.contains(".key"));
    assert!(policy.allowed_dirs.is_empty());
    assert!(policy.allowed_files.is_empty());
    assert!(policy.allowed_extensions.is_empty());
}

#[test]
fn test_empty_overrides_keep_defaults() {
    let derived = Policy::defaults().with_overrides(&overrides());
    assert_eq!(&derived, Policy::defaults());
}

#[test]
fn test_allowed_keys_replace_defaults() {
    let base = Policy::defaults().with_overrides(&PolicyOverrides {
        allowed_files: Some(vec!["Makefile".to_string()]),
        ..overrides()
    });
    let replaced = base.with_overrides(&PolicyOverrides {
        allowed_files: Some(vec!["Dockerfile".to_string()]),
        ..overrides()
    });

    assert_eq!(replaced.allowed_files.len(), 1);
    assert!(replaced.allowed_files.contains("Dockerfile"));
}

#[test]
fn test_empty_allowed_key_clears_restriction() {
    let restricted = Policy::defaults().with_overrides(&PolicyOverrides {
        allowed_dirs: Some(vec!["src/".to_string()]),
        ..overrides()
    });
    let cleared = restricted.with_overrides(&PolicyOverrides {
        allowed_dirs: Some(vec![]),
        ..overrides()
    });

    assert!(cleared.allowed_dirs.is_empty());
}

#[test]
fn test_ignored_keys_union_with_defaults() {
    let policy = Policy::defaults().with_overrides(&PolicyOverrides {
        ignored_dirs: Some(vec!["fixtures".to_string()]),
        ignored_files: Some(vec!["notes.txt".to_string()]),
        ..overrides()
    });

    assert!(policy.ignored_dirs.contains("fixtures"));
    assert!(policy.ignored_files.contains("notes.txt"));
    for dir in defaults::DEFAULT_IGNORED_DIRS {
        assert!(policy.ignored_dirs.contains(*dir));
    }
}

#[test]
fn test_extensions_are_normalized() {
    let policy = Policy::defaults().with_overrides(&PolicyOverrides {
        allowed_extensions: Some(vec!["env".to_string(), ".rs".to_string(), " ".to_string()]),
        ignored_extensions: Some(vec!["snap".to_string()]),
        ..overrides()
    });

    assert_eq!(
        policy.allowed_extensions.iter().collect::<Vec<_>>(),
        vec![".env", ".rs"]
    );
    assert!(policy.ignored_extensions.contains(".snap"));
}

#[test]
fn test_paths_are_normalized() {
    let policy = Policy::defaults().with_overrides(&PolicyOverrides {
        allowed_dirs: Some(vec!["src\\core\\".to_string()]),
        ..overrides()
    });

    assert!(policy.allowed_dirs.contains("src/core/"));
}

#[test]
fn test_defaults_never_mutated() {
    let snapshot = Policy::defaults().clone();

    let _ = Policy::defaults().with_overrides(&PolicyOverrides {
        allowed_dirs: Some(vec!["src/".to_string()]),
        ignored_dirs: Some(vec!["vendor".to_string()]),
        ignored_extensions: Some(vec![".rs".to_string()]),
        ..overrides()
    });

    assert_eq!(Policy::defaults(), &snapshot);
    assert_eq!(snapshot.ignored_dirs.len(), defaults::DEFAULT_IGNORED_DIRS.len());
    assert!(!Policy::defaults().ignored_dirs.contains("vendor"));
}

#[test]
fn test_to_toml_renders_section() {
    let rendered = Policy::defaults().to_toml().unwrap();
    assert!(rendered.starts_with("[tool.llmcontext]"));
    assert!(rendered.contains("ignored_dirs"));
    assert!(rendered.contains(".git"));
}

//! Built-in default pattern lists
//!
//! These are compile-time constants with no mutation API. A resolved
//! [`Policy`](super::Policy) is always derived from them by copying, so no run
//! can alter what the next run starts from.

/// Directories pruned by default, matched by bare name or relative path
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    // VCS / IDE / env
    ".git",
    ".github",
    ".vscode",
    ".idea",
    "node_modules",
    "__pycache__",
    "venv",
    // Python tooling envs
    ".venv",
    "env",
    ".env",
    ".pytest_cache",
    ".mypy_cache",
    ".tox",
    "htmlcov",
    // Build & dist outputs
    "build",
    "dist",
    "target",
    "out",
    "bin",
    "obj",
    "wheels",
    "dist-packages",
    // OS & cache
    "__MACOSX",
    "*.egg-info",
    "site-packages",
    "docs_build",
    "builddocs",
    // Other package manager dirs
    "bower_components",
    "jspm_packages",
];

/// Files excluded by default, matched by bare name or relative path
pub const DEFAULT_IGNORED_FILES: &[&str] = &[
    // Env files (often contain secrets)
    ".env",
    ".env.local",
    ".env.production",
    ".env.development",
    ".env.test",
    ".env.*",
    // Lock files
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "Pipfile.lock",
    "composer.lock",
    "Gemfile.lock",
    "go.sum",
    // Editor swap/temp files
    "*.swp",
    "*.swo",
    "*.swn",
    ".*.swp",
    // OS files
    "thumbs.db",
    ".DS_Store",
    // CI/CD config
    ".travis.yml",
    "circle.yml",
    "appveyor.yml",
    "Jenkinsfile",
    // VCS metadata (dotfiles carry no extension)
    ".gitignore",
    ".gitattributes",
    ".dockerignore",
    ".gitkeep",
];

/// Extensions excluded by default, always with the leading dot
pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &[
    // Images
    ".png",
    ".jpg",
    ".jpeg",
    ".gif",
    ".svg",
    ".ico",
    ".webp",
    ".bmp",
    ".tiff",
    ".psd",
    // Video & audio
    ".mp4",
    ".mov",
    ".avi",
    ".mkv",
    ".webm",
    ".flv",
    ".wmv",
    ".mp3",
    ".wav",
    ".ogg",
    ".flac",
    ".m4a",
    ".aac",
    // Fonts
    ".woff",
    ".woff2",
    ".ttf",
    ".otf",
    ".eot",
    // Archives & documents
    ".zip",
    ".rar",
    ".tar",
    ".gz",
    ".7z",
    ".bz2",
    ".tgz",
    ".pdf",
    ".docx",
    ".xlsx",
    ".pptx",
    ".epub",
    ".mobi",
    ".csv",
    ".xls",
    ".doc",
    ".ppt",
    // Compiled / cache
    ".pyc",
    ".pyo",
    ".pyd",
    ".o",
    ".so",
    ".a",
    ".class",
    ".dll",
    ".exe",
    ".lib",
    ".bin",
    ".iso",
    ".out",
    ".elf",
    ".obj",
    ".jar",
    ".wasm",
    // Logs / databases
    ".log",
    ".lock",
    ".db",
    ".sqlite3",
    ".sqlitedb",
    ".dump",
    ".bak",
    ".tmp",
    ".dat",
    // Secrets / keys
    ".key",
    ".pem",
    ".crt",
    ".cer",
    ".p12",
    ".pfx",
    ".jks",
    ".p7b",
    ".gpg",
    // Documentation
    ".md",
    ".markdown",
    ".rst",
    // Shell scripts
    ".sh",
    ".bat",
    ".ps1",
    ".cmd",
    // Noisy config formats
    ".xml",
    ".json",
    ".yaml",
    ".yml",
    ".toml",
    ".ini",
];

pub const DEFAULT_ALLOWED_DIRS: &[&str] = &[];
pub const DEFAULT_ALLOWED_FILES: &[&str] = &[];
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_extensions_have_leading_dot() {
        for ext in DEFAULT_IGNORED_EXTENSIONS {
            assert!(ext.starts_with('.'), "extension without dot: {ext}");
        }
    }

    #[test]
    fn test_no_duplicate_entries() {
        for list in [DEFAULT_IGNORED_DIRS, DEFAULT_IGNORED_FILES] {
            let unique: HashSet<_> = list.iter().collect();
            assert_eq!(unique.len(), list.len());
        }
    }

    #[test]
    fn test_allow_lists_empty() {
        assert!(DEFAULT_ALLOWED_DIRS.is_empty());
        assert!(DEFAULT_ALLOWED_FILES.is_empty());
        assert!(DEFAULT_ALLOWED_EXTENSIONS.is_empty());
    }
}

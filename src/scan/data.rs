use std::path::{Component, Path, PathBuf};

/// A file selected by the discovery walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path used for reading
    pub path: PathBuf,
    /// POSIX path relative to the scan root, used for matching and labels
    pub relative_path: String,
    /// Extension with its leading dot, empty when there is none
    pub extension: String,
}

/// Discovered files in walk order
pub type FileList = Vec<DiscoveredFile>;

impl DiscoveredFile {
    /// Build from a path under `root`
    ///
    /// Returns `None` if `path` is not inside `root` or is the root itself.
    pub fn new(root: &Path, path: PathBuf) -> Option<Self> {
        let relative_path = relative_posix_path(root, &path)?;
        let extension = extension_of(&path);
        Some(Self {
            path,
            relative_path,
            extension,
        })
    }

    /// Bare file name
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// Fenced code block language tag: the extension without its dot
    pub fn language(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}

/// POSIX relative path of `path` under `root`
pub fn relative_posix_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Final extension with a leading dot, or empty
///
/// Dotfiles such as `.bashrc` have no extension.
fn extension_of(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => String::new(),
    }
}

//! The embedded module filesystem (spec §4.5): a process-wide registry
//! mapping logical module names to read-only, in-memory filesystem
//! handles, so that language-level file operations against bundled
//! modules look identical to operations against on-disk ones.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

/// A read-only, in-memory directory tree: path (relative to the module's
/// synthetic root) -> file contents.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedFs {
    files: HashMap<String, Vec<u8>>,
}

impl EmbeddedFs {
    #[must_use]
    pub fn new(files: HashMap<String, Vec<u8>>) -> Self {
        EmbeddedFs { files }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// `embeddedfs://<module>/<path>` (spec §6). `module` and `path` borrow
/// from the input URI; this is a view, not an owned parse tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedUri<'a> {
    pub module: &'a str,
    pub path: &'a str,
}

const SCHEME_PREFIX: &str = "embeddedfs://";

impl<'a> EmbeddedUri<'a> {
    pub fn parse(uri: &'a str) -> Option<Self> {
        let rest = uri.strip_prefix(SCHEME_PREFIX)?;
        let (module, path) = rest.split_once('/').unwrap_or((rest, ""));
        if module.is_empty() {
            return None;
        }
        Some(EmbeddedUri { module, path })
    }
}

impl std::fmt::Display for EmbeddedUri<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{SCHEME_PREFIX}{}/{}", self.module, self.path)
    }
}

/// The process-wide module registry. Registration is one-shot per module;
/// lookup is read-only thereafter (spec §5's "process-wide state, written
/// once at initialisation").
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Mutex<HashMap<String, EmbeddedFs>>,
}

impl ModuleRegistry {
    /// # Panics
    /// Panics on duplicate registration of the same module name (spec
    /// §4.5: "duplicate registration is a programmer error").
    pub fn register(&self, module: impl Into<String>, fs: EmbeddedFs) {
        let module = module.into();
        let mut modules = self.modules.lock().unwrap_or_else(|e| e.into_inner());
        assert!(!modules.contains_key(&module), "duplicate embedded module registration: {module:?}");
        log::debug!("registered embedded module {module:?} ({} files)", fs.files.len());
        modules.insert(module, fs);
    }

    /// Returns the synthetic root path (`/<module>`) alongside the handle,
    /// so callers can address it the same way they'd address an on-disk
    /// mount point.
    #[must_use]
    pub fn lookup(&self, module: &str) -> Option<(String, EmbeddedFs)> {
        let modules = self.modules.lock().unwrap_or_else(|e| e.into_inner());
        modules.get(module).map(|fs| (format!("/{module}"), fs.clone()))
    }
}

/// The process-wide embedded module registry instance.
pub static MODULES: Lazy<ModuleRegistry> = Lazy::new(ModuleRegistry::default);

/// Merges several embedded filesystems into one. On a path collision, the
/// filesystem supplied *earliest* in `fses` wins (spec §4.5: "a conflict...
/// is resolved by whichever was supplied first to the merge").
#[must_use]
pub fn merge(fses: &[EmbeddedFs]) -> EmbeddedFs {
    let mut merged: HashMap<String, Vec<u8>> = HashMap::new();
    for fs in fses.iter().rev() {
        for (path, contents) in &fs.files {
            merged.insert(path.clone(), contents.clone());
        }
    }
    EmbeddedFs::new(merged)
}

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The `Cargo.toml` of the crate invoking a macro.
///
/// Generated code must name the runtime crate by a path that resolves from
/// the caller. Users may depend on `ja_marshal` directly or only on the
/// `ja_core` facade, so the path is looked up in the caller's manifest:
///
/// 1. `ja_marshal` listed in `dependencies` → `::ja_marshal`.
/// 2. `ja_core` listed in `dependencies` → `::ja_core::marshal`
///    (the `ja_` prefix is stripped to get the facade module).
/// 3. Steps 1-2 again for `dev-dependencies`.
/// 4. Otherwise `::ja_marshal`.
///
/// A crate naming itself should add `extern crate self as ja_marshal;` so the
/// fallback also works inside its own unit tests.
///
/// ```rust
/// # use ja_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.crate_path("ja_marshal"));
/// ```
#[derive(Debug)]
pub struct Manifest {
    document: Document<Box<str>>,
    modified: SystemTime,
}

const FACADE_NAME: &str = "ja_core";
const CRATE_PREFIX: &str = "ja_";

impl Manifest {
    #[inline(never)]
    fn caller_manifest() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn load(path: &PathBuf, modified: SystemTime) -> Self {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        let document = Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()));
        Self { document, modified }
    }

    fn path_of(segments: &[&str]) -> syn::Path {
        let text = segments
            .iter()
            .fold(String::new(), |acc, seg| acc + "::" + *seg);
        syn::parse_str(&text).expect("crate names are valid paths")
    }

    fn lookup(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::path_of(&[name]));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::path_of(&[FACADE_NAME, module]))
    }

    /// Path of the crate `name` as seen from the caller.
    ///
    /// See the type level documentation for the resolution order.
    #[inline(never)]
    pub fn crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|section| match self.document.get(section) {
                Some(Item::Table(deps)) => Self::lookup(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::path_of(&[name]))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Manifests are cached per path and reloaded when the file changes.
    /// Reading is still not free, so a macro should call this once per
    /// invocation and pass the resulting path around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: Mutex<BTreeMap<PathBuf, Manifest>> = Mutex::new(BTreeMap::new());

        let path = Self::caller_manifest();
        let modified = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .expect("The Cargo.toml should have a modified time.");

        let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        let stale = cache
            .get(&path)
            .is_none_or(|manifest| manifest.modified != modified);
        if stale {
            let manifest = Self::load(&path, modified);
            cache.insert(path.clone(), manifest);
        }

        func(&cache[&path])
    }
}

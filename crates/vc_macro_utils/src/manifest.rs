use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find an accessible [`syn::Path`] to
/// another crate of the workspace.
///
/// Generated code must name crates the way the invoking crate sees them,
/// which depends on whether it depends on the runtime crate directly or only
/// on the `vc_archive` facade.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::crate_path("vc_serial");
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `vc_` and the caller depends on
///    `vc_archive`, return `::vc_archive::short_name`
///    (e.g. `vc_serial` -> `::vc_archive::serial`).
/// 3. Repeat steps 1-2 in `dev-dependencies`.
/// 4. Otherwise fall back to `::crate_name`.
///
/// A crate that refers to itself through generated code should add
/// `extern crate self as crate_name;` to its root, since rule 4 applies to
/// its own unit tests as well as to its doctests.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const ENGINE_NAME: &str = "vc_archive";
const ENGINE_PREFIX: &str = "vc_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    #[inline(never)]
    fn load(path: &Path) -> Option<Self> {
        let modified_time = std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()?;
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        let manifest = Document::parse(text).ok()?;
        Some(Self {
            manifest,
            modified_time,
        })
    }

    #[inline]
    fn absolute(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments
                .push(syn::Ident::new(segment, proc_macro2::Span::call_site()).into());
        }
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        match name.strip_prefix(ENGINE_PREFIX) {
            Some(module) if deps.contains_key(ENGINE_NAME) => {
                Some(Self::absolute(&[ENGINE_NAME, module]))
            }
            _ => None,
        }
    }

    /// Returns a [`syn::Path`] for the package named `name` as seen from this
    /// crate. See the type documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Resolves `name` without a manifest, for builds that do not run under
    /// cargo.
    #[inline]
    pub fn fallback_path(name: &str) -> syn::Path {
        Self::absolute(&[name])
    }

    /// Runs `func` on the caller's manifest, or returns `None` if it cannot be
    /// read.
    ///
    /// Parsed manifests are cached per path and reloaded when the file's
    /// modification time changes. Callers should still resolve paths once per
    /// macro invocation.
    pub fn try_shared<R>(func: impl FnOnce(&Self) -> R) -> Option<R> {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path()?;
        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .ok()?;

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return Some(func(manifest));
            }
        }

        let manifest = Self::load(&path)?;
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        Some(result)
    }

    /// Resolves the path to crate `name` from the caller's manifest, see
    /// [`get_crate_path`](Self::get_crate_path).
    ///
    /// Falls back to `::name` if the manifest cannot be read.
    pub fn crate_path(name: &str) -> syn::Path {
        Self::try_shared(|manifest| manifest.get_crate_path(name))
            .unwrap_or_else(|| Self::fallback_path(name))
    }
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use toml_edit::Document;

    use super::Manifest;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.into()).unwrap(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    fn resolve(text: &str, name: &str) -> String {
        manifest(text)
            .get_crate_path(name)
            .to_token_stream()
            .to_string()
            .replace(' ', "")
    }

    #[test]
    fn direct_dependency() {
        let text = "[dependencies]\nvc_serial = \"0.1\"\nvc_archive = \"0.1\"\n";
        assert_eq!(resolve(text, "vc_serial"), "::vc_serial");
    }

    #[test]
    fn through_engine() {
        let text = "[dependencies]\nvc_archive = \"0.1\"\n";
        assert_eq!(resolve(text, "vc_serial"), "::vc_archive::serial");

        let text = "[dev-dependencies]\nvc_archive = \"0.1\"\n";
        assert_eq!(resolve(text, "vc_serial"), "::vc_archive::serial");
    }

    #[test]
    fn fallback() {
        assert_eq!(resolve("[package]\nname = \"demo\"\n", "vc_serial"), "::vc_serial");
        assert_eq!(resolve("[dependencies]\nvc_archive = \"0.1\"\n", "other"), "::other");
    }
}

//! The DLL/shared-object loader abstraction. Every dynamically loaded
//! plugin lives behind this trait so a static-linking build can substitute
//! a compiled-in registry; no plugin is auto-loaded, loading is driven by
//! plugin-path resolution at first TRE-encounter (see `tre::registry`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{nitf_err, NitfErrorKind};
use crate::Result;

/// Opaque handle to a resolved symbol. The static registry never produces
/// one of these; only the `dynamic-plugins` backend does.
pub struct RawSymbol(pub *const ());

/// A loader capable of resolving named symbols out of a shared object. The
/// `dynamic-plugins` feature provides a `libloading`-backed implementation;
/// the default build only ever sees `StaticRegistry`, which reports every
/// path as not found so callers fall back to opaque-blob TRE handling.
pub trait PluginLoader {
    fn is_valid(&self) -> bool;
    fn resolve(&self, symbol: &str) -> Result<RawSymbol>;
}

/// The compile-time substitute for a DLL loader: a process-wide table of
/// directories that is consulted but never actually `dlopen`s anything.
/// Dynamic loading, when compiled in, layers on top of the same directory
/// list (see `dynamic_plugins::DynamicRegistry`).
#[derive(Debug, Default)]
pub struct StaticRegistry {
    search_dirs: Vec<PathBuf>,
    /// in-process registered handlers, keyed by the directory they would
    /// have been found in; kept for API symmetry with a real loader.
    loaded: HashMap<PathBuf, bool>,
}

impl StaticRegistry {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            loaded: HashMap::new(),
        }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Attempt to "load" `path`; the static backend never succeeds, it
    /// only records the attempt so `is_valid` can distinguish "never
    /// tried" from "tried and failed".
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.loaded.insert(path.to_path_buf(), false);
        Err(nitf_err(
            NitfErrorKind::LoadingDll,
            format!(
                "static build: no compiled-in plugin at {}",
                path.display()
            ),
        ))
    }
}

impl PluginLoader for StaticRegistry {
    fn is_valid(&self) -> bool {
        false
    }

    fn resolve(&self, symbol: &str) -> Result<RawSymbol> {
        Err(nitf_err(
            NitfErrorKind::RetrievingDllHook,
            format!("symbol `{symbol}` not available in a static build"),
        ))
    }
}

#[cfg(feature = "dynamic-plugins")]
pub mod dynamic_plugins {
    //! `libloading`-backed plugin loader. Isolated in its own module so
    //! the single `unsafe` call site (symbol resolution is inherently
    //! unsafe: the library can't verify the ABI the plugin exposes) is
    //! contained to the one feature that actually needs it; the rest of
    //! the crate forbids unsafe code outright (see `lib.rs`).
    #![allow(unsafe_code)]

    use super::{PluginLoader, RawSymbol};
    use crate::error::{nitf_err, NitfErrorKind};
    use crate::Result;
    use libloading::Library;
    use std::path::Path;

    pub struct DynamicRegistry {
        library: Option<Library>,
    }

    impl DynamicRegistry {
        pub fn load(path: &Path) -> Result<Self> {
            let library = unsafe { Library::new(path) }
                .map_err(|e| nitf_err(NitfErrorKind::LoadingDll, e.to_string()))?;
            Ok(Self {
                library: Some(library),
            })
        }

        pub fn unload(&mut self) -> Result<()> {
            if let Some(lib) = self.library.take() {
                lib.close()
                    .map_err(|e| nitf_err(NitfErrorKind::UnloadingDll, e.to_string()))?;
            }
            Ok(())
        }
    }

    impl PluginLoader for DynamicRegistry {
        fn is_valid(&self) -> bool {
            self.library.is_some()
        }

        fn resolve(&self, symbol: &str) -> Result<RawSymbol> {
            let lib = self.library.as_ref().ok_or_else(|| {
                nitf_err(NitfErrorKind::UninitializedDllRead, "library not loaded")
            })?;
            let sym: libloading::Symbol<*const ()> = unsafe {
                lib.get(symbol.as_bytes())
                    .map_err(|e| nitf_err(NitfErrorKind::RetrievingDllHook, e.to_string()))?
            };
            Ok(RawSymbol(*sym))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_registry_never_resolves() {
        let mut reg = StaticRegistry::new(vec![PathBuf::from("/opt/nitf/plugins")]);
        assert!(reg.load(Path::new("/opt/nitf/plugins/ICHIPB.so")).is_err());
        assert!(!reg.is_valid());
        assert!(reg.resolve("ICHIPB_init").is_err());
    }
}

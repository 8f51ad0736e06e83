//! Schema-version migration: a product is always parsed
//! into the newest in-memory shape, with any older-version adjustments
//! logged as they're applied rather than done silently.

use crate::Result;

/// A namespace-URI-resolvable schema version, ordered oldest first so
/// `VersionUpdater::migrate` can walk forward one step at a time.
pub trait SchemaVersion: Copy + PartialEq + PartialOrd {
    fn namespace_uri(&self) -> &'static str;
    fn latest() -> Self;
}

/// Migrates a parsed object forward from whatever version it was written
/// in to the version this crate treats as current, logging each step.
pub trait VersionUpdater: Sized {
    type Version: SchemaVersion;

    fn version(&self) -> Self::Version;
    fn migrate_one_step(self, from: Self::Version) -> Result<Self>;

    /// The migration diary attached to the object, so a caller can inspect
    /// after the fact what was adjusted (and, when a step fabricates a
    /// value the older schema never carried, what was assumed) rather than
    /// relying on catching the log line as it's emitted.
    fn processing_log_mut(&mut self) -> &mut Vec<String>;

    fn migrate_to_latest(mut self) -> Result<Self> {
        loop {
            let current = self.version();
            if current >= Self::Version::latest() {
                return Ok(self);
            }
            let message = format!(
                "migrating from schema `{}` to `{}`",
                current.namespace_uri(),
                Self::Version::latest().namespace_uri()
            );
            log::warn!("{message}");
            self = self.migrate_one_step(current)?;
            self.processing_log_mut().push(message);
        }
    }
}

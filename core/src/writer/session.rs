use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::path::Path;

/// The external tag-editing primitive. This crate owns no knowledge of its
/// process model beyond "it may need reinitialization"; implementations
/// typically wrap a long-lived worker process.
///
/// Callers must not issue concurrent writes against the same file path
/// through different sessions; the tool's in-place rewrite can corrupt the
/// target.
pub trait TagSession {
    /// Writes the tag map. `overwrite` directs the tool to replace existing
    /// values rather than appending stale duplicates.
    fn write_tags(
        &mut self,
        path: &Path,
        tags: &BTreeMap<String, String>,
        overwrite: bool,
    ) -> CoreResult<()>;

    fn read_tags(&mut self, path: &Path) -> CoreResult<BTreeMap<String, String>>;

    /// Health probe; a dead worker surfaces here.
    fn version(&mut self) -> CoreResult<String>;
}

pub type SessionFactory = Box<dyn Fn() -> CoreResult<Box<dyn TagSession>>>;

/// Explicit, injectable handle around a shared long-lived tag session.
/// The session is created lazily and respawned when the health probe fails,
/// so a caller owns exactly one handle instead of relying on implicit
/// global state.
pub struct SessionHandle {
    factory: SessionFactory,
    session: Option<Box<dyn TagSession>>,
}

impl SessionHandle {
    pub fn new(factory: SessionFactory) -> Self {
        Self {
            factory,
            session: None,
        }
    }

    /// Probes the current session and respawns it if the probe fails.
    /// Returns the tool version string.
    pub fn health_check(&mut self) -> CoreResult<String> {
        if let Some(session) = self.session.as_mut() {
            match session.version() {
                Ok(version) => return Ok(version),
                Err(_) => self.session = None,
            }
        }
        let mut fresh = (self.factory)()?;
        let version = fresh.version().map_err(|e| {
            CoreError::SessionUnavailable(format!("fresh session failed health probe: {}", e))
        })?;
        self.session = Some(fresh);
        Ok(version)
    }

    fn ensure(&mut self) -> CoreResult<&mut Box<dyn TagSession>> {
        if self.session.is_none() {
            self.health_check()?;
        }
        self.session
            .as_mut()
            .ok_or_else(|| CoreError::SessionUnavailable("no session after respawn".to_string()))
    }

    pub fn write_tags(
        &mut self,
        path: &Path,
        tags: &BTreeMap<String, String>,
        overwrite: bool,
    ) -> CoreResult<()> {
        self.ensure()?.write_tags(path, tags, overwrite)
    }

    pub fn read_tags(&mut self, path: &Path) -> CoreResult<BTreeMap<String, String>> {
        self.ensure()?.read_tags(path)
    }
}

use parking_lot::Mutex;
use portfolio_types::{AppStatus, PortfolioError, PortfolioResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{PageSurface, Surface};
use crate::render::{Container, Fragment, PageShell};

/// [`PageSurface`] that rewrites an HTML file after every region change.
pub struct FileSurface {
    page: PageSurface,
    path: PathBuf,
    writer: Mutex<()>,
}

impl FileSurface {
    /// Creates the parent directory and writes the initial (all loading)
    /// page so the file exists before the first fetch completes.
    pub fn create(path: impl Into<PathBuf>, shell: PageShell) -> PortfolioResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| PortfolioError::Io(format!("Failed to create {:?}: {}", parent, e)))?;
        }

        let surface = Self {
            page: PageSurface::new(shell),
            path,
            writer: Mutex::new(()),
        };
        surface
            .write()
            .map_err(|e| PortfolioError::Io(format!("Failed to write {:?}: {}", surface.path, e)))?;
        Ok(surface)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page(&self) -> &PageSurface {
        &self.page
    }

    fn write(&self) -> std::io::Result<()> {
        let tmp = self.path.with_extension("html.tmp");
        std::fs::write(&tmp, self.page.document())?;
        std::fs::rename(&tmp, &self.path)
    }
}

impl Surface for FileSurface {
    fn render(&self, container: Container, fragment: Fragment) {
        let _writer = self.writer.lock();
        self.page.render(container, fragment);
        match self.write() {
            Ok(()) => debug!("Rewrote {:?} after updating #{}", self.path, container),
            Err(e) => warn!("Failed to write dashboard page {:?}: {}", self.path, e),
        }
    }

    fn update_header(&self, status: &AppStatus) {
        let _writer = self.writer.lock();
        if !self.page.apply_status(status) {
            return;
        }
        if let Err(e) = self.write() {
            warn!("Failed to write dashboard page {:?}: {}", self.path, e);
        }
    }
}

//! Render targets for dashboard regions.

mod file;

pub use file::FileSurface;

use parking_lot::Mutex;
use portfolio_types::AppStatus;
use std::collections::HashMap;
use std::sync::Arc;

use crate::render::{compose_page, Container, Fragment, PageShell};

/// Anything that can hold the current fragment of each named region.
pub trait Surface: Send + Sync {
    /// Replace the whole content of `container` with `fragment`.
    fn render(&self, container: Container, fragment: Fragment);

    /// Refresh the page header from a freshly loaded status.
    fn update_header(&self, _status: &AppStatus) {}
}

impl<T: Surface + ?Sized> Surface for Arc<T> {
    fn render(&self, container: Container, fragment: Fragment) {
        (**self).render(container, fragment)
    }

    fn update_header(&self, status: &AppStatus) {
        (**self).update_header(status)
    }
}

struct Regions {
    shell: PageShell,
    current: HashMap<Container, Fragment>,
    renders: HashMap<Container, usize>,
}

/// In-memory page: the header and the latest fragment of every region.
pub struct PageSurface {
    regions: Mutex<Regions>,
}

impl PageSurface {
    pub fn new(shell: PageShell) -> Self {
        Self {
            regions: Mutex::new(Regions {
                shell,
                current: HashMap::new(),
                renders: HashMap::new(),
            }),
        }
    }

    pub fn shell(&self) -> PageShell {
        self.regions.lock().shell.clone()
    }

    /// Returns whether the header changed.
    pub fn apply_status(&self, status: &AppStatus) -> bool {
        self.regions.lock().shell.apply_status(status)
    }

    pub fn fragment(&self, container: Container) -> Option<Fragment> {
        self.regions.lock().current.get(&container).cloned()
    }

    /// How many times `container` has been replaced.
    pub fn render_count(&self, container: Container) -> usize {
        self.regions.lock().renders.get(&container).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> HashMap<Container, Fragment> {
        self.regions.lock().current.clone()
    }

    pub fn document(&self) -> String {
        let regions = self.regions.lock();
        compose_page(&regions.shell, &regions.current)
    }
}

impl Default for PageSurface {
    fn default() -> Self {
        Self::new(PageShell::default())
    }
}

impl Surface for PageSurface {
    fn render(&self, container: Container, fragment: Fragment) {
        let mut regions = self.regions.lock();
        regions.current.insert(container, fragment);
        *regions.renders.entry(container).or_insert(0) += 1;
    }

    fn update_header(&self, status: &AppStatus) {
        self.apply_status(status);
    }
}

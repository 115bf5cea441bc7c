use portfolio_types::StatusFilter;

/// Filter selection owned by the controller.
///
/// Holds the declared value of every filter control, which one is active,
/// the filter used for the next task fetch, and the sequence number of the
/// latest task request.
#[derive(Clone, Debug)]
pub struct FilterState {
    controls: Vec<StatusFilter>,
    active: usize,
    current: StatusFilter,
    issued: u64,
}

/// A task fetch in flight: which filter it was issued for and its place in
/// the request sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskTicket {
    pub seq: u64,
    pub filter: StatusFilter,
}

impl FilterState {
    /// `controls` in display order. The `all` control starts active when
    /// present, else the first one.
    pub fn new(controls: Vec<StatusFilter>) -> Self {
        let active = controls.iter().position(StatusFilter::is_all).unwrap_or(0);
        Self {
            controls,
            active,
            current: StatusFilter::All,
            issued: 0,
        }
    }

    pub fn controls(&self) -> &[StatusFilter] {
        &self.controls
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_control(&self) -> Option<&StatusFilter> {
        self.controls.get(self.active)
    }

    pub fn current(&self) -> &StatusFilter {
        &self.current
    }

    /// Control at `index` was activated. Returns `false` for an index that
    /// names no control.
    pub fn activate(&mut self, index: usize) -> bool {
        let Some(control) = self.controls.get(index) else {
            return false;
        };
        self.current = control.clone();
        self.active = index;
        true
    }

    /// Select by declared value. A value with no matching control still
    /// becomes the current filter but leaves the highlighting untouched.
    pub fn select(&mut self, declared: &str) -> &StatusFilter {
        let filter = StatusFilter::from_declared(declared);
        if let Some(index) = self.controls.iter().position(|c| *c == filter) {
            self.active = index;
        }
        self.current = filter;
        &self.current
    }

    pub fn begin_request(&mut self) -> TaskTicket {
        self.issued += 1;
        TaskTicket {
            seq: self.issued,
            filter: self.current.clone(),
        }
    }

    pub fn is_latest(&self, ticket: &TaskTicket) -> bool {
        ticket.seq == self.issued
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(StatusFilter::builtin().to_vec())
    }
}

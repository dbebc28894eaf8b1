/// Top-level UI mode. Exactly one is active at a time.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Browse,
    CalibratingTrail,
    PlacingMedia,
}

/// Modal viewer, orthogonal to `Mode`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Viewer {
    #[default]
    Closed,
    /// `index` is always a valid catalog index.
    Open { index: usize },
}

impl Viewer {
    pub fn index(self) -> Option<usize> {
        match self {
            Viewer::Closed => None,
            Viewer::Open { index } => Some(index),
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Viewer::Open { .. })
    }
}

/// Everything the interaction layer knows about the UI, apart from the
/// stores it drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    pub mode: Mode,
    pub viewer: Viewer,
    pub trail_visible: bool,
    /// Point that a placement click will move.
    pub placement_target: Option<String>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: Mode::Browse,
            viewer: Viewer::Closed,
            trail_visible: true,
            placement_target: None,
        }
    }
}

impl InteractionState {
    pub fn is_calibrating(&self) -> bool {
        self.mode == Mode::CalibratingTrail
    }

    pub fn is_placing(&self) -> bool {
        self.mode == Mode::PlacingMedia
    }

    pub fn is_authoring(&self) -> bool {
        self.mode != Mode::Browse
    }

    /// Flips between `Browse` and `target`. Entering `target` leaves any
    /// other authoring mode.
    pub fn toggle_mode(&mut self, target: Mode) {
        self.mode = if self.mode == target {
            Mode::Browse
        } else {
            target
        };
    }
}

/// `(index + 1) mod len`; `None` for an empty catalog.
pub fn next_index(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((index % len + 1) % len)
}

/// `(index - 1 + len) mod len`; `None` for an empty catalog.
pub fn prev_index(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((index % len + len - 1) % len)
}

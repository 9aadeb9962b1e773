//! Typed change notifications emitted by the controller

/// One of the three dependent selection levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Top level of the hierarchy (e.g. a Thai province).
    Region,
    /// Middle level, children of a region (e.g. a district).
    SubRegion,
    /// Leaf level, children of a sub-region; carries the postal code.
    Locality,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Region => write!(f, "region"),
            Level::SubRegion => write!(f, "sub-region"),
            Level::Locality => write!(f, "locality"),
        }
    }
}

/// Events pushed to subscribers of a [`CascadeController`](crate::CascadeController).
///
/// Replaces the callback-hook style of ad-hoc `onInit`/`onChange` functions
/// with a typed contract, so multiple independent observers can subscribe
/// without coupling to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeEvent {
    /// A dataset was installed and all selections were cleared.
    Initialized,
    /// A selection at `level` changed to `name`.
    ///
    /// `postal_code` is `Some` only when `level` is [`Level::Locality`].
    LevelChanged {
        /// The level whose selection changed.
        level: Level,
        /// The newly selected display name.
        name: String,
        /// Postal code resolved from the selected locality.
        postal_code: Option<String>,
    },
    /// All selections were cleared without replacing the dataset.
    Reset,
}

impl CascadeEvent {
    /// Returns the level this event concerns, if it is a level change.
    pub fn level(&self) -> Option<Level> {
        match self {
            CascadeEvent::LevelChanged { level, .. } => Some(*level),
            _ => None,
        }
    }
}

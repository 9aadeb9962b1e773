//! The cascading selection controller

use tokio::sync::broadcast;

use crate::config::CascadeConfig;
use crate::config::Comparator;
use crate::error::SelectError;
use crate::event::CascadeEvent;
use crate::event::Level;
use crate::loader::LoadedDataset;
use crate::model::HierarchyDataset;
use crate::model::Region;
use crate::model::SubRegion;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Progress of a controller through the selection chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeState {
    /// No dataset installed yet.
    Uninitialized,
    /// Dataset installed, nothing selected.
    NoneSelected,
    /// A region is selected.
    RegionSelected,
    /// A region and a sub-region are selected.
    SubRegionSelected,
    /// All three levels are selected; a postal code is resolved.
    LocalitySelected,
}

/// Single source of truth for cascading selection state.
///
/// Holds the current selection at each of the three levels and keeps the
/// dependent levels consistent: selecting at any level unconditionally
/// clears everything below it, so there is never an observable state
/// where a child selection disagrees with its parent.
///
/// The controller owns no I/O and no rendering surface. Views pull option
/// sets with [`available_options`](Self::available_options) and subscribe
/// to [`CascadeEvent`]s; user choices flow back in through the `select_*`
/// operations. All operations take `&mut self` and assume one logical
/// thread of control; independent controller instances need no
/// coordination.
///
/// # Example
///
/// ```
/// use cascade_lib::{CascadeConfig, CascadeController};
/// use cascade_lib::model::HierarchyDataset;
///
/// # fn main() -> Result<(), cascade_lib::error::Error> {
/// let config = CascadeConfig::new("thailand").with_language("en");
/// let bytes = br#"[{
///     "name_en": "Bangkok",
///     "lv4": [{ "name_en": "Pathum Wan",
///               "lv5": [{ "name_en": "Lumphini", "zip_code": "10330" }] }]
/// }]"#;
/// let dataset = HierarchyDataset::parse(bytes, &config.language, &config.comparator)?;
///
/// let mut controller = CascadeController::new(&config);
/// controller.initialize(dataset);
/// controller.select_region("Bangkok")?;
/// controller.select_sub_region("Pathum Wan")?;
/// controller.select_locality("Lumphini")?;
/// assert_eq!(controller.resolved_postal_code(), Some("10330"));
/// # Ok(())
/// # }
/// ```
pub struct CascadeController {
    dataset: Option<HierarchyDataset>,
    installed_request_id: Option<u64>,
    comparator: Comparator,
    selected_region: Option<String>,
    selected_sub_region: Option<String>,
    selected_locality: Option<String>,
    resolved_postal_code: Option<String>,
    events: broadcast::Sender<CascadeEvent>,
}

impl CascadeController {
    /// Creates an uninitialized controller with the config's comparator.
    pub fn new(config: &CascadeConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            dataset: None,
            installed_request_id: None,
            comparator: config.comparator.clone(),
            selected_region: None,
            selected_sub_region: None,
            selected_locality: None,
            resolved_postal_code: None,
            events,
        }
    }

    /// Subscribes to change events.
    ///
    /// Any number of observers may subscribe; each receives every event
    /// emitted after its subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<CascadeEvent> {
        self.events.subscribe()
    }

    /// Installs a dataset, clearing all selections.
    ///
    /// Emits [`CascadeEvent::Initialized`]. Region options become the
    /// dataset's regions; sub-region and locality options are empty until
    /// the corresponding parent is selected.
    pub fn initialize(&mut self, dataset: HierarchyDataset) {
        log::debug!("installing dataset with {} regions", dataset.len());
        self.dataset = Some(dataset);
        self.clear_selections();
        self.emit(CascadeEvent::Initialized);
    }

    /// Installs a versioned load result, discarding stale responses.
    ///
    /// A reload supersedes any in-flight earlier load; if the earlier
    /// result arrives after a newer one was installed, its request id is
    /// not newer and it is dropped. Returns `true` if the dataset was
    /// installed.
    pub fn install(&mut self, loaded: LoadedDataset) -> bool {
        if let Some(installed) = self.installed_request_id
            && loaded.request_id <= installed
        {
            log::warn!(
                "discarding stale dataset load: request {} superseded by {}",
                loaded.request_id,
                installed
            );
            return false;
        }
        self.installed_request_id = Some(loaded.request_id);
        self.initialize(loaded.dataset);
        true
    }

    /// Selects a region by display name.
    ///
    /// Clears any sub-region and locality selection; stale children are
    /// never retained. Emits a [`CascadeEvent::LevelChanged`] for the
    /// region level.
    ///
    /// # Errors
    ///
    /// - [`SelectError::NotInitialized`] before [`initialize`](Self::initialize)
    /// - [`SelectError::UnknownOption`] if the name is not a region of the
    ///   installed dataset
    pub fn select_region(&mut self, name: &str) -> Result<(), SelectError> {
        let dataset = self
            .dataset
            .as_ref()
            .ok_or_else(|| SelectError::not_initialized("select_region", "an installed dataset"))?;
        if dataset.region(name).is_none() {
            return Err(SelectError::unknown_option(Level::Region, name));
        }

        self.selected_region = Some(name.to_string());
        self.selected_sub_region = None;
        self.selected_locality = None;
        self.resolved_postal_code = None;
        self.emit(CascadeEvent::LevelChanged {
            level: Level::Region,
            name: name.to_string(),
            postal_code: None,
        });
        Ok(())
    }

    /// Selects a sub-region of the currently selected region.
    ///
    /// Clears any locality selection. Emits a
    /// [`CascadeEvent::LevelChanged`] for the sub-region level.
    ///
    /// # Errors
    ///
    /// - [`SelectError::NotInitialized`] if no region is selected
    /// - [`SelectError::UnknownOption`] if the name is not a child of the
    ///   selected region
    pub fn select_sub_region(&mut self, name: &str) -> Result<(), SelectError> {
        let region = self
            .current_region()
            .ok_or_else(|| SelectError::not_initialized("select_sub_region", "a selected region"))?;
        if region.sub_region(name).is_none() {
            return Err(SelectError::unknown_option(Level::SubRegion, name));
        }

        self.selected_sub_region = Some(name.to_string());
        self.selected_locality = None;
        self.resolved_postal_code = None;
        self.emit(CascadeEvent::LevelChanged {
            level: Level::SubRegion,
            name: name.to_string(),
            postal_code: None,
        });
        Ok(())
    }

    /// Selects a locality of the currently selected sub-region, resolving
    /// its postal code.
    ///
    /// Emits a [`CascadeEvent::LevelChanged`] for the locality level with
    /// the resolved postal code attached.
    ///
    /// # Errors
    ///
    /// - [`SelectError::NotInitialized`] if no sub-region is selected
    /// - [`SelectError::UnknownOption`] if the name is not a child of the
    ///   selected sub-region
    pub fn select_locality(&mut self, name: &str) -> Result<(), SelectError> {
        let sub_region = self.current_sub_region().ok_or_else(|| {
            SelectError::not_initialized("select_locality", "a selected sub-region")
        })?;
        let locality = sub_region
            .locality(name)
            .ok_or_else(|| SelectError::unknown_option(Level::Locality, name))?;
        let postal_code = locality.postal_code().to_string();

        self.selected_locality = Some(name.to_string());
        self.resolved_postal_code = Some(postal_code.clone());
        self.emit(CascadeEvent::LevelChanged {
            level: Level::Locality,
            name: name.to_string(),
            postal_code: Some(postal_code),
        });
        Ok(())
    }

    /// Returns the valid display names for a level, sorted by the active
    /// comparator.
    ///
    /// Empty when no dataset is installed or the level's parent selection
    /// is unset. Pure read; the returned vector is freshly computed.
    pub fn available_options(&self, level: Level) -> Vec<String> {
        let mut names: Vec<String> = match level {
            Level::Region => self
                .dataset
                .as_ref()
                .map(|d| d.regions().iter().map(|r| r.display_name().to_string()).collect())
                .unwrap_or_default(),
            Level::SubRegion => self
                .current_region()
                .map(|r| {
                    r.sub_regions()
                        .iter()
                        .map(|s| s.display_name().to_string())
                        .collect()
                })
                .unwrap_or_default(),
            Level::Locality => self
                .current_sub_region()
                .map(|s| {
                    s.localities()
                        .iter()
                        .map(|l| l.display_name().to_string())
                        .collect()
                })
                .unwrap_or_default(),
        };
        names.sort_by(|a, b| (self.comparator)(a, b));
        names
    }

    /// Clears all selections, keeping the installed dataset.
    ///
    /// Region options remain the full dataset; the dependent levels become
    /// empty. Emits [`CascadeEvent::Reset`].
    pub fn reset(&mut self) {
        self.clear_selections();
        self.emit(CascadeEvent::Reset);
    }

    /// Returns the controller's position in the selection chain.
    pub fn state(&self) -> CascadeState {
        if self.dataset.is_none() {
            CascadeState::Uninitialized
        } else if self.selected_locality.is_some() {
            CascadeState::LocalitySelected
        } else if self.selected_sub_region.is_some() {
            CascadeState::SubRegionSelected
        } else if self.selected_region.is_some() {
            CascadeState::RegionSelected
        } else {
            CascadeState::NoneSelected
        }
    }

    /// Returns `true` once a dataset has been installed.
    pub fn is_initialized(&self) -> bool {
        self.dataset.is_some()
    }

    /// Returns the installed dataset, if any.
    pub fn dataset(&self) -> Option<&HierarchyDataset> {
        self.dataset.as_ref()
    }

    /// Returns the selected region name, if any.
    pub fn selected_region(&self) -> Option<&str> {
        self.selected_region.as_deref()
    }

    /// Returns the selected sub-region name, if any.
    pub fn selected_sub_region(&self) -> Option<&str> {
        self.selected_sub_region.as_deref()
    }

    /// Returns the selected locality name, if any.
    pub fn selected_locality(&self) -> Option<&str> {
        self.selected_locality.as_deref()
    }

    /// Returns the postal code of the selected locality, if any.
    pub fn resolved_postal_code(&self) -> Option<&str> {
        self.resolved_postal_code.as_deref()
    }

    fn current_region(&self) -> Option<&Region> {
        let dataset = self.dataset.as_ref()?;
        dataset.region(self.selected_region.as_deref()?)
    }

    fn current_sub_region(&self) -> Option<&SubRegion> {
        self.current_region()?
            .sub_region(self.selected_sub_region.as_deref()?)
    }

    fn clear_selections(&mut self) {
        self.selected_region = None;
        self.selected_sub_region = None;
        self.selected_locality = None;
        self.resolved_postal_code = None;
    }

    fn emit(&self, event: CascadeEvent) {
        // send only fails when no subscriber exists, which is fine
        let _ = self.events.send(event);
    }
}

impl Default for CascadeController {
    fn default() -> Self {
        Self::new(&CascadeConfig::default())
    }
}

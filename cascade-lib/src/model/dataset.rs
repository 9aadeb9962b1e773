//! Immutable, indexed hierarchy dataset

use std::collections::HashMap;

use crate::config::Comparator;
use crate::error::LoadError;
use crate::model::RawRegion;

/// The loaded region → sub-region → locality tree.
///
/// Sibling sequences are sorted by the comparator at construction, and
/// every sibling scope carries a name index for constant-time lookup.
/// Construction fails if two siblings share a display name, so the
/// uniqueness invariant is enforced at load time rather than assumed at
/// selection time. The dataset is immutable once built.
#[derive(Debug, Clone)]
pub struct HierarchyDataset {
    regions: Vec<Region>,
    region_index: HashMap<String, usize>,
}

/// A top-level node of the hierarchy.
#[derive(Debug, Clone)]
pub struct Region {
    display_name: String,
    sub_regions: Vec<SubRegion>,
    sub_region_index: HashMap<String, usize>,
}

/// A mid-level node, child of a [`Region`].
#[derive(Debug, Clone)]
pub struct SubRegion {
    display_name: String,
    localities: Vec<Locality>,
    locality_index: HashMap<String, usize>,
}

/// A leaf node, child of a [`SubRegion`].
#[derive(Debug, Clone)]
pub struct Locality {
    display_name: String,
    postal_code: String,
}

impl HierarchyDataset {
    /// Parses raw JSON bytes into a dataset.
    ///
    /// `language` selects which localized `name_<language>` field becomes
    /// the display name; `comparator` fixes the sibling order.
    pub fn parse(
        bytes: &[u8],
        language: &str,
        comparator: &Comparator,
    ) -> Result<Self, LoadError> {
        let raw: Vec<RawRegion> = serde_json::from_slice(bytes)
            .map_err(|e| LoadError::malformed(format!("invalid JSON: {e}")))?;
        Self::from_raw(raw, language, comparator)
    }

    /// Builds a dataset from already-deserialized wire-format nodes.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MalformedDataset`] when a node is missing the
    /// `name_<language>` field, a leaf is missing its postal code, or two
    /// siblings share a display name.
    pub fn from_raw(
        raw: Vec<RawRegion>,
        language: &str,
        comparator: &Comparator,
    ) -> Result<Self, LoadError> {
        let mut regions = Vec::with_capacity(raw.len());
        for raw_region in raw {
            let display_name = raw_region
                .display_name(language)
                .ok_or_else(|| missing_name("region", language))?
                .to_string();

            let mut sub_regions = Vec::with_capacity(raw_region.lv4.len());
            for raw_sub in raw_region.lv4 {
                let sub_name = raw_sub
                    .display_name(language)
                    .ok_or_else(|| missing_name("sub-region", language))?
                    .to_string();

                let mut localities = Vec::with_capacity(raw_sub.lv5.len());
                for raw_locality in raw_sub.lv5 {
                    let locality_name = raw_locality
                        .display_name(language)
                        .ok_or_else(|| missing_name("locality", language))?
                        .to_string();
                    let postal_code = raw_locality.postal_code().ok_or_else(|| {
                        LoadError::malformed(format!(
                            "locality '{locality_name}' is missing a postal code"
                        ))
                    })?;
                    localities.push(Locality {
                        display_name: locality_name,
                        postal_code,
                    });
                }

                localities.sort_by(|a, b| comparator(&a.display_name, &b.display_name));
                let locality_index = index_by_name(
                    localities.iter().map(|l| l.display_name.as_str()),
                )
                .map_err(|dup| {
                    LoadError::malformed(format!(
                        "duplicate locality '{dup}' under sub-region '{sub_name}'"
                    ))
                })?;

                sub_regions.push(SubRegion {
                    display_name: sub_name,
                    localities,
                    locality_index,
                });
            }

            sub_regions.sort_by(|a, b| comparator(&a.display_name, &b.display_name));
            let sub_region_index =
                index_by_name(sub_regions.iter().map(|s| s.display_name.as_str())).map_err(
                    |dup| {
                        LoadError::malformed(format!(
                            "duplicate sub-region '{dup}' under region '{display_name}'"
                        ))
                    },
                )?;

            regions.push(Region {
                display_name,
                sub_regions,
                sub_region_index,
            });
        }

        regions.sort_by(|a, b| comparator(&a.display_name, &b.display_name));
        let region_index = index_by_name(regions.iter().map(|r| r.display_name.as_str()))
            .map_err(|dup| LoadError::malformed(format!("duplicate region '{dup}'")))?;

        Ok(Self {
            regions,
            region_index,
        })
    }

    /// Returns all regions in load order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Looks up a region by display name.
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.region_index.get(name).map(|&i| &self.regions[i])
    }

    /// Returns the number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if the dataset has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Region {
    /// Returns the localized display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns all child sub-regions in load order.
    pub fn sub_regions(&self) -> &[SubRegion] {
        &self.sub_regions
    }

    /// Looks up a child sub-region by display name.
    pub fn sub_region(&self, name: &str) -> Option<&SubRegion> {
        self.sub_region_index.get(name).map(|&i| &self.sub_regions[i])
    }
}

impl SubRegion {
    /// Returns the localized display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns all child localities in load order.
    pub fn localities(&self) -> &[Locality] {
        &self.localities
    }

    /// Looks up a child locality by display name.
    pub fn locality(&self, name: &str) -> Option<&Locality> {
        self.locality_index.get(name).map(|&i| &self.localities[i])
    }
}

impl Locality {
    /// Returns the localized display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the postal code for this locality.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

fn missing_name(scope: &str, language: &str) -> LoadError {
    LoadError::malformed(format!("{scope} is missing string field 'name_{language}'"))
}

/// Indexes names by position, rejecting the first duplicate encountered.
fn index_by_name<'a>(names: impl Iterator<Item = &'a str>) -> Result<HashMap<String, usize>, String> {
    let mut index = HashMap::new();
    for (position, name) in names.enumerate() {
        if index.insert(name.to_string(), position).is_some() {
            return Err(name.to_string());
        }
    }
    Ok(index)
}

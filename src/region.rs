//! Regions and their authored configuration.
//!
//! A [`Region`] pairs a world-space volume with the resource bundle it
//! streams. Regions are immutable value objects created at configuration
//! time; the scheduler only ever reads them.

use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use rustc_hash::FxHashSet;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, StreamError};

/// Opaque identifier of a loadable resource bundle (e.g. an asset path).
///
/// This is the deduplication and state-tracking key: two regions sharing a
/// `ResourceId` are treated as one streaming unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(Arc<str>);

impl ResourceId {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Axis-aligned box in world space.
///
/// Containment is inclusive on all faces: a point exactly on a face is
/// inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Builds a box from two opposite corners, in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let h = half_extents.abs();
        Self {
            min: center - h,
            max: center + h,
        }
    }

    /// Inclusive containment test: `min <= p <= max` componentwise.
    #[inline]
    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// A spatial volume that triggers the streaming of one resource bundle
/// whenever a subject of interest is inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    resource: ResourceId,
    bounds: Aabb,
}

impl Region {
    #[must_use]
    pub fn new(resource: ResourceId, bounds: Aabb) -> Self {
        Self { resource, bounds }
    }

    #[inline]
    #[must_use]
    pub fn resource(&self) -> &ResourceId {
        &self.resource
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/// The authored region configuration. Built once before the scheduler
/// starts, read-only thereafter.
///
/// Multiple regions may share a [`ResourceId`]; they then form one
/// streaming unit whose desired state is the logical OR of the individual
/// containment tests.
#[derive(Debug, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        let mut seen = FxHashSet::default();
        for region in &regions {
            if !seen.insert(region.resource().clone()) {
                log::debug!(
                    "region set declares '{}' more than once, treating as one streaming unit",
                    region.resource()
                );
            }
        }
        Self { regions }
    }

    /// Parses a region set from its JSON authoring format: an array of
    /// `{ "resource": ..., "bounds": { "min": ..., "max": ... } }` records.
    pub fn from_json(json: &str) -> Result<Self> {
        let regions: Vec<Region> = serde_json::from_str(json)?;
        // Deserialization bypasses Aabb::new's corner normalization, so
        // authored data can carry an empty (inverted) volume.
        for region in &regions {
            let bounds = region.bounds();
            if bounds.min.cmpgt(bounds.max).any() {
                return Err(StreamError::Config(format!(
                    "region '{}' has inverted bounds (min > max)",
                    region.resource()
                )));
            }
        }
        Ok(Self::new(regions))
    }

    #[inline]
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

//! Region and Region Set Tests
//!
//! Tests for:
//! - Aabb: corner normalization, inclusive containment
//! - Region: resource id / bounds accessors
//! - RegionSet: JSON authoring format, duplicate resource ids

use glam::Vec3;
use zonestream::{Aabb, Region, RegionSet, ResourceId};

// ============================================================================
// Aabb
// ============================================================================

#[test]
fn aabb_normalizes_corners() {
    let aabb = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, -2.0, -3.0));
    assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn aabb_from_center_half_extents() {
    let aabb = Aabb::from_center_half_extents(Vec3::new(10.0, 0.0, 0.0), Vec3::splat(2.0));
    assert_eq!(aabb.min, Vec3::new(8.0, -2.0, -2.0));
    assert_eq!(aabb.max, Vec3::new(12.0, 2.0, 2.0));
    assert_eq!(aabb.center(), Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(aabb.half_extents(), Vec3::splat(2.0));
}

#[test]
fn aabb_negative_half_extents_are_absolute() {
    let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(-1.0));
    assert_eq!(aabb.min, Vec3::splat(-1.0));
    assert_eq!(aabb.max, Vec3::splat(1.0));
}

#[test]
fn containment_is_inclusive_on_faces() {
    let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
    assert!(aabb.contains_point(Vec3::ZERO));
    assert!(aabb.contains_point(aabb.max));
    assert!(aabb.contains_point(aabb.min));
    assert!(aabb.contains_point(Vec3::new(1.0, 0.0, 0.0)));
    assert!(!aabb.contains_point(Vec3::new(1.0 + 1e-4, 0.0, 0.0)));
    assert!(!aabb.contains_point(Vec3::new(100.0, 0.0, 0.0)));
}

// ============================================================================
// Region
// ============================================================================

#[test]
fn region_accessors() {
    let bounds = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
    let region = Region::new("maps/zoneA".into(), bounds);
    assert_eq!(region.resource().as_str(), "maps/zoneA");
    assert_eq!(region.bounds(), bounds);
}

#[test]
fn resource_ids_compare_by_content() {
    let a: ResourceId = "zone".into();
    let b: ResourceId = String::from("zone").into();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "zone");
}

// ============================================================================
// RegionSet JSON Authoring
// ============================================================================

#[test]
fn region_set_from_json() {
    let json = r#"[
        {
            "resource": "maps/zoneA",
            "bounds": { "min": [-1.0, -1.0, -1.0], "max": [1.0, 1.0, 1.0] }
        },
        {
            "resource": "maps/zoneB",
            "bounds": { "min": [10.0, 0.0, 0.0], "max": [20.0, 5.0, 5.0] }
        }
    ]"#;

    let set = RegionSet::from_json(json).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.regions()[0].resource().as_str(), "maps/zoneA");
    assert_eq!(set.regions()[1].bounds().min, Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn region_set_rejects_malformed_json() {
    assert!(RegionSet::from_json("not json").is_err());
    assert!(RegionSet::from_json(r#"[{"resource": "x"}]"#).is_err());
}

#[test]
fn region_set_accepts_duplicate_resource_ids() {
    // Two regions sharing an id are one streaming unit, not a config error.
    let json = r#"[
        {
            "resource": "maps/zoneA",
            "bounds": { "min": [-1.0, -1.0, -1.0], "max": [1.0, 1.0, 1.0] }
        },
        {
            "resource": "maps/zoneA",
            "bounds": { "min": [5.0, 5.0, 5.0], "max": [6.0, 6.0, 6.0] }
        }
    ]"#;

    let set = RegionSet::from_json(json).unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn region_set_rejects_inverted_bounds() {
    let json = r#"[
        {
            "resource": "maps/zoneA",
            "bounds": { "min": [1.0, 1.0, 1.0], "max": [-1.0, -1.0, -1.0] }
        }
    ]"#;
    let err = RegionSet::from_json(json).unwrap_err();
    assert!(matches!(err, zonestream::StreamError::Config(_)));
}

#[test]
fn empty_region_set() {
    let set = RegionSet::new(Vec::new());
    assert!(set.is_empty());
    assert_eq!(RegionSet::from_json("[]").unwrap().len(), 0);
}

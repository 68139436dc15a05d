//! Containment evaluation.
//!
//! Pure mapping from (region, subject positions) to a desired-active
//! verdict. The trait seam exists so a spatial index can be substituted
//! later without touching the scheduler.

use glam::Vec3;

use crate::region::Region;

/// Decides whether a region's resource should be loaded given the current
/// subject positions. Implementations must be pure and side-effect free.
pub trait Containment: Send + Sync {
    fn should_be_active(&self, region: &Region, positions: &[Vec3]) -> bool;
}

/// Default evaluator: inclusive AABB test against every subject,
/// O(subjects) per region. Sufficient for small-to-moderate region and
/// subject counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoundsContainment;

impl Containment for BoundsContainment {
    fn should_be_active(&self, region: &Region, positions: &[Vec3]) -> bool {
        let bounds = region.bounds();
        positions.iter().any(|p| bounds.contains_point(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Aabb, Region};

    fn unit_region() -> Region {
        Region::new(
            "zone".into(),
            Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE),
        )
    }

    #[test]
    fn inside_means_active() {
        let region = unit_region();
        assert!(BoundsContainment.should_be_active(&region, &[Vec3::ZERO]));
    }

    #[test]
    fn any_subject_suffices() {
        let region = unit_region();
        let positions = [Vec3::new(100.0, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5)];
        assert!(BoundsContainment.should_be_active(&region, &positions));
    }

    #[test]
    fn no_subjects_means_inactive() {
        let region = unit_region();
        assert!(!BoundsContainment.should_be_active(&region, &[]));
    }

    #[test]
    fn face_position_is_inside() {
        let region = unit_region();
        assert!(BoundsContainment.should_be_active(&region, &[region.bounds().max]));
        assert!(BoundsContainment.should_be_active(&region, &[region.bounds().min]));
    }
}

//! Camera and light placement derived from a model's bounding box.
//!
//! Computed once, when a load succeeds: the model is re-centered on the
//! origin, the ground plane drops to its base, and the camera and light
//! rig scale with its largest dimension.

use crate::bounds::Aabb;
use glam::Vec3;

/// Initial camera distance as a multiple of the largest box dimension.
pub const CAMERA_DISTANCE_FACTOR: f32 = 1.6;
/// Zoom-out limit as a multiple of the largest box dimension.
pub const MAX_DISTANCE_FACTOR: f32 = 6.0;

/// Everything the shell repositions after a successful load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFit {
    /// Translation that centers the model's bounding box on the origin.
    pub model_offset: Vec3,
    /// Y of the ground plane after the model is re-centered.
    pub ground_height: f32,
    /// Initial orbit distance.
    pub camera_distance: f32,
    /// Zoom-in limit for the orbit controller.
    pub min_distance: f32,
    /// Zoom-out limit for the orbit controller.
    pub max_distance: f32,
    /// Far plane large enough to keep the whole fit range visible.
    pub far_plane: f32,
    /// Key ("sun") light position, relative to the re-centered model.
    pub key_light_pos: Vec3,
    /// Fill light position, opposite side and lower.
    pub fill_light_pos: Vec3,
}

impl FrameFit {
    pub fn from_bounds(bounds: &Aabb) -> Self {
        let size = bounds.size();
        let d = bounds.max_dimension().max(f32::EPSILON);
        Self {
            model_offset: -bounds.center(),
            ground_height: -0.5 * size.y,
            camera_distance: d * CAMERA_DISTANCE_FACTOR,
            min_distance: d,
            max_distance: d * MAX_DISTANCE_FACTOR,
            far_plane: (bounds.diagonal() * 10.0).max(100.0),
            key_light_pos: Vec3::new(d, 2.0 * d, d),
            fill_light_pos: Vec3::new(-d, 0.5 * d, -d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_offset_centers_bounding_box() {
        let bounds = Aabb::new(Vec3::new(2.0, 1.0, -4.0), Vec3::new(6.0, 9.0, 0.0));
        let fit = FrameFit::from_bounds(&bounds);
        // position == -(min+max)/2 component-wise
        assert_eq!(fit.model_offset, Vec3::new(-4.0, -5.0, 2.0));
    }

    #[test]
    fn test_ground_sits_under_recentered_model() {
        let bounds = Aabb::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 20.0, 5.0));
        let fit = FrameFit::from_bounds(&bounds);
        // After centering, the model's base is at -height/2.
        assert_eq!(fit.ground_height, -10.0);
        assert_eq!(bounds.min.y + fit.model_offset.y, fit.ground_height);
    }

    #[test]
    fn test_camera_distances_scale_with_largest_dimension() {
        // 10 x 20 x 10 model: largest dimension 20.
        let bounds = Aabb::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 20.0, 5.0));
        let fit = FrameFit::from_bounds(&bounds);
        assert_eq!(fit.min_distance, 20.0);
        assert_eq!(fit.camera_distance, 32.0);
        assert_eq!(fit.max_distance, 120.0);
    }

    #[test]
    fn test_distances_hold_for_any_positive_dimension() {
        for d in [0.01f32, 1.0, 350.0, 8000.0] {
            let bounds = Aabb::new(Vec3::ZERO, Vec3::new(d, d * 0.5, d * 0.25));
            let fit = FrameFit::from_bounds(&bounds);
            assert_eq!(fit.min_distance, d);
            assert!((fit.camera_distance - d * CAMERA_DISTANCE_FACTOR).abs() <= d * 1e-6);
            assert!(fit.min_distance <= fit.camera_distance);
            assert!(fit.camera_distance <= fit.max_distance);
        }
    }

    #[test]
    fn test_lights_positioned_relative_to_box() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0));
        let fit = FrameFit::from_bounds(&bounds);
        assert_eq!(fit.key_light_pos, Vec3::new(4.0, 8.0, 4.0));
        assert_eq!(fit.fill_light_pos, Vec3::new(-4.0, 2.0, -4.0));
    }
}

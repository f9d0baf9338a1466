//! Orbit camera controller.
//!
//! Rotate and zoom around a fixed target, no panning. Auto-rotation spins
//! the model like a turntable until the first user drag, which disables it
//! for the rest of the session.

use glam::{Mat4, Vec3};
use std::f32::consts::PI;

/// Turntable speed in radians per second.
const AUTO_ROTATE_SPEED: f32 = 0.5;
/// Decay rate for drag velocity, per second.
const ROTATE_DAMPING: f32 = 8.0;

pub struct OrbitController {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub up: Vec3,
    auto_rotate: bool,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl OrbitController {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            yaw: 0.0,
            pitch: 0.35, // Slightly above the model, looking down
            min_distance: 0.1,
            max_distance: 1000.0,
            up: Vec3::Y,
            auto_rotate: true,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, self.up)
    }

    /// Queue a drag rotation. Applied (and damped out) by `update`.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw_velocity += delta_yaw;
        self.pitch_velocity += delta_pitch;
    }

    /// Exponential zoom: the scale factor stays positive for any event
    /// magnitude, so one large wheel or trackpad delta cannot snap the
    /// distance to a limit or invert it.
    pub fn zoom(&mut self, delta: f32) {
        self.distance =
            (self.distance * 1.1f32.powf(delta)).clamp(self.min_distance, self.max_distance);
    }

    /// Install new zoom limits, keeping the current distance inside them.
    pub fn set_limits(&mut self, min_distance: f32, max_distance: f32) {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self.distance = self.distance.clamp(min_distance, max_distance);
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
    }

    /// Latches off for the session; there is no way to re-enable.
    pub fn stop_auto_rotate(&mut self) {
        self.auto_rotate = false;
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Advance auto-rotation and damp out queued drag velocity. The queued
    /// delta is applied in full over the damping tail, so a drag rotates by
    /// exactly what was queued, just smoothed across a few frames.
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            self.yaw += AUTO_ROTATE_SPEED * dt;
        }
        let decay = (-ROTATE_DAMPING * dt).exp();
        let step = 1.0 - decay;
        self.yaw += self.yaw_velocity * step;
        self.pitch = (self.pitch + self.pitch_velocity * step)
            .clamp(-PI / 2.0 + 0.01, PI / 2.0 - 0.01);
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_sits_at_distance_from_target() {
        let orbit = OrbitController::new(Vec3::new(1.0, 2.0, 3.0), 32.0);
        let d = (orbit.eye() - orbit.target).length();
        assert!((d - 32.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_clamped_to_limits() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 32.0);
        orbit.set_limits(20.0, 120.0);
        for _ in 0..100 {
            orbit.zoom(-1.0);
        }
        assert_eq!(orbit.distance, 20.0);
        for _ in 0..100 {
            orbit.zoom(1.0);
        }
        assert_eq!(orbit.distance, 120.0);
    }

    #[test]
    fn test_large_zoom_event_stays_proportional() {
        // One big trackpad flick zooms far but never lands on the floor.
        let mut orbit = OrbitController::new(Vec3::ZERO, 100.0);
        orbit.zoom(-20.0);
        assert!(orbit.distance > orbit.min_distance);

        // Smaller deltas zoom less.
        let mut gentle = OrbitController::new(Vec3::ZERO, 100.0);
        gentle.zoom(-5.0);
        assert!(gentle.distance > orbit.distance);
        assert!(gentle.distance < 100.0);
    }

    #[test]
    fn test_set_limits_clamps_current_distance() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 5.0);
        orbit.set_limits(20.0, 120.0);
        assert_eq!(orbit.distance, 20.0);
    }

    #[test]
    fn test_auto_rotate_advances_yaw_until_stopped() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 10.0);
        let yaw0 = orbit.yaw;
        orbit.update(0.1);
        assert!(orbit.yaw > yaw0);

        orbit.stop_auto_rotate();
        assert!(!orbit.auto_rotate());
        let yaw1 = orbit.yaw;
        orbit.update(0.1);
        assert_eq!(orbit.yaw, yaw1);
    }

    #[test]
    fn test_drag_velocity_damps_out() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 10.0);
        orbit.stop_auto_rotate();
        orbit.rotate(0.2, 0.0);
        let mut last_yaw = orbit.yaw;
        let mut steps_moving = 0;
        for _ in 0..200 {
            orbit.update(1.0 / 60.0);
            if orbit.yaw > last_yaw + 1e-6 {
                steps_moving += 1;
            }
            last_yaw = orbit.yaw;
        }
        // Inertia carries for a few frames, then dies out.
        assert!(steps_moving > 1);
        assert!(steps_moving < 200);
    }

    #[test]
    fn test_pitch_clamped_short_of_poles() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 10.0);
        orbit.stop_auto_rotate();
        orbit.rotate(0.0, 10.0);
        orbit.update(1.0 / 60.0);
        assert!(orbit.pitch < PI / 2.0);
        orbit.rotate(0.0, -20.0);
        orbit.update(1.0 / 60.0);
        assert!(orbit.pitch > -PI / 2.0);
    }
}

//! Fly camera driven by accumulated keyboard and mouse input.
//!
//! Input only has an effect while the mouse is captured. A mouse button press captures it,
//! the release key lets it go. Events accumulate between frames and [`CameraController::update`]
//! applies them once per frame.

use rapier3d::{
    na::UnitQuaternion,
    prelude::{Isometry, Point, Real, Vector},
};

use crate::constants::CAMERA_START;

/// Radians of rotation per pixel of mouse motion.
pub const MOUSE_SENSITIVITY: f32 = 0.002;
/// World units moved per update while a movement key is held.
pub const MOVE_STEP: f32 = 0.5;
/// Pitch is kept just short of straight up/down.
pub const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Debug)]
pub struct CameraController {
    position: Point<Real>,
    /// Rotation about +Y. Zero looks down -Z.
    yaw: f32,
    /// Rotation about the camera's X axis. Positive looks up.
    pitch: f32,
    captured: bool,
    pending_look: (f32, f32),
    held: [bool; 6],
}

impl Default for CameraController {
    fn default() -> Self {
        let [x, y, z] = CAMERA_START;
        Self::at(Point::new(x, y, z))
    }
}

impl CameraController {
    pub fn at(position: Point<Real>) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            captured: false,
            pending_look: (0.0, 0.0),
            held: [false; 6],
        }
    }

    pub fn position(&self) -> Point<Real> {
        self.position
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Switch mouse capture. Releasing also drops any look input and held keys.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        if !captured {
            self.pending_look = (0.0, 0.0);
            self.held = [false; 6];
        }
    }

    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.captured {
            self.pending_look.0 += dx;
            self.pending_look.1 += dy;
        }
    }

    pub fn set_held(&mut self, movement: CameraMove, held: bool) {
        self.held[movement as usize] = held && self.captured;
    }

    fn orientation(&self) -> UnitQuaternion<Real> {
        UnitQuaternion::from_axis_angle(&Vector::y_axis(), self.yaw)
            * UnitQuaternion::from_axis_angle(&Vector::x_axis(), self.pitch)
    }

    /// Apply the input accumulated since the last update.
    pub fn update(&mut self) {
        if !self.captured {
            return;
        }

        let (dx, dy) = std::mem::take(&mut self.pending_look);
        // Moving the mouse right turns right (negative yaw), moving it down looks down.
        self.yaw -= dx * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch - dy * MOUSE_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);

        let rotation = self.orientation();
        let forward = rotation * -Vector::z();
        let right = rotation * Vector::x();
        let up = Vector::y();

        let mut step = Vector::zeros();
        for (movement, direction) in [
            (CameraMove::Forward, forward),
            (CameraMove::Backward, -forward),
            (CameraMove::Left, -right),
            (CameraMove::Right, right),
            (CameraMove::Up, up),
            (CameraMove::Down, -up),
        ] {
            if self.held[movement as usize] {
                step += direction;
            }
        }
        self.position += step * MOVE_STEP;
    }

    /// Camera-to-world transform.
    pub fn pose(&self) -> Isometry<Real> {
        Isometry::from_parts(self.position.coords.into(), self.orientation())
    }

    /// World-to-camera transform.
    pub fn view(&self) -> Isometry<Real> {
        self.pose().inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: Point<Real>, b: Point<Real>) {
        assert!((a - b).norm() < 1.0e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn starts_at_fixed_pose_looking_down_negative_z() {
        let camera = CameraController::default();
        assert_near(camera.position(), Point::new(10.0, 10.0, 50.0));
        let forward = camera.pose().rotation * -Vector::z();
        assert!((forward - -Vector::z()).norm() < 1.0e-6);
        assert!(!camera.is_captured());
    }

    #[test]
    fn input_is_ignored_until_captured() {
        let mut camera = CameraController::default();
        camera.mouse_motion(100.0, 50.0);
        camera.set_held(CameraMove::Forward, true);
        camera.update();
        assert_near(camera.position(), Point::new(10.0, 10.0, 50.0));
        assert_eq!(camera.pose().rotation, UnitQuaternion::identity());
    }

    #[test]
    fn forward_moves_along_view_direction() {
        let mut camera = CameraController::default();
        camera.set_captured(true);
        camera.set_held(CameraMove::Forward, true);
        camera.update();
        camera.update();
        assert_near(camera.position(), Point::new(10.0, 10.0, 50.0 - 2.0 * MOVE_STEP));

        camera.set_held(CameraMove::Forward, false);
        camera.set_held(CameraMove::Up, true);
        camera.update();
        assert_near(camera.position(), Point::new(10.0, 10.0 + MOVE_STEP, 49.0));
    }

    #[test]
    fn mouse_motion_turns_and_pitch_is_clamped() {
        let mut camera = CameraController::default();
        camera.set_captured(true);

        // Quarter turn to the right: forward becomes +X.
        let pixels = std::f32::consts::FRAC_PI_2 / MOUSE_SENSITIVITY;
        camera.mouse_motion(pixels, 0.0);
        camera.update();
        let forward = camera.pose().rotation * -Vector::z();
        assert!((forward - Vector::x()).norm() < 1.0e-3, "{forward:?}");

        // Look far up; pitch stops short of vertical.
        camera.mouse_motion(0.0, -1.0e6);
        camera.update();
        let forward = camera.pose().rotation * -Vector::z();
        assert!(forward.y > 0.99 && forward.y < 1.0);
    }

    #[test]
    fn release_drops_pending_input() {
        let mut camera = CameraController::default();
        camera.set_captured(true);
        camera.set_held(CameraMove::Left, true);
        camera.mouse_motion(10.0, 10.0);
        camera.set_captured(false);
        camera.set_captured(true);
        camera.update();
        assert_near(camera.position(), Point::new(10.0, 10.0, 50.0));
        assert_eq!(camera.pose().rotation, UnitQuaternion::identity());
    }

    #[test]
    fn view_inverts_pose() {
        let camera = CameraController::default();
        let origin_in_view = camera.view() * camera.position();
        assert_near(origin_in_view, Point::origin());
    }
}

//! Drives the simulation's main loop from inside Bevy's schedule.
//!
//! Bevy owns the event loop, so instead of [`MainLoop::run`] every app update runs one
//! [`MainLoop::iterate`], with the frame pacer wrapped around the whole update.

use bevy::prelude::*;
use sim::rapier3d::prelude::{Isometry, Real};
use sim::{FramePacer, FrameView, Frontend, FrontendEvent, LoopState, MainLoop};

use crate::{camera, input, spheres};

#[derive(Resource)]
pub struct Demo(Option<MainLoop>);

impl Demo {
    pub fn new(main_loop: MainLoop) -> Self {
        Self(Some(main_loop))
    }

    /// `None` once the loop has stopped and the world was released.
    pub fn main_loop(&self) -> Option<&MainLoop> {
        self.0.as_ref()
    }
}

/// The frame the main loop rendered during this update, if any.
#[derive(Resource, Default)]
pub struct RenderedFrame(pub Option<FrameView>);

#[derive(Resource, Default)]
struct Pacer(FramePacer);

/// Hands Bevy's collected input to the main loop and keeps what it rendered.
struct BevyFrontend {
    events: Vec<FrontendEvent>,
    rendered: Option<FrameView>,
}

impl Frontend for BevyFrontend {
    fn poll_events(&mut self) -> Vec<FrontendEvent> {
        std::mem::take(&mut self.events)
    }

    fn render(&mut self, frame: &FrameView) {
        self.rendered = Some(frame.clone());
    }

    // Bevy's render app presents once the update finishes.
    fn present(&mut self) {}
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<RenderedFrame>();
    app.init_resource::<Pacer>();

    app.add_systems(First, begin_frame);
    app.add_systems(
        Update,
        (
            input::collect_events.pipe(run_frame),
            (spheres::draw_spheres, camera::apply_view),
        )
            .chain(),
    );
    app.add_systems(Last, pace_frame);
}

fn begin_frame(mut pacer: ResMut<Pacer>) {
    pacer.0.begin();
}

fn pace_frame(mut pacer: ResMut<Pacer>) {
    pacer.0.finish();
}

fn run_frame(
    In(events): In<Vec<FrontendEvent>>,
    mut demo: ResMut<Demo>,
    mut rendered: ResMut<RenderedFrame>,
    mut exit: MessageWriter<AppExit>,
) {
    rendered.0 = None;
    let Some(main_loop) = demo.0.as_mut() else {
        return;
    };

    let mut frontend = BevyFrontend {
        events,
        rendered: None,
    };
    if main_loop.iterate(&mut frontend) == LoopState::Running {
        rendered.0 = frontend.rendered;
        return;
    }

    if let Some(main_loop) = demo.0.take() {
        let report = main_loop.shutdown();
        info!(
            "shut down: {} entities, {} bodies, {} colliders released",
            report.entities, report.bodies, report.colliders
        );
    }
    exit.write(AppExit::Success);
}

/// Physics pose to Bevy transform. Both use right-handed, Y-up coordinates.
pub fn pose_to_transform(pose: &Isometry<Real>) -> Transform {
    let translation = pose.translation.vector;
    let rotation = pose.rotation.into_inner();
    Transform {
        translation: Vec3::new(translation.x, translation.y, translation.z),
        rotation: Quat::from_xyzw(rotation.i, rotation.j, rotation.k, rotation.w),
        scale: Vec3::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim::rapier3d::na::{Point3, Translation3, UnitQuaternion, Vector3};

    #[test]
    fn pose_keeps_translation_and_rotation() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.7);
        let pose = Isometry::from_parts(Translation3::new(1.0, -2.0, 3.5), rotation);
        let transform = pose_to_transform(&pose);

        assert_eq!(transform.translation, Vec3::new(1.0, -2.0, 3.5));
        let expected = Quat::from_rotation_y(0.7);
        assert!(transform.rotation.angle_between(expected) < 1.0e-5);

        // Same point mapped by both.
        let p = pose * Point3::new(0.0, 0.0, -1.0);
        let q = transform.transform_point(Vec3::new(0.0, 0.0, -1.0));
        assert!((Vec3::new(p.x, p.y, p.z) - q).length() < 1.0e-5);
    }

    #[test]
    fn frontend_hands_events_over_once() {
        let mut frontend = BevyFrontend {
            events: vec![FrontendEvent::MouseButtonDown],
            rendered: None,
        };
        assert_eq!(frontend.poll_events(), [FrontendEvent::MouseButtonDown]);
        assert!(frontend.poll_events().is_empty());
    }
}

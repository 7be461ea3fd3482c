use bevy::prelude::*;
use sim::{CameraController, Projection as SceneProjection};

use crate::frame::{RenderedFrame, pose_to_transform};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
}

fn add_camera(mut commands: Commands) {
    let projection = SceneProjection::default();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: projection.fov_degrees.to_radians(),
            aspect_ratio: projection.aspect,
            near: projection.near,
            far: projection.far,
            ..default()
        }),
        pose_to_transform(&CameraController::default().pose()),
    ));
}

/// Move the camera to the pose the main loop rendered with.
pub(crate) fn apply_view(
    frame: Res<RenderedFrame>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    let Some(view) = frame.0.as_ref() else {
        return;
    };
    let Ok(mut cam_tf) = camera_query.single_mut() else {
        return;
    };
    *cam_tf = pose_to_transform(&view.camera);
}

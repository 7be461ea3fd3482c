use bevy::{input::mouse::AccumulatedMouseMotion, prelude::*, window::WindowCloseRequested};
use leafwing_input_manager::prelude::*;
use sim::{FrontendEvent, Key};

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    Quit,
    ReleaseCursor,
    CaptureCursor,
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Actions that are forwarded as key down/up pairs.
const HELD_KEYS: [(InputAction, Key); 6] = [
    (InputAction::Forward, Key::Forward),
    (InputAction::Backward, Key::Backward),
    (InputAction::Left, Key::Left),
    (InputAction::Right, Key::Right),
    (InputAction::Up, Key::Up),
    (InputAction::Down, Key::Down),
];

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::Quit, KeyCode::Escape);
    input_map.insert(InputAction::ReleaseCursor, KeyCode::KeyY);
    input_map.insert(InputAction::CaptureCursor, MouseButton::Left);
    input_map.insert(InputAction::CaptureCursor, MouseButton::Right);
    input_map.insert(InputAction::Forward, KeyCode::KeyW);
    input_map.insert(InputAction::Backward, KeyCode::KeyS);
    input_map.insert(InputAction::Left, KeyCode::KeyA);
    input_map.insert(InputAction::Right, KeyCode::KeyD);
    input_map.insert(InputAction::Up, KeyCode::Space);
    input_map.insert(InputAction::Down, KeyCode::ShiftLeft);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}

/// Translate this frame's window and input state into main loop events.
pub(crate) fn collect_events(
    actions: Res<ActionState<InputAction>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut close_requests: MessageReader<WindowCloseRequested>,
) -> Vec<FrontendEvent> {
    let mut events = Vec::new();

    if close_requests.read().count() > 0 {
        events.push(FrontendEvent::Quit);
    }
    if actions.just_pressed(&InputAction::Quit) {
        events.push(FrontendEvent::KeyDown(Key::Escape));
    }
    if actions.just_pressed(&InputAction::ReleaseCursor) {
        events.push(FrontendEvent::KeyDown(Key::ReleaseCursor));
    }
    if actions.just_pressed(&InputAction::CaptureCursor) {
        events.push(FrontendEvent::MouseButtonDown);
    }

    for (action, key) in HELD_KEYS {
        if actions.just_pressed(&action) {
            events.push(FrontendEvent::KeyDown(key));
        }
        if actions.just_released(&action) {
            events.push(FrontendEvent::KeyUp(key));
        }
    }

    let delta = mouse_motion.delta;
    if delta != Vec2::ZERO {
        events.push(FrontendEvent::MouseMotion {
            dx: delta.x,
            dy: delta.y,
        });
    }
    events
}

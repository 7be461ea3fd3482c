//! Main loop state machine and frame pacing.
//!
//! One iteration runs, in order:
//! 1. drain input events (quit/escape stop the loop, the rest go to the camera),
//! 2. step the physics world by [`FIXED_DT`](crate::constants::FIXED_DT),
//! 3. update the camera and render every sphere,
//! 4. perturb every sphere,
//! 5. present the frame.
//!
//! Pacing (step 6) is separate so a front end that owns its own event loop can run it
//! around the iteration.

use std::{
    thread,
    time::{Duration, Instant},
};

use rapier3d::prelude::{Isometry, Real};

use crate::{
    camera::{CameraController, CameraMove},
    constants::FRAME_BUDGET,
    render::SphereDraw,
    simulation::{ShutdownReport, Simulation},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal.
    Stopped,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// Releases the mouse from the camera.
    ReleaseCursor,
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    fn camera_move(self) -> Option<CameraMove> {
        match self {
            Key::Forward => Some(CameraMove::Forward),
            Key::Backward => Some(CameraMove::Backward),
            Key::Left => Some(CameraMove::Left),
            Key::Right => Some(CameraMove::Right),
            Key::Up => Some(CameraMove::Up),
            Key::Down => Some(CameraMove::Down),
            Key::Escape | Key::ReleaseCursor => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FrontendEvent {
    /// Window close or any other request to end the program.
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseButtonDown,
    MouseMotion { dx: f32, dy: f32 },
}

/// Everything a front end needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameView {
    /// Camera-to-world transform.
    pub camera: Isometry<Real>,
    pub spheres: Vec<SphereDraw>,
}

/// Window, input and presentation backend driven by [`MainLoop`].
pub trait Frontend {
    /// Drain every input event that arrived since the last call.
    fn poll_events(&mut self) -> Vec<FrontendEvent>;
    /// Clear, set the view and draw every sphere.
    fn render(&mut self, frame: &FrameView);
    /// Show the rendered frame.
    fn present(&mut self);
}

pub struct MainLoop {
    state: LoopState,
    simulation: Simulation,
    camera: CameraController,
    frames: u64,
}

impl MainLoop {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            state: LoopState::Running,
            simulation,
            camera: CameraController::default(),
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Number of completed iterations.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    fn dispatch(&mut self, event: FrontendEvent) {
        match event {
            FrontendEvent::Quit | FrontendEvent::KeyDown(Key::Escape) => self.stop(),
            FrontendEvent::KeyDown(Key::ReleaseCursor) => self.camera.set_captured(false),
            FrontendEvent::MouseButtonDown => self.camera.set_captured(true),
            FrontendEvent::MouseMotion { dx, dy } => self.camera.mouse_motion(dx, dy),
            FrontendEvent::KeyDown(key) => {
                if let Some(movement) = key.camera_move() {
                    self.camera.set_held(movement, true);
                }
            }
            FrontendEvent::KeyUp(key) => {
                if let Some(movement) = key.camera_move() {
                    self.camera.set_held(movement, false);
                }
            }
        }
    }

    /// Run one iteration (steps 1 to 5). Does nothing once stopped.
    pub fn iterate<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> LoopState {
        if self.state == LoopState::Stopped {
            return self.state;
        }

        for event in frontend.poll_events() {
            self.dispatch(event);
        }
        if self.state == LoopState::Stopped {
            return self.state;
        }

        self.simulation.step();

        self.camera.update();
        frontend.render(&FrameView {
            camera: self.camera.pose(),
            spheres: self.simulation.draws(),
        });

        self.simulation.perturb();
        frontend.present();

        self.frames += 1;
        self.state
    }

    /// Iterate with pacing until stopped, then shut down.
    pub fn run<F: Frontend + ?Sized>(
        mut self,
        frontend: &mut F,
        pacer: &mut FramePacer,
    ) -> ShutdownReport {
        while self.state == LoopState::Running {
            pacer.begin();
            if self.iterate(frontend) == LoopState::Running {
                pacer.finish();
            }
        }
        self.shutdown()
    }

    /// Release the simulation. Consumes the loop; there is no way back to `Running`.
    pub fn shutdown(self) -> ShutdownReport {
        log::info!("main loop stopped after {} frames", self.frames);
        self.simulation.shutdown()
    }
}

/// Time left in `budget` after `elapsed`, or `None` if the frame ran over.
pub fn remaining_budget(budget: Duration, elapsed: Duration) -> Option<Duration> {
    budget.checked_sub(elapsed).filter(|left| !left.is_zero())
}

/// Best-effort frame pacing: sleeps the rest of the budget after a fast frame, never catches up
/// after a slow one.
#[derive(Debug)]
pub struct FramePacer {
    budget: Duration,
    frame_start: Option<Instant>,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(FRAME_BUDGET)
    }
}

impl FramePacer {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            frame_start: None,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Mark the start of a frame.
    pub fn begin(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Sleep out the rest of the frame budget. Returns how long it slept.
    pub fn finish(&mut self) -> Duration {
        let Some(start) = self.frame_start.take() else {
            return Duration::ZERO;
        };
        match remaining_budget(self.budget, start.elapsed()) {
            Some(left) => {
                thread::sleep(left);
                left
            }
            None => Duration::ZERO,
        }
    }
}

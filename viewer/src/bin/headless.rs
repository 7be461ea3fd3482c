//! Runs the demonstration without a window: same prompts, same loop, a fixed number of frames.
//!
//! Usage: `headless [FRAMES]` (default 600, ten seconds at the frame budget).
//! Log verbosity follows `RUST_LOG`.

use std::{env, io, process::ExitCode};

use sim::{FramePacer, FrameView, Frontend, FrontendEvent, MainLoop, Simulation};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_FRAMES: u64 = 600;

/// Frontend that asks to quit after `frames_left` frames and counts what it drew.
struct Scripted {
    frames_left: u64,
    spheres_drawn: usize,
}

impl Frontend for Scripted {
    fn poll_events(&mut self) -> Vec<FrontendEvent> {
        if self.frames_left == 0 {
            return vec![FrontendEvent::Quit];
        }
        self.frames_left -= 1;
        Vec::new()
    }

    fn render(&mut self, frame: &FrameView) {
        self.spheres_drawn += frame.spheres.len();
    }

    fn present(&mut self) {}
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let frames = match env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        None => DEFAULT_FRAMES,
        Some(Ok(frames)) => frames,
        Some(Err(err)) => {
            error!("frame count must be a non-negative integer: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = match sim::read_config(&mut io::stdin().lock(), &mut io::stdout()) {
        Ok(config) => config,
        Err(err) => {
            error!("could not read the configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config = match sim::seed_from_env() {
        Some(seed) => config.with_seed(seed),
        None => config,
    };

    let main_loop = MainLoop::new(Simulation::init(config));
    let mut frontend = Scripted {
        frames_left: frames,
        spheres_drawn: 0,
    };
    let report = main_loop.run(&mut frontend, &mut FramePacer::default());
    info!(
        frames,
        spheres_drawn = frontend.spheres_drawn,
        ?report,
        "headless run finished"
    );
    ExitCode::SUCCESS
}

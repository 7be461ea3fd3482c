//! Console answers in, shutdown report out.

use std::{io::Cursor, time::Duration};

use sim::{
    FramePacer, FrameView, Frontend, FrontendEvent, LoopState, MainLoop, Placement,
    ShutdownReport, Simulation, SpeedTier, read_config, spawner::MotionAxis,
};

/// Frontend that quits after a fixed number of rendered frames.
struct QuitAfter {
    frames_left: usize,
    rendered: usize,
    presented: usize,
}

impl QuitAfter {
    fn new(frames: usize) -> Self {
        Self {
            frames_left: frames,
            rendered: 0,
            presented: 0,
        }
    }
}

impl Frontend for QuitAfter {
    fn poll_events(&mut self) -> Vec<FrontendEvent> {
        if self.frames_left == 0 {
            return vec![FrontendEvent::Quit];
        }
        self.frames_left -= 1;
        Vec::new()
    }

    fn render(&mut self, _frame: &FrameView) {
        self.rendered += 1;
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

fn configure(answers: &str, seed: u64) -> Simulation {
    let mut input = Cursor::new(answers.as_bytes().to_vec());
    let mut output = Vec::new();
    let config = read_config(&mut input, &mut output).unwrap().with_seed(seed);
    Simulation::init(config)
}

#[test]
fn planar_slow_five() {
    let sim = configure("n\ns\n5\n", 42);
    assert_eq!(sim.config().placement, Placement::Planar);
    assert_eq!(sim.config().speed, SpeedTier::Slow);
    assert_eq!(sim.registry().len(), 5);

    for entity in sim.registry().iter() {
        let pose = sim.world().pose(entity.body).unwrap();
        assert_eq!(pose.translation.vector.z, 0.0, "{} left the plane", entity.id);

        assert!((-3..=0).contains(&entity.motion.speed));
        let velocity = sim.world().linear_velocity(entity.body).unwrap();
        assert_eq!(velocity, entity.motion.velocity());
        let moving_axes = velocity.iter().filter(|c| **c != 0.0).count();
        assert!(moving_axes <= 1);
        if entity.motion.axis == MotionAxis::None {
            assert_eq!(moving_axes, 0);
        }
    }
}

#[test]
fn volumetric_fast_zero_quits_immediately() {
    let sim = configure("y\nf\n0\n", 1);
    assert_eq!(sim.registry().len(), 0);

    let main_loop = MainLoop::new(sim);
    assert_eq!(main_loop.state(), LoopState::Running);

    let mut frontend = QuitAfter::new(0);
    let report = main_loop.run(&mut frontend, &mut FramePacer::default());
    assert_eq!(report, ShutdownReport::default());
    assert_eq!(frontend.rendered, 0);
    assert_eq!(frontend.presented, 0);
}

#[test]
fn every_spawned_body_is_released_once() {
    for count in [1, 13, 64] {
        let answers = format!("y\nf\n{count}\n");
        let main_loop = MainLoop::new(configure(&answers, count as u64));

        let mut frontend = QuitAfter::new(5);
        let mut pacer = FramePacer::new(Duration::from_millis(1));
        let report = main_loop.run(&mut frontend, &mut pacer);

        assert_eq!(frontend.rendered, 5);
        assert_eq!(frontend.presented, 5);
        assert_eq!(
            report,
            ShutdownReport {
                entities: count,
                bodies: count,
                colliders: count,
            }
        );
    }
}

#[test]
fn run_is_paced_to_the_frame_budget() {
    let main_loop = MainLoop::new(configure("n\ns\n3\n", 2));
    let mut frontend = QuitAfter::new(6);
    let mut pacer = FramePacer::new(Duration::from_millis(10));

    let start = std::time::Instant::now();
    main_loop.run(&mut frontend, &mut pacer);
    assert!(start.elapsed() >= Duration::from_millis(60));
}

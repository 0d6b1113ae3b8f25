//! Host-driven animation loop for an `OrbitalEngine`.
//!
//! The host (egui, a test harness, ...) calls `frame` once per display frame.
//! Elapsed time is measured between consecutive frames, so the ring keeps
//! its angular velocity under any frame rate. `stop` (or dropping the loop)
//! tears down the engine and cancels the host registration exactly once.

use std::time::Instant;

use super::engine::{OrbitalEngine, RenderSurface};

/// Periodic frame callback provided by the host environment.
pub trait FrameHost {
    /// Ask for one more frame.
    fn schedule(&mut self);
    /// Drop the registration; no frames should be requested afterwards.
    fn cancel(&mut self);
}

impl FrameHost for egui::Context {
    fn schedule(&mut self) {
        self.request_repaint();
    }

    fn cancel(&mut self) {
        // egui repaints only on request, so not asking again is enough.
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LoopState {
    Running { last_frame: Option<Instant> },
    Stopped,
}

pub struct AnimationLoop<H: FrameHost> {
    engine: OrbitalEngine,
    host: H,
    state: LoopState,
}

impl<H: FrameHost> AnimationLoop<H> {
    /// Register with `host` and start driving `engine`.
    pub fn start(engine: OrbitalEngine, mut host: H) -> Self {
        host.schedule();
        Self {
            engine,
            host,
            state: LoopState::Running { last_frame: None },
        }
    }

    /// Handle one host frame at `now`. The first frame only lays out the
    /// ring; later frames advance it by the real time since the previous one.
    ///
    /// Returns false (and touches nothing) once the loop is stopped.
    pub fn frame<S: RenderSurface + ?Sized>(&mut self, now: Instant, surface: &mut S) -> bool {
        let last_frame = match &mut self.state {
            LoopState::Stopped => return false,
            LoopState::Running { last_frame } => last_frame,
        };
        let delta_ms = (*last_frame)
            .map(|prev| now.saturating_duration_since(prev).as_secs_f32() * 1000.0)
            .unwrap_or(0.0);
        *last_frame = Some(now);

        self.engine.tick(delta_ms, surface);
        self.host.schedule();
        true
    }

    /// Tear down: dispose the engine and cancel the host callback.
    /// Returns false if the loop was already stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }
        self.state = LoopState::Stopped;
        self.engine.dispose();
        self.host.cancel();
        log::debug!("orbit: animation loop stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.state != LoopState::Stopped
    }

    pub fn engine(&self) -> &OrbitalEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut OrbitalEngine {
        &mut self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: FrameHost> Drop for AnimationLoop<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::{sample_items, NodeLayout};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct TestHost {
        scheduled: Rc<Cell<u32>>,
        cancelled: Rc<Cell<u32>>,
    }

    impl FrameHost for TestHost {
        fn schedule(&mut self) {
            self.scheduled.set(self.scheduled.get() + 1);
        }
        fn cancel(&mut self) {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }

    fn ring() -> OrbitalEngine {
        OrbitalEngine::new(sample_items(5), None, |_| {}, false)
    }

    #[test]
    fn measures_real_elapsed_time() {
        let t0 = Instant::now();
        let mut surface: Vec<NodeLayout> = Vec::new();

        let mut coarse = AnimationLoop::start(ring(), TestHost::default());
        coarse.frame(t0, &mut surface);
        coarse.frame(t0 + Duration::from_millis(500), &mut surface);

        let mut fine = AnimationLoop::start(ring(), TestHost::default());
        fine.frame(t0, &mut surface);
        for i in 1..=10 {
            fine.frame(t0 + Duration::from_millis(50 * i), &mut surface);
        }

        assert!((coarse.engine().rotation_degrees() - 3.0).abs() < 1e-3);
        assert!(
            (coarse.engine().rotation_degrees() - fine.engine().rotation_degrees()).abs() < 1e-3
        );
    }

    #[test]
    fn irregular_frames_sum_to_same_rotation() {
        let t0 = Instant::now();
        let mut surface: Vec<NodeLayout> = Vec::new();
        let mut lp = AnimationLoop::start(ring(), TestHost::default());
        lp.frame(t0, &mut surface);
        let mut elapsed = 0;
        for step in [3u64, 41, 16, 120, 7, 813] {
            elapsed += step;
            lp.frame(t0 + Duration::from_millis(elapsed), &mut surface);
        }
        let expected = elapsed as f32 / 50.0 * 0.3;
        assert!((lp.engine().rotation_degrees() - expected).abs() < 1e-3);
    }

    #[test]
    fn first_frame_does_not_rotate() {
        let mut surface: Vec<NodeLayout> = Vec::new();
        let mut lp = AnimationLoop::start(ring(), TestHost::default());
        assert!(lp.frame(Instant::now(), &mut surface));
        assert_eq!(lp.engine().rotation_degrees(), 0.0);
        assert_eq!(surface.len(), 5);
    }

    #[test]
    fn schedules_next_frame_while_running() {
        let host = TestHost::default();
        let mut surface: Vec<NodeLayout> = Vec::new();
        let mut lp = AnimationLoop::start(ring(), host.clone());
        assert_eq!(host.scheduled.get(), 1);
        lp.frame(Instant::now(), &mut surface);
        assert_eq!(host.scheduled.get(), 2);
    }

    #[test]
    fn stop_cancels_exactly_once() {
        let host = TestHost::default();
        let mut lp = AnimationLoop::start(ring(), host.clone());
        assert!(lp.stop());
        assert!(!lp.stop());
        drop(lp);
        assert_eq!(host.cancelled.get(), 1);
    }

    #[test]
    fn drop_cancels_registration() {
        let host = TestHost::default();
        {
            let _lp = AnimationLoop::start(ring(), host.clone());
        }
        assert_eq!(host.cancelled.get(), 1);
    }

    #[test]
    fn egui_host_stops_requesting_repaints() {
        let ctx = egui::Context::default();
        let settle = |ctx: &egui::Context| {
            for _ in 0..4 {
                let _ = ctx.run(egui::RawInput::default(), |_| {});
            }
        };
        let mut surface: Vec<NodeLayout> = Vec::new();
        let mut lp = AnimationLoop::start(ring(), ctx.clone());
        assert!(lp.host().has_requested_repaint());

        settle(&ctx);
        assert!(!ctx.has_requested_repaint());
        assert!(lp.frame(Instant::now(), &mut surface));
        assert!(ctx.has_requested_repaint());

        lp.stop();
        settle(&ctx);
        assert!(!lp.frame(Instant::now(), &mut surface));
        assert!(!ctx.has_requested_repaint());
    }

    #[test]
    fn frames_after_stop_are_ignored() {
        let host = TestHost::default();
        let t0 = Instant::now();
        let mut surface: Vec<NodeLayout> = Vec::new();
        let mut lp = AnimationLoop::start(ring(), host.clone());
        lp.frame(t0, &mut surface);
        lp.frame(t0 + Duration::from_millis(100), &mut surface);
        let rotation = lp.engine().rotation_degrees();
        let scheduled = host.scheduled.get();
        let snapshot = surface.clone();

        lp.stop();
        assert!(!lp.frame(t0 + Duration::from_millis(900), &mut surface));
        assert_eq!(lp.engine().rotation_degrees(), rotation);
        assert_eq!(surface, snapshot);
        assert_eq!(host.scheduled.get(), scheduled);
        assert!(lp.engine().is_disposed());
        assert!(!lp.is_running());
    }
}

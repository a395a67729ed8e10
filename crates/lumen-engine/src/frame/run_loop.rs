use anyhow::Result;

use crate::core::Lifecycle;

use super::scheduler::{FrameRequest, FrameScheduler};

/// Per-frame callback driven by a [`Loop`].
pub trait Tick {
    fn tick(&mut self) -> Result<()>;
}

impl<F> Tick for F
where
    F: FnMut() -> Result<()>,
{
    fn tick(&mut self) -> Result<()> {
        self()
    }
}

/// Tick used by [`Loop::new`].
pub type IdleTick = fn() -> Result<()>;

fn idle() -> Result<()> {
    Ok(())
}

/// Frame loop bound to the host's display refresh.
///
/// Each step runs the tick and then requests the next frame, so the loop keeps
/// one request outstanding while running. `running()` is exactly "a request is
/// outstanding".
///
/// A tick that returns an error halts the loop: the step does not reschedule.
/// The error is logged and returned to whoever drove the step; `start()` may be
/// called again afterwards.
#[derive(Debug)]
pub struct Loop<S, T = IdleTick> {
    scheduler: S,
    tick: T,
    frame_request: Option<FrameRequest>,
}

impl<S: FrameScheduler> Loop<S> {
    /// Creates a loop with a no-op tick.
    pub fn new(scheduler: S) -> Self {
        Self::with_tick(scheduler, idle as IdleTick)
    }
}

impl<S: FrameScheduler, T: Tick> Loop<S, T> {
    pub fn with_tick(scheduler: S, tick: T) -> Self {
        Self {
            scheduler,
            tick,
            frame_request: None,
        }
    }

    pub fn running(&self) -> bool {
        self.frame_request.is_some()
    }

    /// The outstanding frame request, if running.
    pub fn frame_request(&self) -> Option<FrameRequest> {
        self.frame_request
    }

    pub fn tick(&self) -> &T {
        &self.tick
    }

    pub fn tick_mut(&mut self) -> &mut T {
        &mut self.tick
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Starts the loop unless it is already running.
    ///
    /// The first step runs immediately; its tick error is returned.
    pub fn try_start(&mut self) -> Result<()> {
        if self.running() {
            return Ok(());
        }
        self.step()
    }

    /// Host entry point for a due frame.
    ///
    /// Requests that were cancelled or superseded are ignored; hosts may still
    /// deliver a callback they dispatched before `stop()` ran.
    pub fn frame(&mut self, request: FrameRequest) -> Result<()> {
        if self.frame_request != Some(request) {
            log::trace!("ignoring stale frame request {}", request.id());
            return Ok(());
        }

        self.frame_request = None;
        self.step()
    }

    fn step(&mut self) -> Result<()> {
        if let Err(err) = self.tick.tick() {
            log::error!("tick failed, frame loop halted: {err:#}");
            return Err(err);
        }

        self.frame_request = Some(self.scheduler.request_frame());
        Ok(())
    }
}

impl<S: FrameScheduler, T: Tick> Lifecycle for Loop<S, T> {
    /// Same as [`Loop::try_start`]; a failing first tick is logged and leaves
    /// the loop stopped.
    fn start(&mut self) {
        let _ = self.try_start();
    }

    fn stop(&mut self) {
        if let Some(request) = self.frame_request.take() {
            self.scheduler.cancel_frame(request);
        }
    }

    fn dispose(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::frame::ManualScheduler;

    fn counting_loop() -> (Loop<ManualScheduler, impl FnMut() -> Result<()>>, Rc<Cell<u32>>) {
        let ticks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&ticks);
        let run_loop = Loop::with_tick(ManualScheduler::new(), move || -> Result<()> {
            counter.set(counter.get() + 1);
            Ok(())
        });
        (run_loop, ticks)
    }

    /// Plays one display refresh: every due request is reported to the loop.
    fn refresh<T: Tick>(run_loop: &mut Loop<ManualScheduler, T>) -> Result<()> {
        for request in run_loop.scheduler_mut().take_due() {
            run_loop.frame(request)?;
        }
        Ok(())
    }

    // ── start / stop ──────────────────────────────────────────────────────

    #[test]
    fn running_follows_start_and_stop() {
        let (mut run_loop, _ticks) = counting_loop();
        assert!(!run_loop.running());

        run_loop.start();
        assert!(run_loop.running());
        assert!(run_loop.frame_request().is_some());

        run_loop.stop();
        assert!(!run_loop.running());
        assert!(run_loop.frame_request().is_none());
        assert!(run_loop.scheduler().outstanding().is_empty());
    }

    #[test]
    fn start_ticks_immediately() {
        let (mut run_loop, ticks) = counting_loop();
        run_loop.start();
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn double_start_keeps_one_request() {
        let (mut run_loop, ticks) = counting_loop();
        run_loop.start();
        run_loop.start();

        assert_eq!(run_loop.scheduler().outstanding().len(), 1);
        assert_eq!(ticks.get(), 1);

        for _ in 0..3 {
            refresh(&mut run_loop).unwrap();
        }
        // One tick per refresh, not two.
        assert_eq!(ticks.get(), 4);
        assert_eq!(run_loop.scheduler().outstanding().len(), 1);
    }

    #[test]
    fn stop_when_idle_is_harmless() {
        let (mut run_loop, _ticks) = counting_loop();
        run_loop.stop();
        run_loop.stop();
        assert_eq!(run_loop.scheduler().cancelled(), 0);
        assert!(!run_loop.running());
    }

    #[test]
    fn dispose_stops() {
        let (mut run_loop, _ticks) = counting_loop();
        run_loop.start();
        run_loop.dispose();
        assert!(!run_loop.running());
        assert_eq!(run_loop.scheduler().cancelled(), 1);
    }

    #[test]
    fn default_tick_is_a_no_op() {
        let mut run_loop = Loop::new(ManualScheduler::new());
        run_loop.start();
        refresh(&mut run_loop).unwrap();
        assert!(run_loop.running());
        assert_eq!(run_loop.scheduler().requested(), 2);
    }

    // ── frame ─────────────────────────────────────────────────────────────

    #[test]
    fn each_frame_reschedules() {
        let (mut run_loop, ticks) = counting_loop();
        run_loop.start();
        let first = run_loop.frame_request().unwrap();

        refresh(&mut run_loop).unwrap();
        let second = run_loop.frame_request().unwrap();

        assert_ne!(first, second);
        assert_eq!(ticks.get(), 2);
    }

    #[test]
    fn stale_request_after_stop_is_ignored() {
        let (mut run_loop, ticks) = counting_loop();
        run_loop.start();
        let request = run_loop.frame_request().unwrap();

        run_loop.stop();
        run_loop.frame(request).unwrap();

        assert_eq!(ticks.get(), 1);
        assert!(!run_loop.running());
    }

    #[test]
    fn superseded_request_is_ignored() {
        let (mut run_loop, ticks) = counting_loop();
        run_loop.start();
        let old = run_loop.frame_request().unwrap();
        refresh(&mut run_loop).unwrap();

        run_loop.frame(old).unwrap();
        assert_eq!(ticks.get(), 2);
    }

    // ── tick errors ───────────────────────────────────────────────────────

    #[test]
    fn failing_tick_halts_loop() {
        let ticks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&ticks);
        let mut run_loop = Loop::with_tick(ManualScheduler::new(), move || -> Result<()> {
            counter.set(counter.get() + 1);
            anyhow::ensure!(counter.get() != 3, "boom");
            Ok(())
        });

        run_loop.start();
        refresh(&mut run_loop).unwrap();
        let err = refresh(&mut run_loop).unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert!(!run_loop.running());
        assert!(run_loop.scheduler().outstanding().is_empty());

        // Nothing left to drive the loop.
        refresh(&mut run_loop).unwrap();
        assert_eq!(ticks.get(), 3);

        run_loop.start();
        assert!(run_loop.running());
        assert_eq!(ticks.get(), 4);
    }

    #[test]
    fn failing_first_tick_reports_from_try_start() {
        let mut run_loop = Loop::with_tick(ManualScheduler::new(), || -> Result<()> {
            anyhow::bail!("no device")
        });
        assert!(run_loop.try_start().is_err());
        assert!(!run_loop.running());
        assert_eq!(run_loop.scheduler().requested(), 0);
    }
}

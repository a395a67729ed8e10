use std::cell::{Ref, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::core::Lifecycle;
use crate::frame::{FrameRequest, FrameScheduler, Loop, Tick};
use crate::render::Renderer;
use crate::time::{Clock, TimeSource, WallTime};
use crate::viewport::{ResizeEntry, Surface, Viewport};

/// Per-frame work of a [`Stage`].
///
/// Owned by the stage's loop. Scene and renderer sit behind `Rc<RefCell<_>>`
/// because the viewport's resize callback reaches them too.
struct StageTick<E, C, R, T> {
    clock: Clock<T>,
    viewport: Viewport<E>,
    scene: Rc<RefCell<C>>,
    renderer: Rc<RefCell<R>>,
}

impl<E, C, R, T> Tick for StageTick<E, C, R, T>
where
    E: Surface,
    C: Lifecycle,
    R: Renderer<C>,
    T: TimeSource,
{
    fn tick(&mut self) -> Result<()> {
        self.clock.update();
        // Fires the coalesced resize, if any, before the scene advances.
        self.viewport.update();

        self.scene.borrow_mut().update();

        let mut renderer = self.renderer.borrow_mut();
        renderer.update();
        renderer.render(&self.scene.borrow())
    }
}

/// Top-level orchestrator.
///
/// Owns the clock, the viewport, a consumer scene and its renderer, and drives
/// them from a frame loop. Each tick runs, in order: `clock.update()`,
/// `viewport.update()` (which may call `scene.resize()` then
/// `renderer.resize()`), `scene.update()`, `renderer.update()`,
/// `renderer.render(scene)`.
pub struct Stage<S, E, C, R, T = WallTime> {
    run_loop: Loop<S, StageTick<E, C, R, T>>,
}

impl<S, E, C, R, T> Stage<S, E, C, R, T>
where
    S: FrameScheduler,
    E: Surface,
    C: Lifecycle + 'static,
    R: Renderer<C> + 'static,
    T: TimeSource,
{
    /// Assembles a stage.
    ///
    /// Replaces the viewport's resize callback with one that resizes the scene
    /// and then the renderer.
    pub fn new(scheduler: S, clock: Clock<T>, mut viewport: Viewport<E>, scene: C, renderer: R) -> Self {
        let scene = Rc::new(RefCell::new(scene));
        let renderer = Rc::new(RefCell::new(renderer));

        {
            let scene = Rc::clone(&scene);
            let renderer = Rc::clone(&renderer);
            viewport.set_resize(move || {
                scene.borrow_mut().resize();
                renderer.borrow_mut().resize();
            });
        }

        let tick = StageTick {
            clock,
            viewport,
            scene,
            renderer,
        };

        Self {
            run_loop: Loop::with_tick(scheduler, tick),
        }
    }

    pub fn running(&self) -> bool {
        self.run_loop.running()
    }

    pub fn clock(&self) -> &Clock<T> {
        &self.run_loop.tick().clock
    }

    pub fn viewport(&self) -> &Viewport<E> {
        &self.run_loop.tick().viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport<E> {
        &mut self.run_loop.tick_mut().viewport
    }

    /// Borrows the scene. Panics if called from inside a scene or renderer hook.
    pub fn scene(&self) -> Ref<'_, C> {
        self.run_loop.tick().scene.borrow()
    }

    pub fn renderer(&self) -> Ref<'_, R> {
        self.run_loop.tick().renderer.borrow()
    }

    pub fn scheduler(&self) -> &S {
        self.run_loop.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.run_loop.scheduler_mut()
    }

    /// Starts every component, then the loop.
    ///
    /// The loop's first tick runs immediately; its error is returned. A stage
    /// that is already running is left untouched.
    pub fn try_start(&mut self) -> Result<()> {
        if self.running() {
            return Ok(());
        }

        let tick = self.run_loop.tick_mut();
        tick.clock.start();
        tick.viewport.start();
        tick.scene.borrow_mut().start();
        tick.renderer.borrow_mut().start();

        self.run_loop.try_start()
    }

    /// Host entry point for a due frame.
    pub fn frame(&mut self, request: FrameRequest) -> Result<()> {
        self.run_loop.frame(request)
    }

    /// Host entry point for a size-observation notification.
    pub fn observe(&mut self, entry: ResizeEntry) {
        self.viewport_mut().observe(entry);
    }
}

impl<S, E, C, R, T> Lifecycle for Stage<S, E, C, R, T>
where
    S: FrameScheduler,
    E: Surface,
    C: Lifecycle + 'static,
    R: Renderer<C> + 'static,
    T: TimeSource,
{
    /// Loads the scene, then the renderer.
    async fn load(&mut self) -> Result<()> {
        let tick = self.run_loop.tick();
        tick.scene
            .borrow_mut()
            .load()
            .await
            .context("scene failed to load")?;
        tick.renderer
            .borrow_mut()
            .load()
            .await
            .context("renderer failed to load")?;
        Ok(())
    }

    fn start(&mut self) {
        // Already logged by the loop.
        let _ = self.try_start();
    }

    fn stop(&mut self) {
        self.run_loop.stop();

        let tick = self.run_loop.tick_mut();
        tick.viewport.stop();
        tick.renderer.borrow_mut().stop();
        tick.scene.borrow_mut().stop();
    }

    fn dispose(&mut self) {
        self.run_loop.dispose();

        let tick = self.run_loop.tick_mut();
        tick.viewport.dispose();
        tick.renderer.borrow_mut().dispose();
        tick.scene.borrow_mut().dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::coords::Size;
    use crate::frame::ManualScheduler;
    use crate::time::{ClockSignal, ManualTime};
    use crate::viewport::{ManualSurface, ViewportParams, ViewportSignal};

    type Journal = Rc<RefCell<Vec<String>>>;

    struct TestScene {
        journal: Journal,
        clock: ClockSignal,
        viewport: ViewportSignal,
        loaded: bool,
        aspect: f64,
        rotation: f64,
    }

    impl Lifecycle for TestScene {
        async fn load(&mut self) -> Result<()> {
            self.loaded = true;
            self.journal.borrow_mut().push("scene.load".into());
            Ok(())
        }

        fn start(&mut self) {
            self.journal.borrow_mut().push("scene.start".into());
        }

        fn update(&mut self) {
            self.rotation += self.clock.delta();
            self.journal.borrow_mut().push("scene.update".into());
        }

        fn resize(&mut self) {
            self.aspect = self.viewport.ratio();
            self.journal.borrow_mut().push("scene.resize".into());
        }

        fn dispose(&mut self) {
            self.journal.borrow_mut().push("scene.dispose".into());
        }
    }

    struct TestRenderer {
        journal: Journal,
        fail_after: Option<u32>,
        frames: u32,
    }

    impl Lifecycle for TestRenderer {
        fn update(&mut self) {
            self.journal.borrow_mut().push("renderer.update".into());
        }

        fn resize(&mut self) {
            self.journal.borrow_mut().push("renderer.resize".into());
        }

        fn dispose(&mut self) {
            self.journal.borrow_mut().push("renderer.dispose".into());
        }
    }

    impl Renderer<TestScene> for TestRenderer {
        fn render(&mut self, scene: &TestScene) -> Result<()> {
            self.frames += 1;
            if let Some(limit) = self.fail_after {
                anyhow::ensure!(self.frames <= limit, "device lost");
            }
            self.journal
                .borrow_mut()
                .push(format!("render aspect={}", scene.aspect));
            Ok(())
        }
    }

    type TestStage = Stage<ManualScheduler, ManualSurface, TestScene, TestRenderer, ManualTime>;

    fn stage(container: Option<Size>, fail_after: Option<u32>) -> (TestStage, Journal, ManualTime) {
        let journal: Journal = Rc::default();
        let time = ManualTime::new(1_000.0);
        let clock = Clock::with_source(time.clone());
        let element = match container {
            Some(size) => ManualSurface::attached(size),
            None => ManualSurface::detached(),
        };
        let viewport = Viewport::new(ViewportParams::new(element).maximum_dpr(2.0));

        let scene = TestScene {
            journal: Rc::clone(&journal),
            clock: clock.signal(),
            viewport: viewport.signal(),
            loaded: false,
            aspect: 0.0,
            rotation: 0.0,
        };
        let renderer = TestRenderer {
            journal: Rc::clone(&journal),
            fail_after,
            frames: 0,
        };

        let stage = Stage::new(ManualScheduler::new(), clock, viewport, scene, renderer);
        (stage, journal, time)
    }

    fn refresh(stage: &mut TestStage) -> Result<()> {
        for request in stage.scheduler_mut().take_due() {
            stage.frame(request)?;
        }
        Ok(())
    }

    fn drain(journal: &Journal) -> Vec<String> {
        std::mem::take(&mut *journal.borrow_mut())
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn load_is_awaited_before_start() {
        let (mut stage, journal, _time) = stage(Some(Size::new(400.0, 200.0)), None);
        pollster::block_on(stage.load()).unwrap();
        assert!(stage.scene().loaded);
        assert_eq!(drain(&journal), ["scene.load"]);
    }

    #[test]
    fn start_runs_first_tick_with_initial_resize() {
        let (mut stage, journal, _time) = stage(Some(Size::new(400.0, 200.0)), None);
        stage.start();

        assert!(stage.running());
        assert_eq!(
            drain(&journal),
            [
                "scene.start",
                "scene.resize",
                "renderer.resize",
                "scene.update",
                "renderer.update",
                "render aspect=2",
            ]
        );
    }

    #[test]
    fn double_start_is_a_no_op() {
        let (mut stage, journal, time) = stage(Some(Size::new(400.0, 200.0)), None);
        stage.start();
        time.advance(16.0);
        refresh(&mut stage).unwrap();
        time.advance(16.0);
        refresh(&mut stage).unwrap();
        drain(&journal);

        stage.start();
        assert!(drain(&journal).is_empty());
        assert_eq!(stage.clock().elapsed(), 32.0);
        assert_eq!(stage.scheduler().outstanding().len(), 1);

        time.advance(16.0);
        refresh(&mut stage).unwrap();
        assert_eq!(stage.clock().elapsed(), 48.0);
        assert_eq!(
            drain(&journal),
            ["scene.update", "renderer.update", "render aspect=2"]
        );
    }

    #[test]
    fn restart_after_stop_starts_components_again() {
        let (mut stage, journal, _time) = stage(Some(Size::new(400.0, 200.0)), None);
        stage.start();
        stage.stop();
        drain(&journal);

        stage.start();
        assert!(stage.running());
        assert_eq!(drain(&journal)[0], "scene.start");
    }

    #[test]
    fn detached_viewport_skips_resize() {
        let (mut stage, journal, _time) = stage(None, None);
        stage.start();

        assert!(stage.running());
        assert!(!stage.viewport().is_observing());
        assert_eq!(
            drain(&journal),
            ["scene.start", "scene.update", "renderer.update", "render aspect=0"]
        );
    }

    #[test]
    fn dispose_stops_loop_and_releases_components() {
        let (mut stage, journal, _time) = stage(Some(Size::new(10.0, 10.0)), None);
        stage.start();
        drain(&journal);

        stage.dispose();
        assert!(!stage.running());
        assert!(!stage.viewport().is_observing());
        assert!(stage.scheduler().outstanding().is_empty());
        assert_eq!(drain(&journal), ["renderer.dispose", "scene.dispose"]);
    }

    // ── ticks ─────────────────────────────────────────────────────────────

    #[test]
    fn scene_reads_clock_delta_each_tick() {
        let (mut stage, _journal, time) = stage(Some(Size::new(10.0, 10.0)), None);
        stage.start();

        time.advance(16.0);
        refresh(&mut stage).unwrap();
        time.advance(8.0);
        refresh(&mut stage).unwrap();

        assert_eq!(stage.clock().elapsed(), 24.0);
        assert_eq!(stage.scene().rotation, 24.0);
    }

    #[test]
    fn observed_burst_resizes_once_per_tick() {
        let (mut stage, journal, _time) = stage(Some(Size::new(100.0, 100.0)), None);
        stage.start();
        drain(&journal);

        for width in [200.0, 300.0, 400.0] {
            let entry = stage
                .viewport()
                .element()
                .notify(Size::new(width, 100.0))
                .unwrap();
            stage.observe(entry);
        }
        refresh(&mut stage).unwrap();
        refresh(&mut stage).unwrap();

        let log = drain(&journal);
        let resizes = log.iter().filter(|e| *e == "scene.resize").count();
        assert_eq!(resizes, 1);
        assert_eq!(log[0], "scene.resize");
        assert_eq!(stage.scene().aspect, 4.0);
    }

    #[test]
    fn render_error_halts_stage() {
        let (mut stage, _journal, _time) = stage(Some(Size::new(10.0, 10.0)), Some(2));
        stage.start();
        refresh(&mut stage).unwrap();

        let err = refresh(&mut stage).unwrap_err();
        assert_eq!(err.to_string(), "device lost");
        assert!(!stage.running());
        assert_eq!(stage.renderer().frames, 3);
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let (mut stage, journal, _time) = stage(Some(Size::new(10.0, 10.0)), None);
        stage.start();
        stage.stop();
        drain(&journal);

        refresh(&mut stage).unwrap();
        assert!(drain(&journal).is_empty());
        assert!(!stage.running());
    }
}

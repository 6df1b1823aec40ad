use crate::controllers::interactive::commands::UserAction;
use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::viewer_config::ViewerConfig;
use crate::controllers::interactive::dispatcher::{AwaitOutcome, GenerationSummary};
use crate::controllers::interactive::errors::frame_driver::FrameDriverError;
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::frame_driver::FrameDriver;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::actions::cancellation::CancelToken;
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

struct SharedState {
    last_completed_generation: AtomicU64,
    shutdown: AtomicBool,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

/// Runs the frame loop on its own thread.
///
/// Actions submitted from the UI are batched per frame; each frame is
/// awaited and published to the presenter port before the next one starts.
pub struct InteractiveController {
    shared: Arc<SharedState>,
    actions: Option<Sender<UserAction>>,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(
        config: &ViewerConfig,
        presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
    ) -> Result<Self, FrameDriverError> {
        let driver = FrameDriver::new(config)?;
        let (actions, receiver) = mpsc::channel();

        let shared = Arc::new(SharedState {
            last_completed_generation: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(driver, &receiver, &worker_shared);
        });

        Ok(Self {
            shared,
            actions: Some(actions),
            worker: Some(worker),
        })
    }

    /// Queues `action` for the next frame. Returns `false` once the
    /// controller has stopped.
    ///
    /// `Quit` also raises the shutdown flag so a generation in flight is
    /// cancelled instead of awaited.
    pub fn submit(&self, action: UserAction) -> bool {
        if action == UserAction::Quit {
            self.shared.shutdown.store(true, Ordering::Release);
        }

        self.actions
            .as_ref()
            .is_some_and(|actions| actions.send(action).is_ok())
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.actions.take();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    fn worker_loop(
        mut driver: FrameDriver,
        receiver: &Receiver<UserAction>,
        shared: &Arc<SharedState>,
    ) {
        let quit = || shared.shutdown.load(Ordering::Relaxed);

        while driver.is_running() && !quit() {
            if !driver.has_pending() {
                match receiver.recv() {
                    Ok(action) => driver.handle(action),
                    Err(_) => break,
                }
            }

            for action in receiver.try_iter() {
                driver.handle(action);
            }

            if !driver.is_running() {
                break;
            }

            if let Err(err) = Self::run_frame(&mut driver, shared, &quit) {
                error!("frame {} failed: {}", driver.generation(), err);

                shared
                    .presenter_port
                    .present(RenderEvent::Error(RenderError {
                        generation: driver.generation(),
                        message: err.to_string(),
                    }));
            }
        }

        if let Err(err) = driver.shutdown() {
            error!("failed to stop tile workers cleanly: {}", err);
        }

        info!("frame loop stopped");
    }

    fn run_frame<C: CancelToken>(
        driver: &mut FrameDriver,
        shared: &SharedState,
        quit: &C,
    ) -> Result<(), FrameDriverError> {
        let outcome = driver.run_frame(quit)?;

        if outcome.fullscreen_requested {
            shared.presenter_port.present(RenderEvent::FullscreenRequested);
        }

        // A screenshot already awaited the newest generation.
        if let Some(AwaitOutcome::Completed(summary)) = outcome.awaited {
            if summary.generation == driver.generation() {
                Self::present_frame(driver, shared, summary)?;
            }
        }

        if let Some(snapshot) = outcome.snapshot {
            shared.presenter_port.present(RenderEvent::Screenshot(snapshot));
        }

        match driver.await_generation(quit)? {
            AwaitOutcome::Completed(summary) => Self::present_frame(driver, shared, summary)?,
            AwaitOutcome::Cancelled(summary) => {
                debug!("generation {} cancelled, nothing to present", summary.generation);
            }
            AwaitOutcome::Idle => {}
        }

        Ok(())
    }

    fn present_frame(
        driver: &FrameDriver,
        shared: &SharedState,
        summary: GenerationSummary,
    ) -> Result<(), FrameDriverError> {
        let frame = FrameData {
            generation: summary.generation,
            snapshot: driver.snapshot()?,
            render_duration: summary.duration,
            camera: driver.camera().clone(),
        };

        shared
            .last_completed_generation
            .store(summary.generation, Ordering::Release);
        shared.presenter_port.present(RenderEvent::Frame(frame));

        Ok(())
    }
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl MockPresenterPort {
        fn take_events(&self) -> Vec<RenderEvent> {
            let mut guard = self.events.lock().unwrap();
            std::mem::take(&mut *guard)
        }
    }

    impl InteractiveControllerPresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn wait_for<F>(sink: &MockPresenterPort, timeout: Duration, mut found: F) -> Vec<RenderEvent>
    where
        F: FnMut(&RenderEvent) -> bool,
    {
        let start = Instant::now();
        let mut seen = Vec::new();
        loop {
            let events = sink.take_events();
            let done = events.iter().any(&mut found);
            seen.extend(events);
            if done || start.elapsed() >= timeout {
                return seen;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn test_config() -> ViewerConfig {
        ViewerConfig {
            width: 32,
            height: 32,
            center: Complex::new(-0.5, 0.0),
            scale: 16,
            max_iterations: 16,
            ..ViewerConfig::default()
        }
    }

    fn start() -> (Arc<MockPresenterPort>, InteractiveController) {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let controller = InteractiveController::new(
            &test_config(),
            Arc::clone(&presenter_port) as Arc<dyn InteractiveControllerPresenterPort>,
        )
        .unwrap();
        (presenter_port, controller)
    }

    fn frames(events: &[RenderEvent]) -> Vec<&FrameData> {
        events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Frame(frame) => Some(frame),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn last_completed_generation_starts_at_zero() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = InteractiveController::new(
            &test_config(),
            Arc::clone(&presenter_port) as Arc<dyn InteractiveControllerPresenterPort>,
        )
        .unwrap();

        assert_eq!(controller.last_completed_generation(), 0);

        controller.shutdown();
    }

    #[test]
    fn startup_renders_complete_frame() {
        let (presenter_port, mut controller) = start();

        let events = wait_for(&presenter_port, Duration::from_secs(5), |event| {
            matches!(event, RenderEvent::Frame(_))
        });

        let frames = frames(&events);
        assert!(!frames.is_empty());
        assert_eq!(frames[0].snapshot.unresolved_count(), 0);
        assert_eq!(frames[0].snapshot.width(), 32);
        assert_eq!(frames[0].camera.scale(), 16);
        assert_eq!(controller.last_completed_generation(), frames[0].generation);

        controller.shutdown();
    }

    #[test]
    fn pan_produces_newer_generation() {
        let (presenter_port, mut controller) = start();

        let first = wait_for(&presenter_port, Duration::from_secs(5), |event| {
            matches!(event, RenderEvent::Frame(_))
        });
        let first_generation = frames(&first)[0].generation;

        controller.submit(UserAction::Pan { dx: 1, dy: 0 });
        let second = wait_for(&presenter_port, Duration::from_secs(5), |event| {
            matches!(event, RenderEvent::Frame(_))
        });
        let frame = frames(&second)[0];

        assert!(frame.generation > first_generation);
        assert_eq!(frame.camera.center(), Complex::new(0.5, 0.0));
        assert_eq!(frame.snapshot.unresolved_count(), 0);

        controller.shutdown();
    }

    #[test]
    fn screenshot_and_fullscreen_are_published() {
        let (presenter_port, mut controller) = start();

        controller.submit(UserAction::Screenshot);
        controller.submit(UserAction::ToggleFullscreen);
        let events = wait_for(&presenter_port, Duration::from_secs(5), |event| {
            matches!(event, RenderEvent::Screenshot(_))
        });

        let screenshot = events.iter().find_map(|event| match event {
            RenderEvent::Screenshot(snapshot) => Some(snapshot),
            _ => None,
        });
        assert_eq!(screenshot.map(|s| s.unresolved_count()), Some(0));

        let later = wait_for(&presenter_port, Duration::from_millis(200), |event| {
            matches!(event, RenderEvent::FullscreenRequested)
        });
        assert!(
            events
                .iter()
                .chain(later.iter())
                .any(|event| matches!(event, RenderEvent::FullscreenRequested))
        );

        controller.shutdown();
    }

    #[test]
    fn quit_action_stops_the_loop() {
        let (_presenter_port, mut controller) = start();

        controller.submit(UserAction::Quit);

        let start = Instant::now();
        while controller.is_running() && start.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(10));
        }
        assert!(!controller.is_running());
        assert!(!controller.submit(UserAction::Refresh));

        controller.shutdown();
    }

    #[test]
    fn quit_action_interrupts_a_slow_render() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let config = ViewerConfig {
            width: 256,
            height: 256,
            center: Complex::new(-0.5, 0.0),
            scale: 128,
            max_iterations: 16_384,
            workers: 4,
            ..ViewerConfig::default()
        };
        let mut controller = InteractiveController::new(
            &config,
            Arc::clone(&presenter_port) as Arc<dyn InteractiveControllerPresenterPort>,
        )
        .unwrap();
        thread::sleep(Duration::from_millis(50));

        let quit_at = Instant::now();
        controller.submit(UserAction::Quit);
        while controller.is_running() && quit_at.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(5));
        }

        assert!(!controller.is_running());
        assert!(quit_at.elapsed() < Duration::from_secs(2));

        controller.shutdown();
    }

    #[test]
    fn screenshot_batch_still_presents_the_frame() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let config = ViewerConfig {
            width: 128,
            height: 128,
            center: Complex::new(-0.5, 0.0),
            scale: 64,
            max_iterations: 1024,
            ..ViewerConfig::default()
        };
        let mut controller = InteractiveController::new(
            &config,
            Arc::clone(&presenter_port) as Arc<dyn InteractiveControllerPresenterPort>,
        )
        .unwrap();

        controller.submit(UserAction::Pan { dx: 1, dy: 0 });
        controller.submit(UserAction::Screenshot);
        let events = wait_for(&presenter_port, Duration::from_secs(10), |event| {
            matches!(event, RenderEvent::Frame(frame) if frame.camera.center() == Complex::new(-0.25, 0.0))
        });

        let panned = frames(&events)
            .into_iter()
            .find(|frame| frame.camera.center() == Complex::new(-0.25, 0.0))
            .expect("panned generation was never presented");
        assert_eq!(panned.snapshot.unresolved_count(), 0);
        assert_eq!(controller.last_completed_generation(), panned.generation);
        assert!(events.iter().any(|event| matches!(event, RenderEvent::Screenshot(_))));

        controller.shutdown();
    }

    #[test]
    fn shutdown_is_idempotent() {
        let (_presenter_port, mut controller) = start();

        controller.shutdown();
        controller.shutdown();

        assert!(!controller.submit(UserAction::Refresh));
    }
}

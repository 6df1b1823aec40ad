use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace};

use crate::controllers::interactive::commands::{FrameCommand, PendingActions, UserAction};
use crate::controllers::interactive::data::viewer_config::ViewerConfig;
use crate::controllers::interactive::dispatcher::{AwaitOutcome, GenerationSummary, TileDispatcher};
use crate::controllers::interactive::errors::frame_driver::FrameDriverError;
use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::shift_pixel_buffer::{PixelShift, shift_pixel_buffer};
use crate::core::camera::camera_state::CameraState;
use crate::core::data::complex::Complex;
use crate::core::data::frame_snapshot::FrameSnapshot;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;
use crate::core::fractals::escape_time_algorithm::EscapeTimeAlgorithm;

/// Largest pan rounding error, in pixels, the shift cache tolerates before
/// recomputing the whole frame.
pub const SUBPIXEL_TOLERANCE: f64 = 1e-3;

/// What a single `run_frame` did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// The last await performed during the frame. A snapshot awaits the
    /// generation it captures, so this may already hold the frame's own
    /// completed generation.
    pub awaited: Option<AwaitOutcome>,
    pub dispatched: Option<u64>,
    pub fullscreen_requested: bool,
    pub snapshot: Option<FrameSnapshot>,
}

/// The render context: camera, buffer, dispatcher and pending work.
///
/// Input is fed in through [`FrameDriver::handle`], which only mutates the
/// camera and records commands. [`FrameDriver::run_frame`] then executes the
/// recorded commands in stage order, always awaiting the previous generation
/// before the buffer is touched.
pub struct FrameDriver {
    camera: CameraState,
    buffer: Arc<PixelBuffer>,
    dispatcher: TileDispatcher,
    pending: PendingActions,
    resolved_center: Complex,
    last_summary: Option<GenerationSummary>,
    running: bool,
}

impl FrameDriver {
    pub fn new(config: &ViewerConfig) -> Result<Self, FrameDriverError> {
        let camera = config.camera();
        let buffer = PixelBuffer::new(config.width, config.height)?;
        let mut dispatcher = TileDispatcher::new();
        dispatcher.partition(camera.workers(), config.width, config.height)?;

        let mut pending = PendingActions::new();
        pending.push(FrameCommand::Dispatch);

        info!(
            "viewer ready: {}x{}, {} workers, {}",
            config.width,
            config.height,
            camera.workers(),
            camera.fractal()
        );

        Ok(Self {
            resolved_center: camera.center(),
            camera,
            buffer: Arc::new(buffer),
            dispatcher,
            pending,
            last_summary: None,
            running: true,
        })
    }

    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Read access for presentation. Cells of a generation still in flight
    /// may be [`UNRESOLVED`](crate::core::data::colour::UNRESOLVED).
    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.dispatcher.generation()
    }

    #[must_use]
    pub fn last_generation_duration(&self) -> Option<Duration> {
        self.last_summary.map(|summary| summary.duration)
    }

    /// Generations per second, judged by the last completed generation.
    #[must_use]
    pub fn framerate(&self) -> Option<f64> {
        self.last_generation_duration()
            .map(|duration| 1.0 / duration.as_secs_f64().max(f64::EPSILON))
    }

    pub fn snapshot(&self) -> Result<FrameSnapshot, FrameDriverError> {
        if self.dispatcher.is_in_flight() {
            return Err(FrameDriverError::GenerationInFlight);
        }

        Ok(self.buffer.snapshot())
    }

    /// Applies `action` to the camera and records the frame commands it needs.
    pub fn handle(&mut self, action: UserAction) {
        trace!("user action {:?}", action);

        match action {
            UserAction::Pan { dx, dy } => {
                if self.camera.pan(dx, dy) {
                    self.pending.push(FrameCommand::Shift);
                }
            }
            UserAction::Recenter { x, y } => {
                let (width, height) = (self.buffer.width(), self.buffer.height());
                if self.camera.recenter_on(Point { x, y }, width, height) {
                    self.pending.push(FrameCommand::Shift);
                }
            }
            UserAction::Zoom(signum) => {
                if self.camera.zoom(signum) {
                    self.pending.push(FrameCommand::InvalidateAll);
                }
            }
            UserAction::AdjustIterations(signum) => {
                if self.camera.adjust_iterations(signum) {
                    self.pending.push(FrameCommand::InvalidateAll);
                }
            }
            UserAction::SwitchFractal(signum) => {
                if self.camera.switch_fractal(signum) {
                    self.pending.push(FrameCommand::InvalidateAll);
                }
            }
            UserAction::AdjustWorkers(signum) => {
                if self.camera.adjust_workers(signum) {
                    self.pending.push(FrameCommand::Repartition);
                }
            }
            UserAction::Resize { width, height } => {
                if width == 0 || height == 0 {
                    debug!("ignoring resize to {}x{}", width, height);
                } else {
                    self.pending.push(FrameCommand::Resize { width, height });
                }
            }
            UserAction::ToggleFullscreen => self.pending.push(FrameCommand::ToggleFullscreen),
            UserAction::Screenshot => self.pending.push(FrameCommand::Snapshot),
            UserAction::Refresh => self.pending.push(FrameCommand::InvalidateAll),
            UserAction::Quit => {
                info!("quit requested");
                self.running = false;
            }
        }
    }

    /// Executes every pending command once, in stage order.
    ///
    /// Stops early when `quit` fires so a slow generation never holds up
    /// shutdown.
    pub fn run_frame<C>(&mut self, quit: &C) -> Result<FrameOutcome, FrameDriverError>
    where
        C: CancelToken + ?Sized,
    {
        let mut outcome = FrameOutcome::default();

        for command in self.pending.drain() {
            if quit.is_cancelled() {
                self.running = false;
                break;
            }

            trace!("frame command {:?}", command);

            match command {
                FrameCommand::Await => outcome.awaited = Some(self.await_generation(quit)?),
                FrameCommand::Resize { width, height } => {
                    self.buffer_mut()?.resize(width, height)?;
                    self.resolved_center = self.camera.center();
                    info!("viewport resized to {}x{}", width, height);
                }
                FrameCommand::ToggleFullscreen => outcome.fullscreen_requested = true,
                FrameCommand::Repartition => {
                    let (width, height) = (self.buffer.width(), self.buffer.height());
                    self.dispatcher.partition(self.camera.workers(), width, height)?;
                }
                FrameCommand::InvalidateAll => {
                    self.buffer_mut()?.invalidate_all();
                    self.resolved_center = self.camera.center();
                }
                FrameCommand::Shift => self.apply_shift()?,
                FrameCommand::Dispatch => outcome.dispatched = Some(self.dispatch()?),
                FrameCommand::Snapshot => {
                    if self.dispatcher.is_in_flight() {
                        let awaited = self.await_generation(quit)?;
                        outcome.awaited = Some(awaited);

                        if matches!(awaited, AwaitOutcome::Cancelled(_)) {
                            self.running = false;
                            break;
                        }
                    }
                    outcome.snapshot = Some(self.buffer.snapshot());
                }
            }
        }

        Ok(outcome)
    }

    /// Waits for the generation in flight, if any.
    pub fn await_generation<C>(&mut self, quit: &C) -> Result<AwaitOutcome, FrameDriverError>
    where
        C: CancelToken + ?Sized,
    {
        let outcome = self.dispatcher.await_generation(quit)?;

        if let AwaitOutcome::Completed(summary) = outcome {
            self.last_summary = Some(summary);
        }

        Ok(outcome)
    }

    /// Cancels outstanding work and stops the driver.
    pub fn shutdown(&mut self) -> Result<AwaitOutcome, FrameDriverError> {
        self.running = false;
        Ok(self.dispatcher.release()?)
    }

    fn buffer_mut(&mut self) -> Result<&mut PixelBuffer, FrameDriverError> {
        Arc::get_mut(&mut self.buffer).ok_or(FrameDriverError::GenerationInFlight)
    }

    fn dispatch(&mut self) -> Result<u64, FrameDriverError> {
        let viewport = self.camera.viewport(self.buffer.width(), self.buffer.height());
        let algorithm = Arc::new(EscapeTimeAlgorithm::new(viewport));

        Ok(self.dispatcher.dispatch(&self.buffer, algorithm)?)
    }

    /// Moves cached pixels to follow the camera since the last resolved frame.
    fn apply_shift(&mut self) -> Result<(), FrameDriverError> {
        let scale = self.camera.scale();
        let delta = self.camera.center() - self.resolved_center;
        let shift = PixelShift::from_camera_delta(delta, scale);
        let residual = shift.residual_pixels(delta, scale);

        if residual > SUBPIXEL_TOLERANCE {
            debug!("pan is {:.3} px off the pixel grid, redrawing everything", residual);
            self.buffer_mut()?.invalidate_all();
            self.resolved_center = self.camera.center();
            return Ok(());
        }

        debug!("shifting cached pixels by ({}, {})", shift.dx, shift.dy);
        shift_pixel_buffer(self.buffer_mut()?, shift);
        self.resolved_center = self.resolved_center + shift.camera_delta(scale);

        Ok(())
    }
}

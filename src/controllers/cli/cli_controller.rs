use std::path::Path;
use std::time::Duration;

use log::info;

use crate::controllers::interactive::commands::UserAction;
use crate::controllers::interactive::data::viewer_config::ViewerConfig;
use crate::controllers::interactive::dispatcher::AwaitOutcome;
use crate::controllers::interactive::errors::frame_driver::FrameDriverError;
use crate::controllers::interactive::frame_driver::FrameDriver;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::cancellation::NeverCancel;
use crate::core::camera::camera_state::CameraState;

/// Drives the viewer without a window: apply actions, render, save.
pub struct CliController<P: FilePresenterPort> {
    presenter: P,
    driver: FrameDriver,
}

impl<P: FilePresenterPort> CliController<P> {
    pub fn new(config: &ViewerConfig, presenter: P) -> Result<Self, FrameDriverError> {
        Ok(Self {
            presenter,
            driver: FrameDriver::new(config)?,
        })
    }

    #[must_use]
    pub fn camera(&self) -> &CameraState {
        self.driver.camera()
    }

    pub fn apply(&mut self, action: UserAction) {
        self.driver.handle(action);
    }

    /// Runs frames until nothing is pending and returns the time spent
    /// rendering.
    pub fn render(&mut self) -> Result<Duration, FrameDriverError> {
        let mut total = Duration::ZERO;

        while self.driver.has_pending() {
            self.driver.run_frame(&NeverCancel)?;

            if let AwaitOutcome::Completed(summary) = self.driver.await_generation(&NeverCancel)? {
                info!(
                    "generation {}: {} pixels in {:?}",
                    summary.generation, summary.resolved, summary.duration
                );
                total += summary.duration;
            }
        }

        Ok(total)
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = self.driver.snapshot()?;
        self.presenter.present(&snapshot, filepath)?;

        Ok(())
    }
}

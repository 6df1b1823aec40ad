use std::path::Path;
use std::time::{Duration, Instant};

use crate::core::camera::camera_state::CameraState;

/// How long a transient message such as "Saved as ..." stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

pub const HELP_LINES: [&str; 10] = [
    "<H>          : Toggle this message",
    "<G>          : Toggle debug information",
    "<LCTRL>      : Toggle the interface",
    "<ARROWS/WASD>: Move",
    "<+/-/MWHEEL> : Zoom",
    "<Z/X>        : Toggle fractal type",
    "<I/O>        : Inc-/decrement max iterations",
    "<Q/E>        : Inc-/decrement worker amount",
    "<SPACE>      : Take a screenshot",
    "<F11>        : Toggle fullscreen",
];

pub const HELP_HINT: &str = "<H> to display help information";
pub const DEBUG_HINT: &str = "<G> to display debug information";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    text: String,
    expires_at: Instant,
}

/// What the overlay shows; updated from presenter notices and toggle keys.
///
/// The interface starts visible with help and debug collapsed to one-line
/// hints.
#[derive(Debug, Clone)]
pub struct OverlayState {
    pub show_interface: bool,
    pub show_debug: bool,
    pub show_help: bool,
    pub render_size: (u32, u32),
    pub latest_generation: u64,
    pub render_duration: Option<Duration>,
    pub camera: Option<CameraState>,
    pub error_message: Option<String>,
    notice: Option<Notice>,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            show_interface: true,
            show_debug: false,
            show_help: false,
            render_size: (0, 0),
            latest_generation: 0,
            render_duration: None,
            camera: None,
            error_message: None,
            notice: None,
        }
    }
}

impl OverlayState {
    pub fn toggle_interface(&mut self) {
        self.show_interface = !self.show_interface;
    }

    pub fn toggle_debug(&mut self) {
        self.show_debug = !self.show_debug;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn record_frame(&mut self, generation: u64, render_duration: Duration, camera: CameraState) {
        if generation < self.latest_generation {
            return;
        }

        self.latest_generation = generation;
        self.render_duration = Some(render_duration);
        self.camera = Some(camera);
        self.error_message = None;
    }

    pub fn record_error(&mut self, generation: u64, message: String) {
        if generation >= self.latest_generation {
            self.error_message = Some(message);
        }
    }

    pub fn record_screenshot(&mut self, path: &Path, now: Instant) {
        self.show_notice(format!("Saved as {}", path.display()), now);
    }

    pub fn show_notice(&mut self, text: String, now: Instant) {
        self.notice = Some(Notice {
            text,
            expires_at: now + NOTICE_DURATION,
        });
    }

    #[must_use]
    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| now < notice.expires_at)
            .map(|notice| notice.text.as_str())
    }

    #[must_use]
    pub fn notice_deadline(&self) -> Option<Instant> {
        self.notice.as_ref().map(|notice| notice.expires_at)
    }

    /// Drops an expired notice; returns whether one was dropped.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        if self.notice.as_ref().is_some_and(|notice| now >= notice.expires_at) {
            self.notice = None;
            return true;
        }

        false
    }

    /// Help block: the full keymap, or a hint on how to open it.
    #[must_use]
    pub fn help_lines(&self) -> Vec<&'static str> {
        if self.show_help {
            HELP_LINES.to_vec()
        } else {
            vec![HELP_HINT]
        }
    }

    /// Status block: debug values, or a hint on how to show them.
    #[must_use]
    pub fn status_lines(&self) -> Vec<String> {
        if self.show_debug {
            self.debug_lines()
        } else {
            vec![DEBUG_HINT.to_string()]
        }
    }

    /// Debug values in display order; camera lines appear after the first
    /// frame.
    #[must_use]
    pub fn debug_lines(&self) -> Vec<String> {
        let (width, height) = self.render_size;
        let mut lines = vec![format!("Render size: {width}x{height}")];

        if let Some(camera) = &self.camera {
            lines.push(format!("Fractal: {}", camera.fractal()));
            lines.push(format!("Iterations: {}", camera.max_iterations()));
            lines.push(format!("Workers: {}", camera.workers()));
        }

        if let Some(duration) = self.render_duration {
            lines.push(format!("Render time: {} ms", duration.as_millis()));
        }

        if let Some(camera) = &self.camera {
            let center = camera.center();
            lines.push(format!("Scale: {}:1", camera.scale()));
            lines.push(format!("X: {:.18}", center.real));
            lines.push(format!("Y: {:.18}", center.imag));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::limits::CameraLimits;
    use crate::core::data::complex::Complex;
    use std::path::PathBuf;

    fn camera() -> CameraState {
        CameraState::new(CameraLimits::default(), Complex::new(-0.5, 0.25), 256, 128, 4)
    }

    #[test]
    fn starts_with_interface_and_hints() {
        let overlay = OverlayState::default();

        assert!(overlay.show_interface);
        assert_eq!(overlay.help_lines(), vec![HELP_HINT]);
        assert_eq!(overlay.status_lines(), vec![DEBUG_HINT.to_string()]);
    }

    #[test]
    fn help_toggle_lists_the_keymap() {
        let mut overlay = OverlayState::default();

        overlay.toggle_help();
        let lines = overlay.help_lines();

        assert_eq!(lines.len(), HELP_LINES.len());
        assert!(lines.iter().any(|line| line.starts_with("<G>")));
        assert!(lines.iter().any(|line| line.starts_with("<LCTRL>")));
        assert!(lines.iter().any(|line| line.starts_with("<F11>")));

        overlay.toggle_help();
        assert_eq!(overlay.help_lines(), vec![HELP_HINT]);
    }

    #[test]
    fn debug_toggle_swaps_hint_for_values() {
        let mut overlay = OverlayState {
            render_size: (640, 480),
            ..OverlayState::default()
        };

        overlay.toggle_debug();

        assert_eq!(overlay.status_lines(), vec!["Render size: 640x480".to_string()]);
    }

    #[test]
    fn interface_toggle_is_independent_of_blocks() {
        let mut overlay = OverlayState::default();
        overlay.toggle_debug();

        overlay.toggle_interface();

        assert!(!overlay.show_interface);
        assert!(overlay.show_debug);
        overlay.toggle_interface();
        assert!(overlay.show_interface);
    }

    #[test]
    fn frame_fills_in_camera_lines() {
        let mut overlay = OverlayState::default();

        overlay.record_frame(3, Duration::from_millis(42), camera());
        let lines = overlay.debug_lines();

        assert!(lines.contains(&"Iterations: 128".to_string()));
        assert!(lines.contains(&"Workers: 4".to_string()));
        assert!(lines.contains(&"Render time: 42 ms".to_string()));
        assert!(lines.contains(&"Scale: 256:1".to_string()));
        assert!(lines.contains(&"X: -0.500000000000000000".to_string()));
        assert!(lines.contains(&"Y: 0.250000000000000000".to_string()));
    }

    #[test]
    fn stale_frames_and_errors_are_ignored() {
        let mut overlay = OverlayState::default();
        overlay.record_frame(5, Duration::from_millis(10), camera());

        overlay.record_frame(4, Duration::from_millis(99), CameraState::default());
        overlay.record_error(2, "old failure".to_string());

        assert_eq!(overlay.latest_generation, 5);
        assert_eq!(overlay.render_duration, Some(Duration::from_millis(10)));
        assert_eq!(overlay.error_message, None);
    }

    #[test]
    fn newer_frame_clears_error() {
        let mut overlay = OverlayState::default();
        overlay.record_error(1, "boom".to_string());
        assert_eq!(overlay.error_message.as_deref(), Some("boom"));

        overlay.record_frame(2, Duration::ZERO, camera());

        assert_eq!(overlay.error_message, None);
    }

    #[test]
    fn screenshot_notice_names_the_file_and_expires() {
        let mut overlay = OverlayState::default();
        let now = Instant::now();
        let path = PathBuf::from("screenshots").join("1700000000.ppm");

        overlay.record_screenshot(&path, now);

        let expected = format!("Saved as {}", path.display());
        assert_eq!(overlay.notice(now), Some(expected.as_str()));
        assert_eq!(overlay.notice_deadline(), Some(now + NOTICE_DURATION));
        assert!(!overlay.expire_notice(now));

        let later = now + NOTICE_DURATION;
        assert_eq!(overlay.notice(later), None);
        assert!(overlay.expire_notice(later));
        assert_eq!(overlay.notice_deadline(), None);
    }
}

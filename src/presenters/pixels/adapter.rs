use std::sync::{Mutex, PoisonError};
use winit::event_loop::EventLoopProxy;

use crate::controllers::interactive::{events::render::RenderEvent, ports::presenter::InteractiveControllerPresenterPort};
use crate::input::gui::events::GuiEvent;

/// Hands controller events to the UI thread and wakes its event loop.
///
/// Only the newest frame is kept; every other event is queued so screenshots
/// and errors are never lost.
pub struct PixelsAdapter {
    events: Mutex<Vec<RenderEvent>>,
    // Not every backend's proxy is `Sync`.
    event_loop_proxy: Mutex<EventLoopProxy<GuiEvent>>,
}

impl InteractiveControllerPresenterPort for PixelsAdapter {
    fn present(&self, event: RenderEvent) {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        queue_event(&mut events, event);
        drop(events);

        let proxy = self.event_loop_proxy.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = proxy.send_event(GuiEvent::Wake);
    }
}

impl PixelsAdapter {
    pub fn new(event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            event_loop_proxy: Mutex::new(event_loop_proxy),
        }
    }

    pub fn take_events(&self) -> Vec<RenderEvent> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *events)
    }
}

fn queue_event(events: &mut Vec<RenderEvent>, event: RenderEvent) {
    if matches!(event, RenderEvent::Frame(_)) {
        events.retain(|queued| !matches!(queued, RenderEvent::Frame(_)));
    }

    events.push(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::data::frame_data::FrameData;
    use crate::controllers::interactive::errors::render::RenderError;
    use crate::core::camera::camera_state::CameraState;
    use crate::core::data::frame_snapshot::FrameSnapshot;
    use std::time::Duration;

    fn frame(generation: u64) -> RenderEvent {
        RenderEvent::Frame(FrameData {
            generation,
            snapshot: FrameSnapshot::new(1, 1, vec![0xFF00_0000]),
            render_duration: Duration::ZERO,
            camera: CameraState::default(),
        })
    }

    #[test]
    fn newer_frame_replaces_queued_frame() {
        let mut events = Vec::new();

        queue_event(&mut events, frame(1));
        queue_event(&mut events, RenderEvent::FullscreenRequested);
        queue_event(&mut events, frame(2));

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], RenderEvent::FullscreenRequested));
        assert!(matches!(&events[1], RenderEvent::Frame(data) if data.generation == 2));
    }

    #[test]
    fn errors_and_screenshots_accumulate() {
        let mut events = Vec::new();

        queue_event(&mut events, RenderEvent::Screenshot(FrameSnapshot::new(1, 1, vec![0])));
        queue_event(
            &mut events,
            RenderEvent::Error(RenderError {
                generation: 1,
                message: "lost".to_string(),
            }),
        );

        assert_eq!(events.len(), 2);
    }
}

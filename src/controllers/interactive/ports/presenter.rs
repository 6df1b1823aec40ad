use crate::controllers::interactive::events::render::RenderEvent;

/// Receives everything the frame loop produces. Called from the frame thread.
pub trait InteractiveControllerPresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}

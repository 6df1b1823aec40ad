/// Custom user events for the GUI event loop.
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// The presenter has something new; the handler decides whether to redraw.
    Wake,
}

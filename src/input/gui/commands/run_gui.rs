use std::error::Error;
use std::marker::PhantomData;

use log::info;
use winit::{
    dpi::LogicalSize,
    event_loop::EventLoopBuilder,
    window::{Window, WindowBuilder},
};

use crate::controllers::interactive::InteractiveController;
use crate::controllers::interactive::data::viewer_config::ViewerConfig;
use crate::input::gui::app::gui_app::GuiApp;
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::commands::ports::presenter_factory::GuiPresenterFactoryPort;
use crate::input::gui::events::GuiEvent;

const WINDOW_TITLE: &str = "Mandelfract";
const MIN_WINDOW_SIDE: f64 = 64.0;

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    config: ViewerConfig,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F, config: ViewerConfig) -> Self {
        Self {
            presenter_factory,
            config,
            _phantom: PhantomData,
        }
    }

    /// Opens the window and blocks until it closes.
    pub fn execute(&self) -> Result<(), Box<dyn Error>> {
        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event().build()?;
        let event_loop_proxy = event_loop.create_proxy();

        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title(WINDOW_TITLE)
                .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
                .with_min_inner_size(LogicalSize::new(MIN_WINDOW_SIDE, MIN_WINDOW_SIDE))
                .build(&event_loop)?,
        ));

        // The surface size is physical; HiDPI displays differ from the request.
        let size = window.inner_size();
        let config = ViewerConfig {
            width: size.width,
            height: size.height,
            ..self.config.clone()
        };
        info!("opened {}x{} window", size.width, size.height);

        let presenter: P = self.presenter_factory.build(window, event_loop_proxy)?;
        let controller = InteractiveController::new(&config, presenter.share_adapter())?;
        let app = GuiApp::new(window, &event_loop, presenter, controller, config.screenshot_dir);

        app.run(event_loop)?;

        Ok(())
    }
}

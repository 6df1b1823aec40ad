use std::path::PathBuf;
use std::time::{Instant, SystemTime};

use egui::Context;
use egui_winit::State as EguiWinitState;
use log::{debug, error, info, warn};
use winit::{
    dpi::PhysicalPosition,
    error::EventLoopError,
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Fullscreen, Window},
};

use crate::controllers::interactive::InteractiveController;
use crate::controllers::interactive::commands::UserAction;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::frame_snapshot::FrameSnapshot;
use crate::input::gui::app::crosshair::{crosshair_offsets, in_inline, in_outline};
use crate::input::gui::app::ports::presenter::{GuiPresenterPort, PresenterNotice};
use crate::input::gui::app::state::OverlayState;
use crate::input::gui::events::GuiEvent;
use crate::input::gui::keymap::{KeyBinding, binding_for_key, zoom_for_scroll};
use crate::presenters::file::ppm::PpmFilePresenter;
use crate::storage::screenshot_path::screenshot_path;

pub struct GuiApp<T: GuiPresenterPort> {
    window: &'static Window,
    presenter: T,
    controller: InteractiveController,
    overlay: OverlayState,
    screenshot_dir: PathBuf,
    file_presenter: PpmFilePresenter,
    cursor: Option<PhysicalPosition<f64>>,
    egui_ctx: Context,
    egui_state: EguiWinitState,
}

impl<T: GuiPresenterPort> GuiApp<T> {
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<GuiEvent>,
        presenter: T,
        controller: InteractiveController,
        screenshot_dir: PathBuf,
    ) -> Self {
        let size = window.inner_size();
        let egui_ctx = Context::default();

        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None,
        );

        Self {
            window,
            presenter,
            controller,
            overlay: OverlayState {
                render_size: (size.width, size.height),
                ..OverlayState::default()
            },
            screenshot_dir,
            file_presenter: PpmFilePresenter::new(),
            cursor: None,
            egui_ctx,
            egui_state,
        }
    }

    /// Runs until the window closes or the frame loop stops.
    pub fn run(mut self, event_loop: EventLoop<GuiEvent>) -> Result<(), EventLoopError> {
        let window = self.window;
        let mut redraw_pending = true;

        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { ref event, window_id } if window_id == window.id() => {
                let (consumed, repaint) = self.handle_window_event(event);
                redraw_pending |= repaint;

                match event {
                    WindowEvent::CloseRequested => {
                        self.quit();
                        elwt.exit();
                    }
                    WindowEvent::RedrawRequested => {
                        redraw_pending = false;

                        let egui_output = self.update_ui();
                        if egui_output
                            .viewport_output
                            .values()
                            .any(|viewport| viewport.repaint_delay.is_zero())
                        {
                            redraw_pending = true;
                        }

                        if let Err(err) = self.presenter.render(egui_output, &self.egui_ctx) {
                            error!("render failed: {err}");
                            self.quit();
                            elwt.exit();
                        }
                    }
                    WindowEvent::Resized(size) => {
                        self.resize(size.width, size.height);
                        redraw_pending = true;
                    }
                    WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                        self.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                        let size = window.inner_size();
                        self.resize(size.width, size.height);
                        redraw_pending = true;
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        self.cursor = Some(*position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        self.cursor = None;
                    }
                    WindowEvent::KeyboardInput { event, .. } if !consumed => {
                        redraw_pending |= self.on_key(event);
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } if !consumed => {
                        self.on_click();
                    }
                    WindowEvent::MouseWheel { delta, .. } if !consumed => {
                        if let Some(action) = zoom_for_scroll(*delta) {
                            self.submit(action);
                        }
                    }
                    _ => {}
                }
            }
            Event::UserEvent(GuiEvent::Wake) => {
                redraw_pending |= self.sync_presenter();

                if !self.controller.is_running() {
                    info!("frame loop ended, closing window");
                    elwt.exit();
                }
            }
            Event::AboutToWait => {
                redraw_pending |= self.overlay.expire_notice(Instant::now());

                match self.overlay.notice_deadline() {
                    Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                    None => elwt.set_control_flow(ControlFlow::Wait),
                }

                if redraw_pending {
                    window.request_redraw();
                }
            }
            _ => {}
        })
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> (bool, bool) {
        let response = self.egui_state.on_window_event(self.window, event);
        (response.consumed, response.repaint)
    }

    fn update_ui(&mut self) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(self.window);
        let overlay = &self.overlay;
        let now = Instant::now();

        let mut output = self.egui_ctx.run(raw_input, |ctx| {
            if !overlay.show_interface {
                return;
            }

            text_block(ctx, "help", egui::Align2::LEFT_TOP, [10.0, 10.0], |ui| {
                for line in overlay.help_lines() {
                    ui.label(overlay_text(line));
                }
            });

            text_block(ctx, "status", egui::Align2::LEFT_BOTTOM, [10.0, -10.0], |ui| {
                for line in overlay.status_lines() {
                    ui.label(overlay_text(line));
                }
                if let Some(message) = &overlay.error_message {
                    ui.label(overlay_text(message).color(egui::Color32::LIGHT_RED));
                }
            });

            if let Some(notice) = overlay.notice(now) {
                text_block(ctx, "notice", egui::Align2::CENTER_CENTER, [0.0, 24.0], |ui| {
                    ui.label(overlay_text(notice));
                });
            }

            paint_crosshair(ctx, overlay.render_size);
        });

        let platform_output = std::mem::take(&mut output.platform_output);
        self.egui_state.handle_platform_output(self.window, platform_output);

        output
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.overlay.render_size = (width, height);

        if width == 0 || height == 0 {
            return;
        }

        if let Err(err) = self.presenter.resize(width, height) {
            error!("failed to resize surface to {width}x{height}: {err}");
            return;
        }

        self.submit(UserAction::Resize { width, height });
    }

    /// Returns whether the overlay changed.
    fn on_key(&mut self, event: &KeyEvent) -> bool {
        if event.state != ElementState::Pressed {
            return false;
        }

        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };

        match binding_for_key(code) {
            Some(KeyBinding::ToggleHelp) if !event.repeat => {
                self.overlay.toggle_help();
                true
            }
            Some(KeyBinding::ToggleDebug) if !event.repeat => {
                self.overlay.toggle_debug();
                true
            }
            Some(KeyBinding::ToggleInterface) if !event.repeat => {
                self.overlay.toggle_interface();
                true
            }
            Some(KeyBinding::Viewer(action)) if !event.repeat || is_repeatable(action) => {
                self.submit(action);
                false
            }
            _ => false,
        }
    }

    fn on_click(&mut self) {
        let Some(position) = self.cursor else {
            return;
        };

        self.submit(UserAction::Recenter {
            x: position.x as i32,
            y: position.y as i32,
        });
    }

    fn submit(&self, action: UserAction) {
        debug!("input: {action:?}");

        if !self.controller.submit(action) {
            warn!("frame loop is gone, dropping {action:?}");
        }
    }

    /// Applies presenter notices; returns whether a redraw is needed.
    fn sync_presenter(&mut self) -> bool {
        let notices = self.presenter.sync();
        let redraw = !notices.is_empty();

        for notice in notices {
            match notice {
                PresenterNotice::Presented {
                    generation,
                    render_duration,
                    camera,
                } => self.overlay.record_frame(generation, render_duration, camera),
                PresenterNotice::Screenshot(snapshot) => self.save_screenshot(&snapshot),
                PresenterNotice::FullscreenRequested => self.toggle_fullscreen(),
                PresenterNotice::Error(err) => {
                    self.overlay.record_error(err.generation, err.message);
                }
            }
        }

        redraw
    }

    fn save_screenshot(&mut self, snapshot: &FrameSnapshot) {
        let path = screenshot_path(&self.screenshot_dir, SystemTime::now());

        match self.file_presenter.present(snapshot, &path) {
            Ok(()) => self.overlay.record_screenshot(&path, Instant::now()),
            Err(err) => {
                error!("failed to save screenshot {}: {err}", path.display());
                self.overlay.error_message = Some(format!("Screenshot failed: {err}"));
            }
        }
    }

    fn toggle_fullscreen(&self) {
        let fullscreen = match self.window.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };

        info!("fullscreen {}", if fullscreen.is_some() { "on" } else { "off" });
        self.window.set_fullscreen(fullscreen);
    }

    fn quit(&mut self) {
        self.controller.submit(UserAction::Quit);
        self.controller.shutdown();
    }
}

fn overlay_text(text: impl Into<String>) -> egui::RichText {
    egui::RichText::new(text).monospace().color(egui::Color32::WHITE)
}

/// Opaque-backed text anchored to a screen corner or the centre.
fn text_block(
    ctx: &egui::Context,
    id: &str,
    anchor: egui::Align2,
    offset: [f32; 2],
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    egui::Area::new(egui::Id::new(id))
        .anchor(anchor, offset)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(egui::Color32::BLACK)
                .inner_margin(4.0)
                .show(ui, add_contents);
        });
}

/// Marks the screen centre, the point zoom keys close in on.
fn paint_crosshair(ctx: &egui::Context, render_size: (u32, u32)) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("crosshair"),
    ));
    let pixel = 1.0 / ctx.pixels_per_point();
    let centre_x = (render_size.0 / 2) as i32;
    let centre_y = (render_size.1 / 2) as i32;

    for (shape, colour) in [
        (in_outline as fn(i32, i32) -> bool, egui::Color32::WHITE),
        (in_inline, egui::Color32::BLACK),
    ] {
        for (x, y) in crosshair_offsets(shape) {
            let min = egui::pos2((centre_x + x) as f32 * pixel, (centre_y + y) as f32 * pixel);
            painter.rect_filled(
                egui::Rect::from_min_size(min, egui::vec2(pixel, pixel)),
                0.0,
                colour,
            );
        }
    }
}

/// Held keys keep panning and zooming; everything else fires once per press.
fn is_repeatable(action: UserAction) -> bool {
    matches!(action, UserAction::Pan { .. } | UserAction::Zoom(_))
}

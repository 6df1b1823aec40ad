use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::data::colour::Colour;
use crate::core::data::frame_snapshot::FrameSnapshot;
use crate::input::gui::app::ports::presenter::{GuiPresenterPort, PresenterNotice};
use crate::input::gui::events::GuiEvent;
use crate::presenters::pixels::adapter::PixelsAdapter;
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use log::debug;
use pixels::Pixels;
use pixels::SurfaceTexture;
use pixels::wgpu;
use std::sync::Arc;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

/// Unresolved cells (only visible mid-resize) are drawn in this colour.
const BACKGROUND: Colour = Colour::BLACK;

pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    adapter: Arc<PixelsAdapter>,
    width: u32,
    height: u32,
    last_presented_generation: u64,
}

impl PixelsPresenter {
    pub fn new(
        window: &'static Window,
        event_loop_proxy: EventLoopProxy<GuiEvent>,
    ) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None,
            1,
        );

        Ok(Self {
            pixels,
            egui_renderer,
            adapter: Arc::new(PixelsAdapter::new(event_loop_proxy)),
            width: size.width,
            height: size.height,
            last_presented_generation: 0,
        })
    }

    /// Copies `snapshot` into the framebuffer; frames sized for an older
    /// window are skipped.
    fn blit(&mut self, snapshot: &FrameSnapshot) -> bool {
        if snapshot.width() != self.width || snapshot.height() != self.height {
            debug!(
                "skipping {}x{} frame for {}x{} surface",
                snapshot.width(),
                snapshot.height(),
                self.width,
                self.height
            );
            return false;
        }

        snapshot.write_rgba(self.pixels.frame_mut(), BACKGROUND);
        true
    }

    fn clear(&mut self) {
        for pixel in self.pixels.frame_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&[BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, 255]);
        }
    }
}

impl GuiPresenterPort for PixelsPresenter {
    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort> {
        Arc::clone(&self.adapter) as Arc<dyn InteractiveControllerPresenterPort>
    }

    fn sync(&mut self) -> Vec<PresenterNotice> {
        let mut notices = Vec::new();

        for event in self.adapter.take_events() {
            match event {
                RenderEvent::Frame(frame) => {
                    if frame.generation > self.last_presented_generation && self.blit(&frame.snapshot) {
                        self.last_presented_generation = frame.generation;
                        notices.push(PresenterNotice::Presented {
                            generation: frame.generation,
                            render_duration: frame.render_duration,
                            camera: frame.camera,
                        });
                    }
                }
                RenderEvent::Screenshot(snapshot) => notices.push(PresenterNotice::Screenshot(snapshot)),
                RenderEvent::FullscreenRequested => notices.push(PresenterNotice::FullscreenRequested),
                RenderEvent::Error(error) => notices.push(PresenterNotice::Error(error)),
            }
        }

        notices
    }

    fn render(&mut self, egui_output: egui::FullOutput, egui_ctx: &EguiContext) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let width = self.width;
        let height = self.height;
        let egui_renderer = &mut self.egui_renderer;

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);

            let clipped_primitives =
                egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [width, height],
                pixels_per_point: egui_ctx.pixels_per_point(),
            };

            let textures_delta = egui_output.textures_delta;

            for (id, delta) in &textures_delta.set {
                egui_renderer.update_texture(&context.device, &context.queue, *id, delta);
            }

            egui_renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                egui_renderer.render(&mut render_pass, &clipped_primitives, &screen_descriptor);
            }

            for id in &textures_delta.free {
                egui_renderer.free_texture(id);
            }

            Ok(())
        })
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        self.pixels.resize_surface(width, height)?;
        self.pixels.resize_buffer(width, height)?;

        self.width = width;
        self.height = height;
        self.clear();

        Ok(())
    }
}

mod camera;
mod colour;
mod composite;
mod controller;
mod error;
mod escape;
mod input;
mod pixel;
mod renderer;
mod screen;
mod settings;
mod uniform;

use std::time::{Duration, Instant};

use log::{error, info, warn};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use crate::{
    camera::{Camera, Vec2},
    controller::PanController,
    error::Error,
    input::Input,
    renderer::Renderer,
};

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(settings::WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(
            settings::WINDOW_SIZE.width,
            settings::WINDOW_SIZE.height,
        ))
        .with_resizable(true)
        .build(&event_loop)?;

    let window_size = logical_size(&window);
    let centre = Vec2::new(
        (window_size.width / 2) as f32,
        (window_size.height / 2) as f32,
    );
    let mut controller = PanController::new(Camera::centred(centre), Vec2::ZERO);
    let mut input = Input::with_scale_factor(window.scale_factor());

    info!(
        "rendering {}x{} fractal",
        settings::DRAW_AREA.width,
        settings::DRAW_AREA.height
    );
    let pixels = composite::render(settings::DRAW_AREA);
    let mut renderer = Renderer::new(&window, &pixels, settings::DRAW_AREA)?;
    drop(pixels);

    let frame_interval = Duration::from_secs(1) / settings::TARGET_FPS;
    let mut next_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => {
                control_flow.set_exit();
            }
            WindowEvent::Resized(size) => {
                renderer.resize(size.into());
                window.request_redraw();
            }
            event @ WindowEvent::ScaleFactorChanged { .. } => {
                if let WindowEvent::ScaleFactorChanged { new_inner_size, .. } = &event {
                    renderer.resize((**new_inner_size).into());
                }
                input.handle_event(&event);
                window.request_redraw();
            }
            event => {
                input.handle_event(&event);
            }
        },
        Event::MainEventsCleared => {
            let now = Instant::now();
            if now >= next_frame {
                controller = controller.update(&input);
                window.request_redraw();
                next_frame = now + frame_interval;
            }
            control_flow.set_wait_until(next_frame);
        }
        Event::RedrawRequested(window_id) if window_id == window.id() => {
            let window_size = logical_size(&window);
            match renderer.render(&controller.camera, window_size) {
                Ok(()) => {}
                Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                    warn!("{}, reconfiguring surface", err);
                    renderer.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("out of memory, exiting");
                    control_flow.set_exit();
                }
                Err(err) => warn!("skipping frame: {}", err),
            }
        }
        Event::LoopDestroyed => {
            info!("shutting down");
        }
        _ => {}
    });
}

/// Window size in the units the camera and cursor use.
fn logical_size(window: &Window) -> screen::Size {
    window
        .inner_size()
        .to_logical::<u32>(window.scale_factor())
        .into()
}

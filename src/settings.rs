use crate::screen;

pub const WINDOW_TITLE: &str = "Mandelbrot and Julia set visualizer";

pub const WINDOW_SIZE: screen::Size = screen::Size::new(800, 800);

/// Resolution of the fractal texture, which is rendered once at start-up.
pub const DRAW_AREA: screen::Size = screen::Size::new(1000, 1000);

pub const TARGET_FPS: u32 = 60;

pub const MSAA_SAMPLES: u32 = 4;

//! Escape-time iteration of the two quadratic recurrences.

use num_complex::Complex64;

use crate::screen;

/// Iteration cap shared by both recurrences.
pub const MAX_ITERATIONS: u32 = 30;

/// The Julia parameter `k` (a "Cantor dust" set).
pub const JULIA_CONSTANT: Complex64 = Complex64::new(-0.6, 0.6);

/// Squared escape radius; comparing `|z|²` avoids a square root.
const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recurrence {
    /// `z ← z² + c`, with `c` taken from the pixel.
    Mandelbrot,
    /// `z ← z² + k`, with `k` fixed to [`JULIA_CONSTANT`].
    Julia,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Iterations {
    pub count: u32,
    pub max: u32,
}

impl Iterations {
    pub fn escaped(&self) -> bool {
        self.count < self.max
    }
}

/**
Map a pixel onto the complex plane.

The pixel's `y` feeds the real axis and its `x` the imaginary axis, so the
set is drawn lying on its side. Both recurrences sample through this mapping
so their images line up pixel for pixel.
*/
pub fn plane_point(x: u32, y: u32, size: screen::Size) -> Complex64 {
    let width = size.width as f64;
    let height = size.height as f64;
    Complex64::new(y as f64, x as f64) * (2.4 / height)
        - Complex64::new(1.2 * width / height + 0.5, 1.2)
}

pub fn evaluate(
    x: u32,
    y: u32,
    size: screen::Size,
    max_iterations: u32,
    recurrence: Recurrence,
) -> Iterations {
    let c = plane_point(x, y, size);
    let addend = match recurrence {
        Recurrence::Mandelbrot => c,
        Recurrence::Julia => JULIA_CONSTANT,
    };

    let mut z = c;
    let mut count = 0;
    while count < max_iterations && z.norm_sqr() <= ESCAPE_RADIUS_SQUARED {
        z = z * z + addend;
        count += 1;
    }

    Iterations {
        count,
        max: max_iterations,
    }
}

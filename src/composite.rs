//! Merging the Mandelbrot and Julia fields into one bitmap.

use std::time::Instant;

use log::{debug, trace};
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::{
    colour::colour_of,
    escape::{evaluate, Recurrence, MAX_ITERATIONS},
    pixel::Colour,
    screen,
};

const BYTES_PER_PIXEL: usize = 4;

/// The Mandelbrot colour for a pixel, or the Julia colour wherever the
/// Mandelbrot colour is the background.
pub fn pixel_colour(x: u32, y: u32, size: screen::Size) -> Colour {
    let mandelbrot = colour_of(
        evaluate(x, y, size, MAX_ITERATIONS, Recurrence::Mandelbrot),
        Recurrence::Mandelbrot,
    );
    if mandelbrot != Colour::BACKGROUND {
        return mandelbrot;
    }

    colour_of(
        evaluate(x, y, size, MAX_ITERATIONS, Recurrence::Julia),
        Recurrence::Julia,
    )
}

/// Row-major RGBA8 bytes of the composite image, `size.width * size.height * 4` long.
pub fn render(size: screen::Size) -> Vec<u8> {
    trace!("begin render");
    let start = Instant::now();

    let mut bytes = vec![0; size.pixel_count() * BYTES_PER_PIXEL];
    if size.width > 0 {
        let row_length = size.width as usize * BYTES_PER_PIXEL;
        bytes
            .par_chunks_mut(row_length)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                    pixel.copy_from_slice(&pixel_colour(x as u32, y as u32, size).to_bytes());
                }
            });
    }

    debug!(
        "rendered {}x{} in {:?}",
        size.width,
        size.height,
        start.elapsed()
    );
    bytes
}

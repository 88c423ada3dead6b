//! Colouring algorithms.

use crate::{
    escape::{Iterations, Recurrence},
    pixel::Colour,
};

/**
Two-tone gradient colouring.

Points that escape within the first half of the iteration budget get a dark
ramp in the recurrence's base channel (red for Mandelbrot, blue for Julia).
Slower points get a bright ramp that fades the other channels in towards
white. Points that never escape get [`Colour::BACKGROUND`].

Channel arithmetic is 8-bit and wraps: the bright ramp is computed as
`(intensity as u8) - 255` with wrapping subtraction.
*/
pub fn colour_of(iterations: Iterations, recurrence: Recurrence) -> Colour {
    if !iterations.escaped() {
        return Colour::BACKGROUND;
    }

    let intensity = (512 * iterations.count / iterations.max) as u8;
    if iterations.count < iterations.max / 2 {
        match recurrence {
            Recurrence::Mandelbrot => Colour::opaque(intensity, 0, 0),
            Recurrence::Julia => Colour::opaque(0, 0, intensity),
        }
    } else {
        let fade = intensity.wrapping_sub(255);
        match recurrence {
            Recurrence::Mandelbrot => Colour::opaque(255, fade, fade),
            Recurrence::Julia => Colour::opaque(fade, fade, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::MAX_ITERATIONS;

    fn iterations(count: u32) -> Iterations {
        Iterations {
            count,
            max: MAX_ITERATIONS,
        }
    }

    #[test]
    fn not_escaped_is_background() {
        for recurrence in [Recurrence::Mandelbrot, Recurrence::Julia] {
            assert_eq!(
                colour_of(iterations(MAX_ITERATIONS), recurrence),
                Colour::BACKGROUND
            );
        }
    }

    #[test]
    fn dark_tone() {
        assert_eq!(
            colour_of(iterations(10), Recurrence::Mandelbrot),
            Colour::opaque(170, 0, 0)
        );
        assert_eq!(
            colour_of(iterations(10), Recurrence::Julia),
            Colour::opaque(0, 0, 170)
        );
    }

    #[test]
    fn last_dark_count() {
        // 512 * 14 / 30 = 238
        assert_eq!(
            colour_of(iterations(14), Recurrence::Mandelbrot),
            Colour::opaque(238, 0, 0)
        );
    }

    #[test]
    fn midpoint_is_bright() {
        // 512 * 15 / 30 = 256 truncates to 0, and 0 - 255 wraps to 1.
        assert_eq!(
            colour_of(iterations(15), Recurrence::Mandelbrot),
            Colour::opaque(255, 1, 1)
        );
        assert_eq!(
            colour_of(iterations(15), Recurrence::Julia),
            Colour::opaque(1, 1, 255)
        );
    }

    #[test]
    fn bright_tone() {
        // 512 * 20 / 30 = 341 -> 85 as u8 -> 86 after wrapping.
        assert_eq!(
            colour_of(iterations(20), Recurrence::Mandelbrot),
            Colour::opaque(255, 86, 86)
        );
        // 512 * 29 / 30 = 494 -> 238 as u8 -> 239 after wrapping.
        assert_eq!(
            colour_of(iterations(29), Recurrence::Julia),
            Colour::opaque(239, 239, 255)
        );
    }

    #[test]
    fn immediate_escape_looks_like_background() {
        assert_eq!(
            colour_of(iterations(0), Recurrence::Mandelbrot),
            Colour::BACKGROUND
        );
    }

    #[test]
    fn always_opaque() {
        for count in 0..=MAX_ITERATIONS {
            for recurrence in [Recurrence::Mandelbrot, Recurrence::Julia] {
                assert_eq!(colour_of(iterations(count), recurrence).a, 255);
            }
        }
    }
}

use bytemuck::{Pod, Zeroable};

/// An 8-bit-per-channel RGBA colour, laid out exactly as it is stored in an
/// `Rgba8` texture.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Opaque black. Doubles as the "no signal" marker for points that never
    /// escaped.
    pub const BACKGROUND: Self = Colour::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

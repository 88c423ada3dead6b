use std::ops::{Add, Div, Mul, Sub};

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn rotate(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;

    fn div(self, scale: f32) -> Self {
        Self::new(self.x / scale, self.y / scale)
    }
}

impl From<winit::dpi::LogicalPosition<f64>> for Vec2 {
    fn from(position: winit::dpi::LogicalPosition<f64>) -> Self {
        Self::new(position.x as f32, position.y as f32)
    }
}

/**
A 2D camera.

`target` is the world point drawn at the screen point `offset`. World space
is rotated by `rotation` (radians) and scaled by `zoom` about the target.
*/
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub target: Vec2,
    pub offset: Vec2,
    pub rotation: f32,
    pub zoom: f32,
}

impl Camera {
    /// A camera that maps world coordinates onto identical screen coordinates,
    /// anchored at `centre`.
    pub fn centred(centre: Vec2) -> Self {
        Self {
            target: centre,
            offset: centre,
            rotation: 0.0,
            zoom: 1.0,
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target).rotate(self.rotation) * self.zoom + self.offset
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        ((screen - self.offset) / self.zoom).rotate(-self.rotation) + self.target
    }
}

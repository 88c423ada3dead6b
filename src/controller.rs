use log::trace;

use crate::{
    camera::{Camera, Vec2},
    input::{Direction, Input},
};

/// World units the target moves per frame while a direction key is held.
pub const PAN_STEP: f32 = 8.0;

/// Camera plus the cursor position seen on the previous frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanController {
    pub camera: Camera,
    pub previous_mouse_position: Vec2,
}

impl PanController {
    pub fn new(camera: Camera, mouse_position: Vec2) -> Self {
        Self {
            camera,
            previous_mouse_position: mouse_position,
        }
    }

    /**
    Advance one frame.

    At most one direction key applies per frame. A held primary button then
    drags the view: the cursor's movement since the last frame is pushed
    through the current camera, and the result replaces any keyboard step.
    */
    pub fn update(self, input: &Input) -> Self {
        let mut target = self.camera.target;
        match input.direction() {
            Some(Direction::Right) => target.x += PAN_STEP,
            Some(Direction::Left) => target.x -= PAN_STEP,
            Some(Direction::Up) => target.y -= PAN_STEP,
            Some(Direction::Down) => target.y += PAN_STEP,
            None => {}
        }

        let mouse_position = input.cursor();
        let delta = self.previous_mouse_position - mouse_position;
        if input.primary_button() {
            target = self.camera.screen_to_world(self.camera.offset + delta);
        }

        if target != self.camera.target {
            trace!("camera target {:?}", target);
        }

        Self {
            camera: Camera {
                target,
                ..self.camera
            },
            previous_mouse_position: mouse_position,
        }
    }
}

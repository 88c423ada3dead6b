use fnv::FnvHashSet;
use winit::event::{ElementState, MouseButton, VirtualKeyCode, WindowEvent};

use crate::camera::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Checked in this order; the first held direction wins.
    pub const PRECEDENCE: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    fn keys(self) -> [VirtualKeyCode; 2] {
        match self {
            Direction::Right => [VirtualKeyCode::Right, VirtualKeyCode::D],
            Direction::Left => [VirtualKeyCode::Left, VirtualKeyCode::A],
            Direction::Up => [VirtualKeyCode::Up, VirtualKeyCode::W],
            Direction::Down => [VirtualKeyCode::Down, VirtualKeyCode::S],
        }
    }
}

/// Keyboard and mouse state accumulated from window events. The cursor is
/// kept in logical (scale-independent) units.
#[derive(Debug)]
pub struct Input {
    held_keys: FnvHashSet<VirtualKeyCode>,
    cursor: Vec2,
    primary_button: bool,
    scale_factor: f64,
}

impl Input {
    pub fn new() -> Self {
        Self::with_scale_factor(1.0)
    }

    pub fn with_scale_factor(scale_factor: f64) -> Self {
        Self {
            held_keys: FnvHashSet::default(),
            cursor: Vec2::ZERO,
            primary_button: false,
            scale_factor,
        }
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { input, .. } => {
                if let Some(key) = input.virtual_keycode {
                    self.set_key(key, input.state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor(position.to_logical::<f64>(self.scale_factor).into())
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.set_primary_button(*state == ElementState::Pressed),
            // Key-up events are not delivered once focus is gone.
            WindowEvent::Focused(false) => {
                self.held_keys.clear();
                self.primary_button = false;
            }
            _ => {}
        }
    }

    pub fn set_key(&mut self, key: VirtualKeyCode, pressed: bool) {
        if pressed {
            self.held_keys.insert(key);
        } else {
            self.held_keys.remove(&key);
        }
    }

    pub fn set_cursor(&mut self, cursor: Vec2) {
        self.cursor = cursor;
    }

    pub fn set_primary_button(&mut self, pressed: bool) {
        self.primary_button = pressed;
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        direction
            .keys()
            .iter()
            .any(|key| self.held_keys.contains(key))
    }

    /// The highest-precedence held direction.
    pub fn direction(&self) -> Option<Direction> {
        Direction::PRECEDENCE
            .into_iter()
            .find(|direction| self.is_held(*direction))
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn primary_button(&self) -> bool {
        self.primary_button
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use winit::{
        dpi::PhysicalPosition,
        event::{DeviceId, KeyboardInput, ModifiersState},
    };

    use super::*;

    fn device_id() -> DeviceId {
        unsafe { DeviceId::dummy() }
    }

    #[allow(deprecated)]
    fn key_event(key: VirtualKeyCode, state: ElementState) -> WindowEvent<'static> {
        WindowEvent::KeyboardInput {
            device_id: device_id(),
            input: KeyboardInput {
                scancode: 0,
                state,
                virtual_keycode: Some(key),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic: false,
        }
    }

    #[allow(deprecated)]
    fn button_event(button: MouseButton, state: ElementState) -> WindowEvent<'static> {
        WindowEvent::MouseInput {
            device_id: device_id(),
            state,
            button,
            modifiers: ModifiersState::empty(),
        }
    }

    #[allow(deprecated)]
    fn cursor_event(x: f64, y: f64) -> WindowEvent<'static> {
        WindowEvent::CursorMoved {
            device_id: device_id(),
            position: PhysicalPosition::new(x, y),
            modifiers: ModifiersState::empty(),
        }
    }

    #[test]
    fn key_events_hold_and_release() {
        let mut input = Input::new();
        input.handle_event(&key_event(VirtualKeyCode::D, ElementState::Pressed));
        assert_eq!(input.direction(), Some(Direction::Right));

        input.handle_event(&key_event(VirtualKeyCode::D, ElementState::Released));
        assert_eq!(input.direction(), None);
    }

    #[test]
    fn only_the_left_button_is_primary() {
        let mut input = Input::new();
        input.handle_event(&button_event(MouseButton::Right, ElementState::Pressed));
        assert!(!input.primary_button());

        input.handle_event(&button_event(MouseButton::Left, ElementState::Pressed));
        assert!(input.primary_button());

        input.handle_event(&button_event(MouseButton::Left, ElementState::Released));
        assert!(!input.primary_button());
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = Input::new();
        input.handle_event(&key_event(VirtualKeyCode::Right, ElementState::Pressed));
        input.handle_event(&button_event(MouseButton::Left, ElementState::Pressed));

        input.handle_event(&WindowEvent::Focused(false));
        assert_eq!(input.direction(), None);
        assert!(!input.primary_button());
    }

    #[test]
    fn cursor_is_logical() {
        let mut input = Input::with_scale_factor(2.0);
        input.handle_event(&cursor_event(300.0, 120.0));
        assert_eq!(input.cursor(), Vec2::new(150.0, 60.0));

        let mut input = Input::new();
        input.handle_event(&cursor_event(300.0, 120.0));
        assert_eq!(input.cursor(), Vec2::new(300.0, 120.0));
    }

    #[test]
    fn arrow_and_wasd_are_equivalent() {
        let mut input = Input::new();
        input.set_key(VirtualKeyCode::A, true);
        assert_eq!(input.direction(), Some(Direction::Left));

        input.set_key(VirtualKeyCode::A, false);
        input.set_key(VirtualKeyCode::Left, true);
        assert_eq!(input.direction(), Some(Direction::Left));
    }

    #[test]
    fn releasing_one_binding_keeps_the_other() {
        let mut input = Input::new();
        input.set_key(VirtualKeyCode::Up, true);
        input.set_key(VirtualKeyCode::W, true);
        input.set_key(VirtualKeyCode::Up, false);
        assert!(input.is_held(Direction::Up));
    }

    #[test]
    fn precedence() {
        let mut input = Input::new();
        input.set_key(VirtualKeyCode::S, true);
        assert_eq!(input.direction(), Some(Direction::Down));
        input.set_key(VirtualKeyCode::Up, true);
        assert_eq!(input.direction(), Some(Direction::Up));
        input.set_key(VirtualKeyCode::A, true);
        assert_eq!(input.direction(), Some(Direction::Left));
        input.set_key(VirtualKeyCode::Right, true);
        assert_eq!(input.direction(), Some(Direction::Right));
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut input = Input::new();
        input.set_key(VirtualKeyCode::Space, true);
        assert_eq!(input.direction(), None);
    }
}

//! Button queries and conversion to simulation input

use crate::sim::TickInput;

/// Logical buttons the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    SpeedUp,
    SpeedDown,
    Quit,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::SpeedUp,
        Button::SpeedDown,
        Button::Quit,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Input state supplied by the engine
pub trait InputSource {
    /// Button is currently down
    fn held(&self, button: Button) -> bool;
    /// Button went down this frame
    fn pressed(&self, button: Button) -> bool;
}

/// Build a tick's input from the engine's button state
pub fn read_input(source: &dyn InputSource) -> TickInput {
    TickInput {
        left: source.held(Button::Left),
        right: source.held(Button::Right),
        down: source.held(Button::Down),
        jump: source.held(Button::Up),
        speed_up: source.pressed(Button::SpeedUp),
        speed_down: source.pressed(Button::SpeedDown),
        quit: source.pressed(Button::Quit),
    }
}

/// Derives pressed edges for hosts that only report held state
#[derive(Debug, Clone, Default)]
pub struct EdgeInput {
    held: [bool; Button::ALL.len()],
    previous: [bool; Button::ALL.len()],
}

impl EdgeInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, button: Button, down: bool) {
        self.held[button.slot()] = down;
    }

    /// Call once per frame after the input has been consumed
    pub fn end_frame(&mut self) {
        self.previous = self.held;
    }
}

impl InputSource for EdgeInput {
    fn held(&self, button: Button) -> bool {
        self.held[button.slot()]
    }

    fn pressed(&self, button: Button) -> bool {
        self.held[button.slot()] && !self.previous[button.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_only_on_first_frame() {
        let mut input = EdgeInput::new();
        input.set_held(Button::SpeedUp, true);
        assert!(input.pressed(Button::SpeedUp));
        assert!(read_input(&input).speed_up);
        input.end_frame();

        assert!(input.held(Button::SpeedUp));
        assert!(!input.pressed(Button::SpeedUp));
        assert!(!read_input(&input).speed_up);
    }

    #[test]
    fn test_read_input_maps_held_buttons() {
        let mut input = EdgeInput::new();
        input.set_held(Button::Left, true);
        input.set_held(Button::Up, true);
        let tick = read_input(&input);
        assert!(tick.left && tick.jump);
        assert!(!tick.right && !tick.down && !tick.quit);
    }
}

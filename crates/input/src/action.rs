use glam::Vec2;

/// A high-level action produced by any input source.
///
/// The simulator consumes actions, never raw input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Move the paint cursor to a world position (snapped to the tile grid).
    Hover(Vec2),
    /// Paint the cursor colour at the hover position.
    Interact,
    /// Paint the cursor colour at an explicit world position.
    Paint(Vec2),
    /// Step to the next paint colour.
    CycleCursorColor,
    TogglePlaying,
    ClearWorld,
    Quit,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

/// Transition reported by [`InteractButton::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    Down,
    Held,
    Up,
}

/// Turns an analogue interact axis into press/hold/release edges.
#[derive(Debug, Clone, Copy)]
pub struct InteractButton {
    threshold: f32,
    pressed: bool,
}

impl Default for InteractButton {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl InteractButton {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            pressed: false,
        }
    }

    /// Feed the current axis value. Returns `None` while released and idle.
    pub fn update(&mut self, axis: f32) -> Option<ButtonEdge> {
        let down = axis >= self.threshold;
        match (self.pressed, down) {
            (false, true) => {
                self.pressed = true;
                Some(ButtonEdge::Down)
            }
            (true, true) => Some(ButtonEdge::Held),
            (true, false) => {
                self.pressed = false;
                Some(ButtonEdge::Up)
            }
            (false, false) => None,
        }
    }

    /// Painting happens on press and every frame while held.
    pub fn action(&mut self, axis: f32) -> Action {
        match self.update(axis) {
            Some(ButtonEdge::Down | ButtonEdge::Held) => Action::Interact,
            Some(ButtonEdge::Up) | None => Action::Noop,
        }
    }
}

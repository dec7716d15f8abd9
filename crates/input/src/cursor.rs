use automata_common::ColorIndex;
use automata_sim::{SimError, Simulator};
use glam::Vec2;

use crate::action::Action;

/// Paint cursor: the selected colour and where it points.
#[derive(Debug, Clone)]
pub struct Cursor {
    color: ColorIndex,
    /// Colours cycle through `0..palette_size`; `0` erases.
    palette_size: usize,
    dimension: u32,
    hover: Vec2,
    last_interact: Vec2,
}

impl Cursor {
    /// A cursor for a world with the given chunk dimension and palette size.
    pub fn new(dimension: u32, palette_size: usize) -> Self {
        let palette_size = palette_size.clamp(1, ColorIndex::MAX as usize + 1);
        Self {
            color: (1 % palette_size) as ColorIndex,
            palette_size,
            dimension: dimension.max(1),
            hover: Vec2::ZERO,
            last_interact: Vec2::ZERO,
        }
    }

    /// Cursor matching a simulator's world configuration.
    pub fn for_simulator(sim: &Simulator) -> Self {
        let world = sim.world();
        Self::new(world.dimension(), world.palette_size())
    }

    pub fn color(&self) -> ColorIndex {
        self.color
    }

    pub fn hover(&self) -> Vec2 {
        self.hover
    }

    pub fn last_interact(&self) -> Vec2 {
        self.last_interact
    }

    pub fn cycle_color(&mut self) -> ColorIndex {
        self.color = ((self.color as usize + 1) % self.palette_size) as ColorIndex;
        self.color
    }

    /// Move the cursor, snapping to the nearest tile.
    pub fn set_hover(&mut self, pos: Vec2) {
        let d = self.dimension as f32;
        self.hover = Vec2::new(
            (pos.x * d).round_ties_even() / d,
            (pos.y * d).round_ties_even() / d,
        );
    }
}

/// What applying an action did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Handled,
    Painted { pos: Vec2, color: ColorIndex },
    ColorSelected(ColorIndex),
    Quit,
}

/// Apply an action to the cursor and simulator.
pub fn apply(action: Action, cursor: &mut Cursor, sim: &mut Simulator) -> Result<Outcome, SimError> {
    let outcome = match action {
        Action::Hover(pos) => {
            cursor.set_hover(pos);
            Outcome::Handled
        }
        Action::Interact => {
            cursor.last_interact = cursor.hover;
            sim.paint(cursor.hover, cursor.color)?;
            Outcome::Painted {
                pos: cursor.hover,
                color: cursor.color,
            }
        }
        Action::Paint(pos) => {
            sim.paint(pos, cursor.color)?;
            Outcome::Painted {
                pos,
                color: cursor.color,
            }
        }
        Action::CycleCursorColor => Outcome::ColorSelected(cursor.cycle_color()),
        Action::TogglePlaying => {
            sim.toggle_playing();
            Outcome::Handled
        }
        Action::ClearWorld => {
            sim.clear_world();
            Outcome::Handled
        }
        Action::Quit => Outcome::Quit,
        Action::Noop => Outcome::Handled,
    };
    tracing::trace!(?action, ?outcome, "action applied");
    Ok(outcome)
}

//! Per-tile transition rules.
//!
//! Every rule builds a histogram over the neighbour colours (the tile's own
//! colour is never counted) and picks a winner with a strict `>` scan, so the
//! lowest index reaching the maximum wins ties.

use automata_common::{BACKGROUND, ColorIndex, MAX_PALETTE_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest primary colour index. Colours above it are secondaries.
pub const LAST_PRIMARY: ColorIndex = 3;

/// Secondary produced by mixing primaries 2 and 3.
pub const CYAN: ColorIndex = 4;
/// Secondary produced by mixing primaries 1 and 3.
pub const MAGENTA: ColorIndex = 5;
/// Secondary produced by mixing primaries 1 and 2.
pub const YELLOW: ColorIndex = 6;

/// The closed set of transition rules, selected once per simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKernel {
    /// Majority spread of non-background colours.
    #[default]
    Grow,
    /// Weighted primary/secondary colour mixing with death and stability rules.
    Mix,
    /// Majority vote with the background allowed to win.
    Dissolve,
}

impl TileKernel {
    pub const ALL: [TileKernel; 3] = [TileKernel::Grow, TileKernel::Mix, TileKernel::Dissolve];

    /// Compute the next colour of a tile.
    pub fn apply(
        self,
        current: ColorIndex,
        neighbors: &[ColorIndex],
        palette_size: usize,
    ) -> ColorIndex {
        match self {
            TileKernel::Grow => grow(current, neighbors, palette_size),
            TileKernel::Mix => mix(current, neighbors, palette_size),
            TileKernel::Dissolve => dissolve(current, neighbors, palette_size),
        }
    }

    /// Highest colour index this rule can emit on its own, independent of its inputs.
    pub fn max_emitted_color(self) -> Option<ColorIndex> {
        match self {
            TileKernel::Mix => Some(YELLOW),
            TileKernel::Grow | TileKernel::Dissolve => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TileKernel::Grow => "grow",
            TileKernel::Mix => "mix",
            TileKernel::Dissolve => "dissolve",
        }
    }
}

impl fmt::Display for TileKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown tile kernel {0:?}, expected one of: grow, mix, dissolve")]
pub struct UnknownKernel(pub String);

impl FromStr for TileKernel {
    type Err = UnknownKernel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TileKernel::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKernel(s.to_string()))
    }
}

type Histogram = [u32; MAX_PALETTE_SIZE];

fn histogram(neighbors: &[ColorIndex], weight: impl Fn(ColorIndex) -> u32) -> Histogram {
    let mut counts = [0u32; MAX_PALETTE_SIZE];
    for &c in neighbors {
        counts[c as usize] += weight(c);
    }
    counts
}

/// Strict arg-max over `counts[start..palette_size]`. Returns `(0, 0)` if every count is zero.
fn arg_max(counts: &Histogram, start: usize, palette_size: usize) -> (ColorIndex, u32) {
    let end = palette_size.min(MAX_PALETTE_SIZE);
    let mut best = (BACKGROUND, 0);
    for (i, &count) in counts.iter().enumerate().take(end).skip(start) {
        if count > best.1 {
            best = (i as ColorIndex, count);
        }
    }
    best
}

/// Spread the most common non-background neighbour colour. `current` is ignored.
pub fn grow(_current: ColorIndex, neighbors: &[ColorIndex], palette_size: usize) -> ColorIndex {
    let counts = histogram(neighbors, |_| 1);
    arg_max(&counts, 1, palette_size).0
}

/// Like [`grow`] but the background competes too and wins ties against every colour.
pub fn dissolve(
    _current: ColorIndex,
    neighbors: &[ColorIndex],
    palette_size: usize,
) -> ColorIndex {
    let counts = histogram(neighbors, |_| 1);
    arg_max(&counts, 0, palette_size).0
}

/// Mix primaries into secondaries.
///
/// Secondary neighbours weigh three times as much as primaries and the
/// background. A tile dies when the weighted background count reaches 5, or
/// reaches 2 while the winning colour is a secondary.
pub fn mix(current: ColorIndex, neighbors: &[ColorIndex], palette_size: usize) -> ColorIndex {
    let counts = histogram(neighbors, |c| if c <= LAST_PRIMARY { 1 } else { 3 });
    let (common, common_count) = arg_max(&counts, 1, palette_size);

    let end = palette_size.min(MAX_PALETTE_SIZE);
    let unique = (1..end)
        .filter(|&i| counts[i] > 0 && i != current as usize)
        .count();

    let background = counts[BACKGROUND as usize];
    if background >= 5 || (background >= 2 && common > LAST_PRIMARY) {
        return BACKGROUND;
    }

    if current == BACKGROUND {
        return common;
    }

    if common == current && unique == 0 && common_count >= 4 {
        return current;
    }

    match (current.min(common), current.max(common)) {
        (1, 2) => YELLOW,
        (1, 3) => MAGENTA,
        (2, 3) => CYAN,
        _ if current > LAST_PRIMARY && common > LAST_PRIMARY && current != common => BACKGROUND,
        _ => common,
    }
}

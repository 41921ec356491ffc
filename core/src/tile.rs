use serde::{Deserialize, Serialize};

/// What a board cell holds, fixed at generation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Mine,
    /// No adjacent mines.
    Empty,
    /// Between 1 and 8 adjacent mines.
    Count(u8),
}

impl Label {
    /// Label for a safe cell with `adjacent` neighbouring mines.
    pub const fn from_count(adjacent: u8) -> Self {
        if adjacent == 0 {
            Self::Empty
        } else {
            Self::Count(adjacent)
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacent mine count, `None` for mines.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Empty => Some(0),
            Self::Count(count) => Some(count),
        }
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(Label),
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_empty() {
        assert_eq!(Label::from_count(0), Label::Empty);
        assert_eq!(Label::from_count(3), Label::Count(3));
        assert_eq!(Label::Empty.adjacent_mines(), Some(0));
        assert_eq!(Label::Mine.adjacent_mines(), None);
    }
}

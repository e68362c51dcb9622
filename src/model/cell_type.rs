//! Coarse cell categories for topology descriptors.

use serde::{Deserialize, Serialize};

/// Interpolation order family of an element shape.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// No element shape (empty topology).
    #[default]
    NoCellType,
    /// First-order elements.
    Linear,
    /// Second-order elements.
    Quadratic,
    /// Third-order elements.
    Cubic,
    /// Fourth-order elements.
    Quartic,
    /// Fifth-order elements.
    Quintic,
    /// Sixth-order elements.
    Sextic,
    /// Seventh-order elements.
    Septic,
    /// Eighth-order elements.
    Octic,
    /// Ninth-order elements.
    Nonic,
    /// Tenth-order elements.
    Decic,
    /// Mixed shapes in one topology.
    Arbitrary,
    /// Implicit structured connectivity.
    Structured,
}

impl CellType {
    /// Polynomial order for the fixed-order categories.
    pub fn order(self) -> Option<u8> {
        match self {
            CellType::Linear => Some(1),
            CellType::Quadratic => Some(2),
            CellType::Cubic => Some(3),
            CellType::Quartic => Some(4),
            CellType::Quintic => Some(5),
            CellType::Sextic => Some(6),
            CellType::Septic => Some(7),
            CellType::Octic => Some(8),
            CellType::Nonic => Some(9),
            CellType::Decic => Some(10),
            CellType::NoCellType | CellType::Arbitrary | CellType::Structured => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_follow_category() {
        assert_eq!(CellType::default(), CellType::NoCellType);
        assert_eq!(CellType::Linear.order(), Some(1));
        assert_eq!(CellType::Decic.order(), Some(10));
        assert_eq!(CellType::Arbitrary.order(), None);
    }
}

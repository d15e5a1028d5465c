//! Physics layers and layer masks.
//!
//! Every body in the spatial index lives on exactly one [`Layer`] (0..32).
//! Queries carry a [`LayerMask`] and only see bodies whose layer bit is set.

use std::fmt;

/// A single layer index in `0..32`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer(pub u8);

impl Layer {
    /// The mask containing only this layer.
    ///
    /// Layers outside `0..32` map to the empty mask.
    #[inline]
    pub fn mask(self) -> LayerMask {
        LayerMask(1u32.checked_shl(self.0 as u32).unwrap_or(0))
    }
}

/// A set of layers, one bit per layer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Build a mask from a list of layers.
    pub fn of(layers: &[Layer]) -> Self {
        layers.iter().fold(Self::NONE, |m, l| m | l.mask())
    }

    #[inline]
    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.mask().0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;
    #[inline]
    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

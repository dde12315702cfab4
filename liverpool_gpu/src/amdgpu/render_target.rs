/// Color and depth render-target register state (CB_COLOR* / DB_* blocks)

use super::pixel_format::{DataFormat, NumberFormat};

register_enum! {
    /// Channel reordering applied by the color block on output (`COMP_SWAP`)
    pub enum SwapMode {
        Standard = 0,
        Alternate = 1,
        StandardReverse = 2,
        AlternateReverse = 3,
    }
}

impl SwapMode {
    /// Channels are written in their natural order
    pub const NO_SWAP: SwapMode = SwapMode::Standard;
}

register_enum! {
    /// Depth plane format (`DB_Z_INFO.FORMAT`)
    pub enum ZFormat {
        Invalid = 0,
        Z16 = 1,
        Z32Float = 3,
    }
}

register_enum! {
    /// Stencil plane format (`DB_STENCIL_INFO.FORMAT`); `Invalid` means no stencil plane
    pub enum StencilFormat {
        Invalid = 0,
        Stencil8 = 1,
    }
}

/// Color render-target source descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTarget {
    pub data_format: DataFormat,
    pub number_format: NumberFormat,
    pub swap_mode: SwapMode,
    /// First bound slice
    pub slice_start: u32,
    /// Total number of slices of the surface (`slice_max + 1`)
    pub total_slices: u32,
}

/// Depth render-target source descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthTarget {
    pub z_format: ZFormat,
    pub stencil_format: StencilFormat,
    /// First bound slice
    pub slice_start: u32,
    /// Total number of slices of the surface (`slice_max + 1`)
    pub total_slices: u32,
    /// `DB_DEPTH_CONTROL.Z_WRITE_ENABLE`
    pub write_enable: bool,
}

impl DepthTarget {
    /// True when the surface carries a stencil plane
    pub fn has_stencil(&self) -> bool {
        self.stencil_format != StencilFormat::Invalid
    }
}

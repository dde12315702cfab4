//! Two-part hardware format encoding: channel layout (data format) and
//! numeric interpretation (number format).

register_enum! {
    /// Channel layout of a surface (`DATA_FORMAT` / `FORMAT` register fields)
    #[allow(non_camel_case_types)]
    pub enum DataFormat {
        FormatInvalid = 0,
        Format8 = 1,
        Format16 = 2,
        Format8_8 = 3,
        Format32 = 4,
        Format16_16 = 5,
        Format10_11_11 = 6,
        Format11_11_10 = 7,
        Format10_10_10_2 = 8,
        Format2_10_10_10 = 9,
        Format8_8_8_8 = 10,
        Format32_32 = 11,
        Format16_16_16_16 = 12,
        Format32_32_32 = 13,
        Format32_32_32_32 = 14,
        Format5_6_5 = 16,
        Format1_5_5_5 = 17,
        Format5_5_5_1 = 18,
        Format4_4_4_4 = 19,
        Format8_24 = 20,
        Format24_8 = 21,
        FormatX24_8_32 = 22,
        FormatGB_GR = 32,
        FormatBG_RG = 33,
        Format5_9_9_9 = 34,
        FormatBc1 = 35,
        FormatBc2 = 36,
        FormatBc3 = 37,
        FormatBc4 = 38,
        FormatBc5 = 39,
        FormatBc6 = 40,
        FormatBc7 = 41,
    }
}

register_enum! {
    /// Numeric interpretation of each channel (`NUM_FORMAT` register field)
    pub enum NumberFormat {
        Unorm = 0,
        Snorm = 1,
        Uscaled = 2,
        Sscaled = 3,
        Uint = 4,
        Sint = 5,
        SnormNz = 6,
        Float = 7,
        Srgb = 9,
        Ubnorm = 10,
        UbnormNz = 11,
        Ubint = 12,
        Ubscaled = 13,
    }
}

impl DataFormat {
    /// Block-compressed layouts (BC1..BC7)
    pub fn is_block_compressed(self) -> bool {
        matches!(
            self,
            DataFormat::FormatBc1
                | DataFormat::FormatBc2
                | DataFormat::FormatBc3
                | DataFormat::FormatBc4
                | DataFormat::FormatBc5
                | DataFormat::FormatBc6
                | DataFormat::FormatBc7
        )
    }
}

impl NumberFormat {
    /// Gamma-encoded unsigned normalized
    pub fn is_srgb(self) -> bool {
        self == NumberFormat::Srgb
    }

    /// Counterpart used when gamma encoding must be bypassed (storage writes)
    pub fn without_srgb(self) -> NumberFormat {
        match self {
            NumberFormat::Srgb => NumberFormat::Unorm,
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "pixel_format_tests.rs"]
mod tests;

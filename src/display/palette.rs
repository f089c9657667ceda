// Master palette - maps 6-bit PPU color indices to RGB
//
// The PPU never produces RGB itself; it emits a 6-bit color index plus three
// emphasis bits. Conversion to RGB happens here, on the host side of the
// frame buffer.

/// NES master palette (0xRRGGBB), NTSC approximation
pub const NES_PALETTE: [u32; 64] = [
    // $00-$0F
    0x666666, 0x002A88, 0x1412A7, 0x3B00A4, 0x5C007E, 0x6E0040, 0x6C0600, 0x561D00,
    0x333500, 0x0B4800, 0x005200, 0x004F08, 0x00404D, 0x000000, 0x000000, 0x000000,
    // $10-$1F
    0xADADAD, 0x155FD9, 0x4240FF, 0x7527FE, 0xA01ACC, 0xB71E7B, 0xB53120, 0x994E00,
    0x6B6D00, 0x388700, 0x0C9300, 0x008F32, 0x007C8D, 0x000000, 0x000000, 0x000000,
    // $20-$2F
    0xFFFEFF, 0x64B0FF, 0x9290FF, 0xC676FF, 0xF36AFF, 0xFE6ECC, 0xFE8170, 0xEA9E22,
    0xBCBE00, 0x88D800, 0x5CE430, 0x45E082, 0x48CDDE, 0x4F4F4F, 0x000000, 0x000000,
    // $30-$3F
    0xFFFEFF, 0xC0DFFF, 0xD3D2FF, 0xE8C8FF, 0xFBC2FF, 0xFEC4EA, 0xFECCC5, 0xF7D8A5,
    0xE4E594, 0xCFEF96, 0xBDF4AB, 0xB3F3CC, 0xB5EBF2, 0xB8B8B8, 0x000000, 0x000000,
];

/// Emphasis bit for the red channel (normalized order)
pub const EMPHASIS_RED: u8 = 0b001;
/// Emphasis bit for the green channel (normalized order)
pub const EMPHASIS_GREEN: u8 = 0b010;
/// Emphasis bit for the blue channel (normalized order)
pub const EMPHASIS_BLUE: u8 = 0b100;

/// Convert a color index to RGB
#[inline]
pub fn palette_to_rgb(index: u8) -> u32 {
    NES_PALETTE[(index & 0x3F) as usize]
}

/// Apply color emphasis to an RGB value
///
/// Channels that are not emphasized are attenuated to 3/4 when any emphasis
/// bit is set. The black columns ($xE/$xF) are left alone.
///
/// # Arguments
/// * `index` - Color index (0x00-0x3F), used to detect the black columns
/// * `rgb` - Base RGB value
/// * `emphasis` - Emphasis bits in R/G/B order (see [`EMPHASIS_RED`] and friends)
pub fn apply_emphasis(index: u8, rgb: u32, emphasis: u8) -> u32 {
    let emphasis = emphasis & 0x07;
    if emphasis == 0 || (index & 0x0E) == 0x0E {
        return rgb;
    }

    let attenuate = |channel: u32, bit: u8| -> u32 {
        if emphasis & bit != 0 {
            channel
        } else {
            channel * 3 / 4
        }
    };

    let r = attenuate((rgb >> 16) & 0xFF, EMPHASIS_RED);
    let g = attenuate((rgb >> 8) & 0xFF, EMPHASIS_GREEN);
    let b = attenuate(rgb & 0xFF, EMPHASIS_BLUE);
    (r << 16) | (g << 8) | b
}

/// Convert RGB color to RGBA bytes
#[inline]
pub fn rgb_to_rgba(rgb: u32) -> [u8; 4] {
    [
        ((rgb >> 16) & 0xFF) as u8, // Red
        ((rgb >> 8) & 0xFF) as u8,  // Green
        (rgb & 0xFF) as u8,         // Blue
        0xFF,                       // Alpha
    ]
}

/// Convert a color index directly to RGBA bytes (no emphasis)
#[inline]
pub fn palette_to_rgba(index: u8) -> [u8; 4] {
    rgb_to_rgba(palette_to_rgb(index))
}

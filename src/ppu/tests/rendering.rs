//! Background pipeline and pixel composition tests

use super::*;

/// Prepare palette entries: backdrop $0F, bg palette 0 color 1 = $16,
/// bg palette 3 color 1 = $2A, sprite palette 0 color 1 = $30
fn setup_palette(ppu: &mut Ppu, cart: &mut Nrom) {
    poke_vram(ppu, cart, 0x3F00, 0x0F);
    poke_vram(ppu, cart, 0x3F01, 0x16);
    poke_vram(ppu, cart, 0x3F0D, 0x2A);
    poke_vram(ppu, cart, 0x3F11, 0x30);
}

#[test]
fn test_fetch_tile_reads_pattern_and_attribute() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();

    // Tile 1, row 0: color 1 on the left half, color 2 on the right half
    set_tile_row(&mut cart, 0x0000, 1, 0, 0xF0, 0x0F);
    poke_vram(&mut ppu, &mut cart, 0x2000, 0x01);
    poke_vram(&mut ppu, &mut cart, 0x23C0, 0b0000_0011); // top-left quadrant: palette 3

    ppu.v = 0x0000;
    ppu.fetch_tile(&mut cart);

    assert_eq!(&ppu.bg_pixels[8..12], &[0x0D; 4]);
    assert_eq!(&ppu.bg_pixels[12..16], &[0x0E; 4]);
}

#[test]
fn test_fetch_tile_attribute_quadrants() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();

    set_tile_row(&mut cart, 0x0000, 0, 0, 0xFF, 0x00);
    // Quadrants: top-left 0, top-right 1, bottom-left 2, bottom-right 3
    poke_vram(&mut ppu, &mut cart, 0x23C0, 0b11_10_01_00);

    for (coarse_x, coarse_y, palette) in [(0u16, 0u16, 0u8), (2, 0, 1), (0, 2, 2), (3, 3, 3)] {
        ppu.v = (coarse_y << 5) | coarse_x;
        ppu.fetch_tile(&mut cart);
        assert_eq!(ppu.bg_pixels[15], (palette << 2) | 1, "tile ({}, {})", coarse_x, coarse_y);
    }
}

#[test]
fn test_fetch_tile_uses_fine_y_and_bg_table() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();

    set_tile_row(&mut cart, 0x1000, 0, 5, 0x00, 0xFF);
    ppu.write_register(PPUCTRL, 0x10, &mut cart);

    ppu.v = 0x5000; // fine Y 5
    ppu.fetch_tile(&mut cart);
    assert_eq!(ppu.bg_pixels[8], 0x02);
}

#[test]
fn test_fetch_tile_shifts_buffer() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();

    set_tile_row(&mut cart, 0x0000, 1, 0, 0xFF, 0x00);
    poke_vram(&mut ppu, &mut cart, 0x2000, 0x01);
    poke_vram(&mut ppu, &mut cart, 0x2001, 0x00);

    ppu.v = 0x0000;
    ppu.fetch_tile(&mut cart);
    ppu.increment_x();
    ppu.fetch_tile(&mut cart);

    assert_eq!(&ppu.bg_pixels[0..8], &[0x01; 8], "First tile moved to the front");
    assert_eq!(&ppu.bg_pixels[8..16], &[0x00; 8], "Blank tile behind it");
}

#[test]
fn test_render_tile_backdrop_when_disabled() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    setup_palette(&mut ppu, &mut cart);
    ppu.bg_pixels = [0x01; 16];

    ppu.render_tile(10, 3);

    for x in 24..32 {
        assert_eq!(ppu.frame().get_pixel(x, 10), 0x0F);
    }
}

#[test]
fn test_render_tile_background_with_fine_x() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    setup_palette(&mut ppu, &mut cart);
    ppu.write_register(PPUMASK, 0x0A, &mut cart); // bg on, bg left column on

    ppu.bg_pixels = [0; 16];
    ppu.bg_pixels[3] = 0x01;
    ppu.fine_x = 3;

    ppu.render_tile(0, 0);

    assert_eq!(ppu.frame().get_pixel(0, 0), 0x16);
    assert_eq!(ppu.frame().get_pixel(1, 0), 0x0F);
}

#[test]
fn test_left_column_clipping() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    setup_palette(&mut ppu, &mut cart);
    ppu.write_register(PPUMASK, 0x18, &mut cart); // both layers, both clipped on the left

    ppu.bg_pixels = [0x01; 16];
    ppu.sprite_pixels[9] = 0x11;

    ppu.render_tile(5, 0);
    ppu.render_tile(5, 1);

    assert_eq!(ppu.frame().get_pixel(7, 5), 0x0F, "Clipped to backdrop");
    assert_eq!(ppu.frame().get_pixel(8, 5), 0x16, "Background past the clip");
    assert_eq!(ppu.frame().get_pixel(9, 5), 0x30, "Sprite past the clip");
}

#[test]
fn test_sprite_in_front_of_background() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    setup_palette(&mut ppu, &mut cart);
    ppu.write_register(PPUMASK, 0x1E, &mut cart);

    ppu.bg_pixels = [0x01; 16];
    ppu.sprite_pixels[20] = 0x11;

    ppu.render_tile(0, 2);
    assert_eq!(ppu.frame().get_pixel(20, 0), 0x30);
}

#[test]
fn test_sprite_behind_background() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    setup_palette(&mut ppu, &mut cart);
    ppu.write_register(PPUMASK, 0x1E, &mut cart);

    ppu.bg_pixels = [0; 16];
    ppu.bg_pixels[4] = 0x01;
    ppu.sprite_pixels[20] = 0x11;
    ppu.sprite_pixels[21] = 0x11;
    ppu.sprite_behind[20] = true;
    ppu.sprite_behind[21] = true;

    ppu.render_tile(0, 2);
    assert_eq!(ppu.frame().get_pixel(20, 0), 0x16, "Opaque background covers the sprite");
    assert_eq!(ppu.frame().get_pixel(21, 0), 0x30, "Sprite shows through transparent background");
}

#[test]
fn test_sprite_zero_hit() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    ppu.write_register(PPUMASK, 0x1E, &mut cart);

    ppu.bg_pixels = [0x01; 16];
    ppu.sprite_pixels[40] = 0x11;
    ppu.sprite_zero_pixels[40] = true;

    // Tile 4 covers x=32..39 and misses the sprite pixel
    ppu.render_tile(30, 4);
    assert!(!ppu.sprite_zero_hit());

    ppu.render_tile(30, 5);
    assert!(ppu.sprite_zero_hit());
}

#[test]
fn test_sprite_zero_hit_needs_opaque_background() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    ppu.write_register(PPUMASK, 0x1E, &mut cart);

    ppu.bg_pixels = [0; 16];
    ppu.sprite_pixels[40] = 0x11;
    ppu.sprite_zero_pixels[40] = true;

    ppu.render_tile(30, 5);
    assert!(!ppu.sprite_zero_hit());
}

#[test]
fn test_sprite_zero_hit_not_at_x_255() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    ppu.write_register(PPUMASK, 0x1E, &mut cart);

    ppu.bg_pixels = [0x01; 16];
    ppu.sprite_pixels[255] = 0x11;
    ppu.sprite_zero_pixels[255] = true;

    ppu.render_tile(30, 31);
    assert!(!ppu.sprite_zero_hit());
}

#[test]
fn test_sprite_zero_hit_respects_left_clip() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    ppu.write_register(PPUMASK, 0x18, &mut cart);

    ppu.bg_pixels = [0x01; 16];
    ppu.sprite_pixels[3] = 0x11;
    ppu.sprite_zero_pixels[3] = true;

    ppu.render_tile(30, 0);
    assert!(!ppu.sprite_zero_hit());
}

#[test]
fn test_sprite_zero_hit_requires_both_layers() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    ppu.write_register(PPUMASK, 0x0E, &mut cart); // background only

    ppu.bg_pixels = [0x01; 16];
    ppu.sprite_pixels[40] = 0x11;
    ppu.sprite_zero_pixels[40] = true;

    ppu.render_tile(30, 5);
    assert!(!ppu.sprite_zero_hit());
}

#[test]
fn test_grayscale_output() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    setup_palette(&mut ppu, &mut cart);
    ppu.write_register(PPUMASK, 0x0B, &mut cart);

    ppu.bg_pixels = [0x01; 16];
    ppu.render_tile(0, 1);
    assert_eq!(ppu.frame().get_pixel(8, 0), 0x10);
}

#[test]
fn test_emphasis_bits_ntsc() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    ppu.write_register(PPUMASK, 0x20, &mut cart); // red on NTSC

    ppu.render_tile(0, 0);
    assert_eq!(ppu.frame().get_emphasis(0, 0), 0b001);
}

#[test]
fn test_emphasis_bits_pal_swap_red_green() {
    let mut ppu = Ppu::new();
    let mut cart = test_cart();
    ppu.set_timing_mode(TimingMode::Pal);

    ppu.write_register(PPUMASK, 0x20, &mut cart); // green on PAL
    ppu.render_tile(0, 0);
    assert_eq!(ppu.frame().get_emphasis(0, 0), 0b010);

    ppu.write_register(PPUMASK, 0xC0, &mut cart); // red + blue on PAL
    ppu.render_tile(1, 0);
    assert_eq!(ppu.frame().get_emphasis(0, 1), 0b101);
}

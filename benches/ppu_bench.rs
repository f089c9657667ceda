// PPU Benchmarks
// Performance benchmarks for PPU rendering operations

use criterion::{criterion_group, criterion_main, Criterion};
use nes_core::{Bus, Emulator, Mirroring, Nrom};
use std::hint::black_box;

/// Helper function to create a test cartridge
///
/// CHR holds a test pattern and the program is an endless JMP.
fn create_test_cartridge() -> Box<Nrom> {
    let mut prg = vec![0xEA; 0x8000];
    prg[..3].copy_from_slice(&[0x4C, 0x00, 0x80]);
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;
    Box::new(Nrom::new(prg, vec![0xAA; 0x2000], Mirroring::Horizontal))
}

/// Bus with background and sprites enabled and a populated OAM
fn rendering_bus() -> Bus {
    let mut bus = Bus::with_cartridge(create_test_cartridge());
    bus.write(0x2003, 0);
    for i in 0..=255u8 {
        bus.write(0x2004, i);
    }
    bus.write(0x2001, 0b00011110); // PPUMASK: show background and sprites
    bus
}

/// Benchmark whole frames through the scheduler
/// This is the main performance-critical path: CPU catch-up plus PPU steps
fn bench_ppu_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_rendering");
    group.sample_size(20); // Reduce sample size for rendering benchmarks

    group.bench_function("full_frame_rendering_enabled", |b| {
        let mut emulator = Emulator::with_cartridge(create_test_cartridge());
        emulator.bus_mut().write(0x2001, 0b00011110);

        b.iter(|| {
            emulator.run_frame_unpainted();
            black_box(emulator.frame_buffer());
        });
    });

    group.bench_function("full_frame_rendering_disabled", |b| {
        let mut emulator = Emulator::with_cartridge(create_test_cartridge());

        b.iter(|| {
            emulator.run_frame_unpainted();
            black_box(emulator.frame_buffer());
        });
    });

    group.finish();
}

/// Benchmark the per-scanline PPU steps in isolation
fn bench_ppu_line_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_line_steps");

    group.bench_function("background_line", |b| {
        let mut bus = rendering_bus();

        b.iter(|| {
            for tile in 0..32 {
                bus.ppu.render_tile(black_box(100), tile);
                bus.ppu.fetch_tile(bus.cartridge.as_mut());
                bus.ppu.increment_x();
            }
            bus.ppu.increment_y();
            bus.ppu.reset_x();
        });
    });

    group.bench_function("sprite_evaluation_and_fetch", |b| {
        let mut bus = rendering_bus();

        b.iter(|| {
            bus.ppu.clear_secondary_oam();
            bus.ppu.evaluate_sprites(black_box(40));
            for slot in 0..8 {
                bus.ppu.fetch_sprite(slot, bus.cartridge.as_mut());
            }
        });
    });

    group.finish();
}

/// Benchmark PPU register access patterns
fn bench_ppu_registers(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_registers");

    group.bench_function("ppuctrl_write", |b| {
        let mut bus = Bus::with_cartridge(create_test_cartridge());

        b.iter(|| {
            bus.write(black_box(0x2000), black_box(0b00010000));
        });
    });

    group.bench_function("ppustatus_read", |b| {
        let mut bus = Bus::with_cartridge(create_test_cartridge());

        b.iter(|| {
            black_box(bus.read(0x2002));
        });
    });

    group.bench_function("ppudata_write_sequence", |b| {
        let mut bus = Bus::with_cartridge(create_test_cartridge());

        b.iter(|| {
            // Set VRAM address
            bus.write(0x2006, 0x20); // High byte
            bus.write(0x2006, 0x00); // Low byte

            // Write 32 bytes
            for i in 0..32 {
                bus.write(0x2007, i);
            }
        });
    });

    group.finish();
}

/// Benchmark OAM (Object Attribute Memory) access patterns
fn bench_ppu_oam(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_oam");

    group.bench_function("oam_write", |b| {
        let mut bus = Bus::with_cartridge(create_test_cartridge());

        b.iter(|| {
            // Write full OAM (256 bytes) via OAMDATA register
            bus.write(0x2003, 0); // Set OAM address to 0
            for i in 0..=255u8 {
                bus.write(0x2004, i); // Write to OAMDATA
            }
        });
    });

    group.bench_function("oam_dma", |b| {
        let mut bus = Bus::with_cartridge(create_test_cartridge());

        b.iter(|| {
            bus.run_oam_dma(black_box(0x02));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_ppu_rendering,
    bench_ppu_line_steps,
    bench_ppu_registers,
    bench_ppu_oam
);
criterion_main!(benches);

// Bus module - CPU address space and the devices behind it
//
// The bus owns every memory-mapped device by value or boxed trait object.
// Nothing holds a pointer back to the bus; the CPU receives it as `&mut Bus`
// for the duration of an instruction.
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4000-$4017: APU and I/O Registers
// $4018-$401F: APU and I/O test functionality (disabled, reads 0)
// $4020-$FFFF: Cartridge space (PRG-ROM, PRG-RAM, and mapper registers)
// ```

use crate::apu::{Apu, SilentApu};
use crate::cartridge::{Cartridge, EmptyCartridge};
use crate::input::{Controller, Unplugged};
use crate::ppu::Ppu;
use crate::ram::Ram;

/// Controller port index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    /// Read at $4016
    One,
    /// Read at $4017
    Two,
}

/// Main memory bus
pub struct Bus {
    /// 2KB work RAM
    ram: Ram,

    /// Picture processing unit ($2000-$3FFF)
    pub ppu: Ppu,

    /// Audio processing unit ($4000-$4013, $4015, $4017 writes)
    pub apu: Box<dyn Apu>,

    /// Cartridge board ($4020-$FFFF and the PPU pattern/nametable space)
    pub cartridge: Box<dyn Cartridge>,

    /// Devices on controller ports 1 and 2
    controllers: [Box<dyn Controller>; 2],

    /// Page written to $4014 and not yet transferred
    dma_page: Option<u8>,
}

impl Bus {
    /// Create a bus with an empty cartridge slot, a silent APU and nothing
    /// plugged into the controller ports
    ///
    /// # Example
    /// ```
    /// use nes_core::Bus;
    /// let mut bus = Bus::new();
    /// assert_eq!(bus.read(0x8000), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_cartridge(Box::new(EmptyCartridge))
    }

    /// Create a bus with a cartridge inserted
    pub fn with_cartridge(cartridge: Box<dyn Cartridge>) -> Self {
        Bus {
            ram: Ram::new(),
            ppu: Ppu::new(),
            apu: Box::new(SilentApu::new()),
            cartridge,
            controllers: [Box::new(Unplugged), Box::new(Unplugged)],
            dma_page: None,
        }
    }

    /// Replace the cartridge
    pub fn insert_cartridge(&mut self, cartridge: Box<dyn Cartridge>) {
        self.cartridge = cartridge;
    }

    /// Replace the APU
    pub fn set_apu(&mut self, apu: Box<dyn Apu>) {
        self.apu = apu;
    }

    /// Plug a device into a controller port
    pub fn set_controller(&mut self, port: Port, controller: Box<dyn Controller>) {
        self.controllers[port as usize] = controller;
    }

    /// Read a byte from the bus
    ///
    /// Reads can have side effects (PPU status, $2007, controller shift
    /// registers, mapper latches), so this takes `&mut self`.
    ///
    /// # Example
    /// ```
    /// use nes_core::Bus;
    /// let mut bus = Bus::new();
    /// bus.write(0x0001, 0x42);
    /// assert_eq!(bus.read(0x0801), 0x42);
    /// ```
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            // Internal RAM and its mirrors
            0x0000..=0x1FFF => self.ram.read(addr),

            // PPU registers, mirrored every 8 bytes
            0x2000..=0x3FFF => self.ppu.read_register(addr, self.cartridge.as_mut()),

            // APU registers (only $4015 is meaningful)
            0x4000..=0x4015 => self.apu.read_register(addr),

            // Controller ports
            0x4016 => self.controllers[Port::One as usize].read(),
            0x4017 => self.controllers[Port::Two as usize].read(),

            // Test mode registers
            0x4018..=0x401F => 0,

            // Cartridge space
            0x4020..=0xFFFF => self.cartridge.cpu_read(addr),
        }
    }

    /// Write a byte to the bus
    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, data),

            0x2000..=0x3FFF => self.ppu.write_register(addr, data, self.cartridge.as_mut()),

            // $4014: OAM DMA, transferred after the current instruction
            0x4014 => {
                log::trace!("OAM DMA requested from page ${:02X}", data);
                self.dma_page = Some(data);
            }

            // $4016: strobe line goes to both ports
            0x4016 => {
                for controller in self.controllers.iter_mut() {
                    controller.write(data);
                }
            }

            // $4017 writes are the APU frame counter
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write_register(addr, data),

            0x4018..=0x401F => {}

            0x4020..=0xFFFF => self.cartridge.cpu_write(addr, data),
        }
    }

    /// Read a 16-bit little-endian word
    pub fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    // ========================================
    // OAM DMA
    // ========================================

    /// Take the pending OAM DMA request, if any
    pub fn take_dma_request(&mut self) -> Option<u8> {
        self.dma_page.take()
    }

    /// Copy $XX00-$XXFF into OAM through the DMA port
    ///
    /// The CPU is responsible for the 513/514-cycle stall.
    pub fn run_oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        for offset in 0..256u16 {
            let data = self.read(base | offset);
            self.ppu.write_oam_dma(data);
        }
    }

    // ========================================
    // Interrupt lines
    // ========================================

    /// Level of the shared IRQ line (APU or cartridge)
    pub fn irq_line(&self) -> bool {
        self.apu.irq_pending() || self.cartridge.irq_pending()
    }

    // ========================================
    // Lifecycle
    // ========================================

    /// Power cycle: clear RAM and bring the PPU to its power-on state
    ///
    /// The cartridge, APU and controllers are kept.
    pub fn power_on(&mut self) {
        self.ram.fill(0x00);
        self.ppu = Ppu::new();
        self.dma_page = None;
    }

    /// Reset button: RAM is preserved
    pub fn reset(&mut self) {
        self.ppu.reset();
        self.dma_page = None;
    }

    /// Work RAM
    pub fn ram(&self) -> &Ram {
        &self.ram
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{Mirroring, Nrom};
    use crate::input::StandardController;

    // ========================================
    // RAM Tests ($0000-$1FFF)
    // ========================================

    #[test]
    fn test_bus_initialization() {
        let mut bus = Bus::new();
        assert_eq!(bus.read(0x0000), 0, "RAM start should be zero");
        assert_eq!(bus.read(0x07FF), 0, "RAM end should be zero");
    }

    #[test]
    fn test_ram_mirroring_all_regions() {
        let mut bus = Bus::new();
        bus.write(0x0123, 0xAB);

        assert_eq!(bus.read(0x0123), 0xAB, "Base RAM");
        assert_eq!(bus.read(0x0923), 0xAB, "First mirror");
        assert_eq!(bus.read(0x1123), 0xAB, "Second mirror");
        assert_eq!(bus.read(0x1923), 0xAB, "Third mirror");
    }

    #[test]
    fn test_ram_mirroring_bidirectional() {
        let mut bus = Bus::new();
        bus.write(0x1500, 0xAA);
        assert_eq!(bus.read(0x0500), 0xAA, "Mirror write should affect base RAM");
    }

    // ========================================
    // PPU Register Tests ($2000-$3FFF)
    // ========================================

    #[test]
    fn test_ppu_register_mirroring() {
        let mut bus = Bus::new();
        bus.write(0x3456, 0x21); // $2006
        bus.write(0x200E, 0x08); // $2006
        assert_eq!(bus.ppu.v(), 0x2108);
    }

    #[test]
    fn test_ppu_status_read_through_bus() {
        let mut bus = Bus::new();
        bus.ppu.do_vblank();
        assert_eq!(bus.read(0x2002) & 0x80, 0x80);
        assert_eq!(bus.read(0x2002) & 0x80, 0x00, "VBlank cleared by the first read");
    }

    // ========================================
    // APU / IO Tests
    // ========================================

    #[test]
    fn test_io_test_region_reads_zero() {
        let mut bus = Bus::new();
        bus.write(0x4018, 0xFF);
        for addr in 0x4018..=0x401F {
            assert_eq!(bus.read(addr), 0);
        }
    }

    #[test]
    fn test_controller_ports() {
        let mut bus = Bus::new();
        let mut pad = StandardController::new();
        pad.button_a = true;
        bus.set_controller(Port::One, Box::new(pad));

        bus.write(0x4016, 1);
        bus.write(0x4016, 0);

        assert_eq!(bus.read(0x4016), 0x41, "A pressed");
        assert_eq!(bus.read(0x4016), 0x40, "B released");
        assert_eq!(bus.read(0x4017), 0x40, "Nothing in port 2");
    }

    // ========================================
    // Cartridge Tests ($4020-$FFFF)
    // ========================================

    #[test]
    fn test_empty_cartridge_reads_zero() {
        let mut bus = Bus::new();
        assert_eq!(bus.read(0x8000), 0);
        assert_eq!(bus.read(0xFFFF), 0);
        bus.write(0x8000, 0x12);
        assert_eq!(bus.read(0x8000), 0);
    }

    #[test]
    fn test_cartridge_routing() {
        let mut prg = vec![0; 0x8000];
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        let cart = Nrom::new(prg, Vec::new(), Mirroring::Vertical);
        let mut bus = Bus::with_cartridge(Box::new(cart));

        assert_eq!(bus.read_u16(0xFFFC), 0x8000);
        bus.write(0x6000, 0x77);
        assert_eq!(bus.read(0x6000), 0x77);
    }

    // ========================================
    // OAM DMA Tests
    // ========================================

    #[test]
    fn test_oam_dma_request_is_taken_once() {
        let mut bus = Bus::new();
        assert_eq!(bus.take_dma_request(), None);
        bus.write(0x4014, 0x02);
        assert_eq!(bus.take_dma_request(), Some(0x02));
        assert_eq!(bus.take_dma_request(), None);
    }

    #[test]
    fn test_oam_dma_transfer() {
        let mut bus = Bus::new();
        for i in 0..256u16 {
            bus.write(0x0300 + i, i as u8);
        }

        bus.run_oam_dma(0x03);

        for i in 0..256usize {
            assert_eq!(bus.ppu.oam()[i], i as u8);
        }
    }

    #[test]
    fn test_oam_dma_starts_at_oamaddr() {
        let mut bus = Bus::new();
        bus.write(0x0200, 0xAA);
        bus.write(0x2003, 0x10);

        bus.run_oam_dma(0x02);

        assert_eq!(bus.ppu.oam()[0x10], 0xAA);
    }

    #[test]
    fn test_reset_preserves_ram() {
        let mut bus = Bus::new();
        bus.write(0x0042, 0x99);
        bus.reset();
        assert_eq!(bus.read(0x0042), 0x99);
        bus.power_on();
        assert_eq!(bus.read(0x0042), 0x00);
    }
}

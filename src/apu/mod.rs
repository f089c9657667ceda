// APU module - Audio Processing Unit interface
//
// Sound synthesis is provided by the host. The core only clocks the APU with
// elapsed CPU cycles, routes its registers, and samples its IRQ line.

/// Trait for the audio processing unit
///
/// Register addresses are CPU addresses ($4000-$4013, $4015, $4017).
pub trait Apu {
    /// Advance audio state by `count` CPU cycles
    fn do_cycles(&mut self, count: u32);

    /// Read an APU register (only $4015 is readable on hardware)
    fn read_register(&mut self, addr: u16) -> u8;

    /// Write an APU register
    fn write_register(&mut self, addr: u16, data: u8);

    /// Level of the APU IRQ line (frame counter or DMC)
    fn irq_pending(&self) -> bool {
        false
    }
}

/// An APU that produces no sound
///
/// Keeps a count of elapsed cycles and remembers the last value written to
/// each register so the register traffic of a program can be inspected.
#[derive(Debug, Clone)]
pub struct SilentApu {
    /// Total CPU cycles this APU has been clocked for
    cycles: u64,
    /// Last value written to $4000-$4017
    registers: [u8; 0x18],
}

impl SilentApu {
    /// Create a new silent APU
    pub fn new() -> Self {
        SilentApu {
            cycles: 0,
            registers: [0; 0x18],
        }
    }

    /// Total CPU cycles observed
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Last value written to a register, if the address is an APU register
    pub fn last_write(&self, addr: u16) -> Option<u8> {
        match addr {
            0x4000..=0x4017 => Some(self.registers[(addr - 0x4000) as usize]),
            _ => None,
        }
    }
}

impl Default for SilentApu {
    fn default() -> Self {
        Self::new()
    }
}

impl Apu for SilentApu {
    fn do_cycles(&mut self, count: u32) {
        self.cycles = self.cycles.wrapping_add(count as u64);
    }

    fn read_register(&mut self, _addr: u16) -> u8 {
        0
    }

    fn write_register(&mut self, addr: u16, data: u8) {
        if let 0x4000..=0x4017 = addr {
            self.registers[(addr - 0x4000) as usize] = data;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_apu_counts_cycles() {
        let mut apu = SilentApu::new();
        apu.do_cycles(7);
        apu.do_cycles(513);
        assert_eq!(apu.cycles(), 520);
    }

    #[test]
    fn test_silent_apu_records_writes() {
        let mut apu = SilentApu::new();
        apu.write_register(0x4015, 0x0F);
        assert_eq!(apu.last_write(0x4015), Some(0x0F));
        assert_eq!(apu.last_write(0x4018), None);
        assert_eq!(apu.read_register(0x4015), 0);
        assert!(!apu.irq_pending());
    }
}

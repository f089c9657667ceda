// Register transfer instructions for 6502 CPU
//
// All update Zero and Negative except TXS.

use crate::cpu::Cpu;

impl Cpu {
    /// TAX - Transfer Accumulator to X
    pub fn tax(&mut self) {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TAY - Transfer Accumulator to Y
    pub fn tay(&mut self) {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
    }

    /// TXA - Transfer X to Accumulator
    pub fn txa(&mut self) {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TYA - Transfer Y to Accumulator
    pub fn tya(&mut self) {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TSX - Transfer Stack Pointer to X
    pub fn tsx(&mut self) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TXS - Transfer X to Stack Pointer (no flags)
    pub fn txs(&mut self) {
        self.sp = self.x;
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::Cpu;

    #[test]
    fn test_transfers() {
        let mut cpu = Cpu::new();
        cpu.a = 0x80;

        cpu.tax();
        assert_eq!(cpu.x, 0x80);
        assert!(cpu.get_negative());

        cpu.tay();
        assert_eq!(cpu.y, 0x80);

        cpu.x = 0x00;
        cpu.txa();
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_zero());

        cpu.tya();
        assert_eq!(cpu.a, 0x80);
    }

    #[test]
    fn test_txs_does_not_touch_flags() {
        let mut cpu = Cpu::new();
        cpu.x = 0x00;
        cpu.status = 0x24;

        cpu.txs();

        assert_eq!(cpu.sp, 0x00);
        assert_eq!(cpu.status, 0x24);

        cpu.tsx();
        assert!(cpu.get_zero());
    }
}

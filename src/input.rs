// Input module - Controller port interface
//
// The console talks to each controller port through a 1-bit serial
// protocol: writing bit 0 of $4016 drives the strobe line, and every read of
// $4016/$4017 shifts out the next button bit.

use std::cell::RefCell;
use std::rc::Rc;

/// Trait for devices plugged into a controller port
pub trait Controller {
    /// Read the next bit
    ///
    /// Bit 0 carries the data; the upper bits reflect open bus ($40 on a
    /// front-loading console).
    fn read(&mut self) -> u8;

    /// Write the strobe latch (only bit 0 is meaningful)
    fn write(&mut self, data: u8);
}

/// Open-bus bits returned alongside the data bit
const OPEN_BUS: u8 = 0x40;

/// Standard 8-button controller
///
/// Button order on the wire: A, B, Select, Start, Up, Down, Left, Right.
/// After eight reads the shift register returns 1s.
#[derive(Debug, Clone, Default)]
pub struct StandardController {
    pub button_a: bool,
    pub button_b: bool,
    pub select: bool,
    pub start: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,

    // Serial state
    strobe: bool,
    shift: u8,
}

impl StandardController {
    /// Create a controller with all buttons released
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack the buttons into the byte the shift register loads
    pub fn buttons(&self) -> u8 {
        (self.button_a as u8)
            | (self.button_b as u8) << 1
            | (self.select as u8) << 2
            | (self.start as u8) << 3
            | (self.up as u8) << 4
            | (self.down as u8) << 5
            | (self.left as u8) << 6
            | (self.right as u8) << 7
    }

    /// Set all buttons from a packed byte (same bit order as [`Self::buttons`])
    pub fn set_buttons(&mut self, state: u8) {
        self.button_a = state & 0x01 != 0;
        self.button_b = state & 0x02 != 0;
        self.select = state & 0x04 != 0;
        self.start = state & 0x08 != 0;
        self.up = state & 0x10 != 0;
        self.down = state & 0x20 != 0;
        self.left = state & 0x40 != 0;
        self.right = state & 0x80 != 0;
    }
}

impl Controller for StandardController {
    fn read(&mut self) -> u8 {
        if self.strobe {
            // While strobe is high the register keeps reloading; reads see A
            return OPEN_BUS | self.button_a as u8;
        }

        let bit = self.shift & 0x01;
        self.shift = (self.shift >> 1) | 0x80;
        OPEN_BUS | bit
    }

    fn write(&mut self, data: u8) {
        let strobe = data & 0x01 != 0;
        if self.strobe && !strobe {
            self.shift = self.buttons();
        }
        self.strobe = strobe;
        if strobe {
            self.shift = self.buttons();
        }
    }
}

/// A controller shared with the host
///
/// The host keeps a clone of the `Rc` and updates the buttons between
/// frames while the bus owns the other handle.
impl<C: Controller + ?Sized> Controller for Rc<RefCell<C>> {
    fn read(&mut self) -> u8 {
        self.borrow_mut().read()
    }

    fn write(&mut self, data: u8) {
        self.borrow_mut().write(data);
    }
}

/// An empty controller port (reads open bus with data bit 0)
#[derive(Debug, Clone, Copy, Default)]
pub struct Unplugged;

impl Controller for Unplugged {
    fn read(&mut self) -> u8 {
        OPEN_BUS
    }

    fn write(&mut self, _data: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latch(controller: &mut StandardController) {
        controller.write(1);
        controller.write(0);
    }

    #[test]
    fn test_controller_initialization() {
        let controller = StandardController::new();
        assert!(!controller.button_a);
        assert!(!controller.start);
        assert_eq!(controller.buttons(), 0);
    }

    #[test]
    fn test_serial_read_order() {
        let mut controller = StandardController::new();
        controller.button_a = true;
        controller.start = true;
        controller.right = true;
        latch(&mut controller);

        let bits: Vec<u8> = (0..8).map(|_| controller.read() & 1).collect();
        assert_eq!(bits, vec![1, 0, 0, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn test_reads_after_eight_return_one() {
        let mut controller = StandardController::new();
        latch(&mut controller);
        for _ in 0..8 {
            controller.read();
        }
        assert_eq!(controller.read(), 0x41);
    }

    #[test]
    fn test_strobe_high_returns_button_a() {
        let mut controller = StandardController::new();
        controller.button_a = true;
        controller.write(1);
        assert_eq!(controller.read(), 0x41);
        assert_eq!(controller.read(), 0x41);
    }

    #[test]
    fn test_set_buttons_roundtrip() {
        let mut controller = StandardController::new();
        controller.set_buttons(0b1010_0101);
        assert!(controller.button_a);
        assert!(controller.select);
        assert!(controller.down);
        assert!(controller.right);
        assert!(!controller.button_b);
        assert!(!controller.start);
        assert!(!controller.up);
        assert!(!controller.left);
        assert_eq!(controller.buttons(), 0b1010_0101);
    }

    #[test]
    fn test_unplugged_port() {
        let mut port = Unplugged;
        port.write(1);
        assert_eq!(port.read(), 0x40);
    }

    #[test]
    fn test_shared_controller_sees_host_updates() {
        let shared = Rc::new(RefCell::new(StandardController::new()));
        let mut port: Box<dyn Controller> = Box::new(Rc::clone(&shared));

        shared.borrow_mut().button_b = true;
        port.write(1);
        port.write(0);

        assert_eq!(port.read() & 1, 0);
        assert_eq!(port.read() & 1, 1);
    }
}

use core::convert::Infallible;
use gamepad_core::{DigitalPins, Direction, Level, PinId};
use rp_pico::hal::pac;

/// GPIO function select value that hands a pin to SIO.
const FUNCSEL_SIO: u8 = 5;

/// Whole-bank GPIO access through the SIO registers.
///
/// Create it after `rp_pico::Pins::new` has taken IO_BANK0 and PADS_BANK0
/// out of reset. From then on this type is the only user of those blocks.
pub struct SioBank {
    _private: (),
}

impl SioBank {
    /// # Safety
    /// No other code may touch SIO GPIO, IO_BANK0 or PADS_BANK0 registers
    /// while the bank exists.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }

    fn sio(&self) -> &pac::sio::RegisterBlock {
        // SAFETY: exclusive access per `new`'s contract.
        unsafe { &*pac::SIO::ptr() }
    }

    fn pads(&self) -> &pac::pads_bank0::RegisterBlock {
        // SAFETY: exclusive access per `new`'s contract.
        unsafe { &*pac::PADS_BANK0::ptr() }
    }

    fn io(&self) -> &pac::io_bank0::RegisterBlock {
        // SAFETY: exclusive access per `new`'s contract.
        unsafe { &*pac::IO_BANK0::ptr() }
    }
}

impl DigitalPins for SioBank {
    type Error = Infallible;

    fn read_all(&mut self) -> Result<u32, Infallible> {
        Ok(self.sio().gpio_in().read().bits())
    }

    fn write_pin(&mut self, pin: PinId, level: Level) {
        let mask = 1u32 << pin;
        match level {
            Level::High => self.sio().gpio_out_set().write(|w| unsafe { w.bits(mask) }),
            Level::Low => self.sio().gpio_out_clr().write(|w| unsafe { w.bits(mask) }),
        };
    }

    fn set_direction(&mut self, pin: PinId, direction: Direction) {
        let mask = 1u32 << pin;
        self.io()
            .gpio(pin as usize)
            .gpio_ctrl()
            .write(|w| unsafe { w.funcsel().bits(FUNCSEL_SIO) });

        match direction {
            Direction::Input => {
                self.pads()
                    .gpio(pin as usize)
                    .modify(|_, w| w.ie().set_bit().od().clear_bit());
                self.sio().gpio_oe_clr().write(|w| unsafe { w.bits(mask) });
            }
            Direction::Output => {
                self.pads()
                    .gpio(pin as usize)
                    .modify(|_, w| w.ie().clear_bit().od().clear_bit());
                self.sio().gpio_oe_set().write(|w| unsafe { w.bits(mask) });
            }
        };
    }

    fn enable_pull_up(&mut self, pin: PinId) {
        self.pads()
            .gpio(pin as usize)
            .modify(|_, w| w.pue().set_bit().pde().clear_bit());
    }
}

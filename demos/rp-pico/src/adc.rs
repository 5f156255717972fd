use gamepad_core::AnalogueConverter;
use rp_pico::hal::pac;

/// The converter flagged an error on the last conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionError;

/// Single-shot conversions on the RP2040 ADC, channel picked at run time.
pub struct OneShotAdc {
    adc: pac::ADC,
}

impl OneShotAdc {
    /// Takes an ADC that is out of reset and enabled, e.g. from
    /// `rp_pico::hal::Adc::new(..).free()`. Also powers the temperature sensor.
    pub fn new(adc: pac::ADC) -> Self {
        adc.cs().modify(|_, w| w.ts_en().set_bit());
        Self { adc }
    }
}

impl AnalogueConverter for OneShotAdc {
    type Error = ConversionError;

    fn select_channel(&mut self, channel: u8) {
        self.adc.cs().modify(|_, w| unsafe { w.ainsel().bits(channel) });
    }

    fn read(&mut self) -> Result<u16, ConversionError> {
        self.adc.cs().modify(|_, w| w.start_once().set_bit());
        while self.adc.cs().read().ready().bit_is_clear() {}

        if self.adc.cs().read().err().bit_is_set() {
            return Err(ConversionError);
        }
        Ok(self.adc.result().read().result().bits())
    }
}

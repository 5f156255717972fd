#![no_std]
#![no_main]

use cortex_m::delay::Delay;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{Adc, Clock, Sio, Timer, clocks::init_clocks_and_plls, pac, watchdog::Watchdog};
use rtt_target::{rprintln, rtt_init_print};

use rp_pico_demos::adc::OneShotAdc;
use rp_pico_demos::sio_bank::SioBank;
use rp_pico_demos::time::HardwareTimer;

use gamepad_core::{
    DeviceEvent, FightStickEngine, GamepadSnapshot, ReportChain, ReportSink, fight_stick,
};

/// Main loop period. Well under the 4 ms debounce window.
pub const CYCLE_PERIOD_US: u32 = 1_000;

/// Pretend device status change after this many cycles.
pub const MOUNT_AFTER_CYCLES: u32 = 3_000;

/// Stand-in for a USB HID stack: prints each report over RTT.
struct RttReports;

impl ReportSink<4> for RttReports {
    type Error = core::convert::Infallible;

    fn is_ready(&self) -> bool {
        true
    }

    fn submit(&mut self, report_id: u8, snapshot: &GamepadSnapshot<4>) -> Result<(), Self::Error> {
        rprintln!(
            "report {}: buttons={:#07x} dpad={:#03x} axes={:?}",
            report_id,
            snapshot.buttons,
            snapshot.dpad,
            snapshot.axes
        );
        Ok(())
    }
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== RP Pico Fight Stick Demo ===");

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // Bring IO_BANK0 and PADS_BANK0 out of reset, then drive them raw
    let sio = Sio::new(pac.SIO);
    let _pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    let bank = unsafe { SioBank::new() };

    let adc = OneShotAdc::new(Adc::new(pac.ADC, &mut pac.RESETS).free());

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let time_source = HardwareTimer::new(timer);

    let topology = fight_stick().unwrap();
    let mut engine = FightStickEngine::new(&topology, bank, adc, &time_source);
    engine.init().unwrap();

    rprintln!(
        "{} switches, {} pots, heartbeat on GPIO25",
        topology.digital().len(),
        topology.analogue().len()
    );

    let chain = ReportChain::new(1, 1);
    let mut reports = RttReports;
    let mut delay = Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());
    let mut cycles: u32 = 0;

    loop {
        cycles = cycles.wrapping_add(1);
        if cycles == MOUNT_AFTER_CYCLES {
            let status = engine.handle_event(DeviceEvent::Mounted);
            rprintln!("device status: {:?}", status);
        }

        match engine.cycle() {
            Ok(summary) if summary.changed => {
                let snapshot = engine.snapshot::<4>();
                let mut next = Some(chain.start());
                while let Some(id) = next {
                    let _ = chain.pump(&mut reports, id, &snapshot);
                    next = chain.on_complete(id);
                }
            }
            Ok(_) => {}
            Err(error) => {
                rprintln!("engine stopped: {}", error);
                break;
            }
        }

        delay.delay_us(CYCLE_PERIOD_US);
    }

    loop {
        cortex_m::asm::wfi();
    }
}

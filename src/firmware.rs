use defmt_rtt as _;
use panic_probe as _;

use analog_face::RepaintTimer;
use fugit::MillisDurationU32;
use rp_pico::hal::timer::{Alarm, Alarm0, ScheduleAlarmError};

/// Alarm 0 as the face's repaint timer.
pub struct PicoAlarm(Alarm0);

impl PicoAlarm {
    pub fn clear_interrupt(&mut self) {
        self.0.clear_interrupt();
    }
}

impl RepaintTimer for PicoAlarm {
    type Error = ScheduleAlarmError;

    fn schedule(&mut self, delay: MillisDurationU32) -> Result<(), Self::Error> {
        self.0.schedule(delay.convert())
    }

    fn cancel(&mut self) -> Result<(), Self::Error> {
        self.0.cancel()
    }
}

#[rtic::app(device = rp_pico::hal::pac, peripherals = true, dispatchers = [I2C0_IRQ])]
mod app {
    use super::PicoAlarm;
    use analog_face::{
        display::LedMatrix, ClockState, ClockWidget, FaceConfig, Monochrome, WidgetError,
    };
    use embedded_graphics::prelude::{OriginDimensions, Size};
    use embedded_hal::digital::v2::{InputPin, ToggleableOutputPin};
    use max7219::MAX7219;
    use rtic::mutex_prelude::*;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::{ExtU32, RateExtU32},
        gpio::{bank0::Gpio15, FunctionSio, Interrupt, Pin, PullUp, SioInput},
        sio::Sio,
        spi::Spi,
        timer::{Alarm, Alarm1, Timer},
        watchdog::Watchdog,
    };

    const EXTERNAL_XTAL_FREQ_HZ: u32 = 12_000_000;
    /// Time shown until the button is used to set the clock.
    const INITIAL_TIME: (u8, u8, u8) = (12, 34, 56);
    const LED_INTENSITY: u8 = 0x0;
    /// First auto-repeat delay of the set button, in microseconds.
    const REPEAT_START_US: u32 = 500_000;
    const REPEAT_FLOOR_US: u32 = 20_000;

    type Spi0 = Spi<
        rp_pico::hal::spi::Enabled,
        rp_pico::hal::pac::SPI0,
        (
            Pin<rp_pico::hal::gpio::bank0::Gpio19, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>,
            Pin<rp_pico::hal::gpio::bank0::Gpio16, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>,
            Pin<rp_pico::hal::gpio::bank0::Gpio18, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>,
        ),
    >;
    type CsPin = Pin<
        rp_pico::hal::gpio::bank0::Gpio17,
        rp_pico::hal::gpio::FunctionSio<rp_pico::hal::gpio::SioOutput>,
        rp_pico::hal::gpio::PullDown,
    >;
    type LedPin = Pin<
        rp_pico::hal::gpio::bank0::Gpio25,
        rp_pico::hal::gpio::FunctionSio<rp_pico::hal::gpio::SioOutput>,
        rp_pico::hal::gpio::PullDown,
    >;
    type DisplayType = MAX7219<max7219::connectors::SpiConnectorSW<Spi0, CsPin>>;

    #[shared]
    struct Shared {
        clock: ClockState,
        widget: ClockWidget<PicoAlarm>,
        button: Pin<Gpio15, FunctionSio<SioInput>, PullUp>,
        alarm1: Alarm1,
        repeat_delay: u32,
    }

    #[local]
    struct Local {
        display: DisplayType,
        frame: LedMatrix,
        led: LedPin,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("analog face starting");

        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = init_clocks_and_plls(
            EXTERNAL_XTAL_FREQ_HZ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = timer.alarm_0().unwrap();
        alarm.enable_interrupt();

        let mut alarm1 = timer.alarm_1().unwrap();
        alarm1.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();
        let button = pins.gpio15.into_pull_up_input();
        button.set_interrupt_enabled(Interrupt::EdgeLow, true);

        let mosi = pins.gpio19.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let sck = pins.gpio18.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let miso = pins.gpio16.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            2_000_000u32.Hz(),
            &embedded_hal::spi::MODE_0,
        );

        let mut display = MAX7219::from_spi_cs(analog_face::display::DEVICES, spi, cs).unwrap();
        display.power_on().unwrap();
        for i in 0..analog_face::display::DEVICES {
            display.set_intensity(i, LED_INTENSITY).unwrap();
            display.clear_display(i).unwrap();
        }

        let frame = LedMatrix::new();
        let config = FaceConfig {
            numeral_font: None,
            ..FaceConfig::compact()
        };
        let size: Size = frame.size();
        let widget = ClockWidget::attach(config, size, PicoAlarm(alarm));

        // The first frame starts the 1 Hz repaint loop.
        redraw::spawn().ok();

        let (hours, mins, secs) = INITIAL_TIME;
        (
            Shared {
                clock: ClockState::new(hours, mins, secs),
                widget,
                button,
                alarm1,
                repeat_delay: REPEAT_START_US,
            },
            Local {
                display,
                frame,
                led,
            },
            init::Monotonics(),
        )
    }

    /// Repaint requested by the face one second after the previous frame.
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [clock, widget], local = [led])]
    fn repaint_due(mut ctx: repaint_due::Context) {
        ctx.shared
            .widget
            .lock(|w| w.repaint_mut().timer_mut().clear_interrupt());
        ctx.local.led.toggle().ok();

        ctx.shared.clock.lock(|c| c.tick());

        redraw::spawn().ok();
    }

    #[task(binds = IO_IRQ_BANK0, priority = 1, shared = [clock, button, alarm1, repeat_delay])]
    fn button_press(mut ctx: button_press::Context) {
        // Masked until released so contact bounce does not re-enter.
        ctx.shared.button.lock(|b| {
            b.set_interrupt_enabled(Interrupt::EdgeLow, false);
            b.clear_interrupt(Interrupt::EdgeLow);
        });

        ctx.shared.clock.lock(|c| c.add_minute());

        ctx.shared.repeat_delay.lock(|d| *d = REPEAT_START_US);
        ctx.shared.alarm1.lock(|a| {
            a.clear_interrupt();
            a.schedule(REPEAT_START_US.micros()).ok();
        });
    }

    #[task(binds = TIMER_IRQ_1, priority = 1, shared = [clock, button, alarm1, repeat_delay])]
    fn button_repeat(mut ctx: button_repeat::Context) {
        ctx.shared.alarm1.lock(|a| a.clear_interrupt());

        let is_held = ctx.shared.button.lock(|b| b.is_low().unwrap_or(false));

        if is_held {
            ctx.shared.clock.lock(|c| c.add_minute());

            // Each repeat comes 20% sooner, down to the floor.
            let delay = ctx.shared.repeat_delay.lock(|d| {
                *d = ((*d as u64 * 8 / 10) as u32).max(REPEAT_FLOOR_US);
                *d
            });

            ctx.shared.alarm1.lock(|a| {
                a.schedule(delay.micros()).ok();
            });
        } else {
            ctx.shared.button.lock(|b| {
                b.clear_interrupt(Interrupt::EdgeLow);
                b.set_interrupt_enabled(Interrupt::EdgeLow, true);
            });
        }
    }

    #[task(shared = [clock, widget], local = [display, frame])]
    fn redraw(ctx: redraw::Context) {
        let frame = ctx.local.frame;
        let clock = ctx.shared.clock;
        let widget = ctx.shared.widget;

        let drawn = (clock, widget).lock(|clock, widget| {
            widget.draw(&mut *frame, &Monochrome, &*clock)
        });
        match drawn {
            Ok(()) => {}
            Err(WidgetError::Draw(never)) => match never {},
            Err(WidgetError::Schedule(_)) => defmt::warn!("next repaint could not be scheduled"),
        }

        let display = ctx.local.display;
        for (dev_idx, buffer) in frame.device_buffers().iter().enumerate() {
            if display.write_raw(dev_idx, buffer).is_err() {
                defmt::warn!("write to device {} failed", dev_idx);
            }
        }
    }
}

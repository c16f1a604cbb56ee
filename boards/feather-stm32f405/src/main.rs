#![deny(unsafe_code)]
#![deny(warnings)]
#![no_main]
#![no_std]

use defmt_rtt as _; // global logger
use panic_probe as _;
use rtic::app;
use rtic_monotonics::stm32::prelude::*;

mod config;
mod sensors;
mod serial;
mod time;

stm32_tim2_monotonic!(Mono, 1_000_000);

#[app(device = embassy_stm32, peripherals = true, dispatchers = [USART1, USART2])]
mod app {
    use super::*;
    use defmt::{debug, error, info, warn};
    use embassy_stm32::gpio::{Level, Output, Speed};
    use embassy_stm32::i2c::I2c;
    use embassy_stm32::peripherals;
    use embassy_stm32::rtc::{Rtc, RtcConfig};
    use embassy_stm32::time::Hertz;
    use embassy_stm32::usart::{self, UartTx};
    use embassy_time::Delay;
    use sht31::prelude::*;

    use nightwatch_core::event::EventRecord;
    use nightwatch_core::monitor::{LightTransition, Monitor, MonitorConfig};

    use sensors::LightSensor;
    use serial::EventConsole;

    type RtcPeripheral = embassy_stm32::Peri<'static, peripherals::RTC>;
    type AdcPeripheral = embassy_stm32::Peri<'static, peripherals::ADC1>;
    type PinPA4 = embassy_stm32::Peri<'static, peripherals::PA4>;
    type I2cPeripheral = embassy_stm32::Peri<'static, peripherals::I2C1>;
    type PinPB6 = embassy_stm32::Peri<'static, peripherals::PB6>;
    type PinPB7 = embassy_stm32::Peri<'static, peripherals::PB7>;
    type UsartPeripheral = embassy_stm32::Peri<'static, peripherals::USART3>;
    type PinPB10 = embassy_stm32::Peri<'static, peripherals::PB10>;

    struct MonitorPeripherals {
        rtc: RtcPeripheral,
        adc: AdcPeripheral,
        light_pin: PinPA4,
        i2c: I2cPeripheral,
        scl: PinPB6,
        sda: PinPB7,
        usart: UsartPeripheral,
        tx_pin: PinPB10,
    }

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        led: Output<'static>,
    }

    #[init]
    fn init(_cx: init::Context) -> (Shared, Local) {
        info!(
            "nightwatch starting (built at unix {})",
            time::build_unix_time()
        );

        // Adafruit Feather STM32F405: 12 MHz HSE, 32.768 kHz LSE (PC14/PC15)
        let mut config = embassy_stm32::Config::default();
        config.rcc.hse = Some(embassy_stm32::rcc::Hse {
            freq: Hertz(12_000_000),
            mode: embassy_stm32::rcc::HseMode::Oscillator,
        });

        // HSE (12 MHz) / PREDIV(6) = 2 MHz (PLL input)
        // 2 MHz * MUL(168) = 336 MHz (VCO)
        // VCO / DIVP(4) = 84 MHz (SYSCLK)
        // VCO / DIVQ(7) = 48 MHz (USB clock, unused)
        config.rcc.pll_src = embassy_stm32::rcc::PllSource::HSE;
        config.rcc.pll = Some(embassy_stm32::rcc::Pll {
            prediv: embassy_stm32::rcc::PllPreDiv::DIV6,
            mul: embassy_stm32::rcc::PllMul::MUL168,
            divp: Some(embassy_stm32::rcc::PllPDiv::DIV4),
            divq: Some(embassy_stm32::rcc::PllQDiv::DIV7),
            divr: None,
        });
        config.rcc.sys = embassy_stm32::rcc::Sysclk::PLL1_P;
        config.rcc.ahb_pre = embassy_stm32::rcc::AHBPrescaler::DIV1; // 84 MHz
        config.rcc.apb1_pre = embassy_stm32::rcc::APBPrescaler::DIV2; // 42 MHz
        config.rcc.apb2_pre = embassy_stm32::rcc::APBPrescaler::DIV1; // 84 MHz

        // LSE drives the RTC so it keeps time on VBAT across power loss
        config.rcc.ls = embassy_stm32::rcc::LsConfig {
            rtc: embassy_stm32::rcc::RtcClockSource::LSE,
            lsi: false,
            lse: Some(embassy_stm32::rcc::LseConfig {
                frequency: Hertz(32_768),
                mode: embassy_stm32::rcc::LseMode::Oscillator(
                    embassy_stm32::rcc::LseDrive::MediumHigh,
                ),
            }),
        };

        let p = embassy_stm32::init(config);
        info!("System initialized with HSE (12MHz) and LSE (32.768kHz)");

        // TIM2 on APB1: timer clock = 2*APB1 when prescaler != 1
        // APB1 = 42 MHz, TIM2 = 84 MHz
        let timer_clock_hz = 84_000_000;
        Mono::start(timer_clock_hz);
        info!("TIM2 monotonic timer initialized at 1 MHz");

        let led = Output::new(p.PC1, Level::High, Speed::Low);

        let periph = MonitorPeripherals {
            rtc: p.RTC,
            adc: p.ADC1,
            light_pin: p.PA4,
            i2c: p.I2C1,
            scl: p.PB6,
            sda: p.PB7,
            usart: p.USART3,
            tx_pin: p.PB10,
        };

        heartbeat::spawn().ok();
        monitor::spawn(periph).ok();

        (Shared {}, Local { led })
    }

    /// Heartbeat task
    #[task(priority = 1, local = [led])]
    async fn heartbeat(cx: heartbeat::Context) {
        info!("Heartbeat task started");
        loop {
            cx.local.led.set_high();
            Mono::delay(100.millis()).await;
            cx.local.led.set_low();
            Mono::delay(4900.millis()).await;
        }
    }

    /// Monitoring task - owns the clock, both sensors, the console,
    /// and all loop state.
    ///
    /// Sensor init failures are reported once and accepted; the device
    /// then runs degraded indefinitely. Each elapsed poll interval is
    /// itself the retry.
    #[task(priority = 1)]
    async fn monitor(_cx: monitor::Context, periph: MonitorPeripherals) -> ! {
        info!("Monitor task started");

        let uart = UartTx::new_blocking(periph.usart, periph.tx_pin, serial_config())
            .expect("valid UART config");
        let mut console = EventConsole::new(uart);

        let rtc = Rtc::new(periph.rtc, RtcConfig::default());
        if time::initialize_rtc(rtc).is_err() {
            error!("RTC failed");
            console.write_line("RTC failed");
        }

        let mut light = LightSensor::new(periph.adc, periph.light_pin);

        let i2c = I2c::new_blocking(
            periph.i2c,
            periph.scl,
            periph.sda,
            Hertz(100_000),
            Default::default(),
        );
        let mut climate = SHT31::new(i2c, Delay);
        // Probe read; the driver has no separate presence check
        if climate.read().is_err() {
            error!("Temp sensor failed");
            console.write_line("Temp sensor failed");
        }

        let mut monitor = Monitor::new(MonitorConfig::default());
        info!("Monitoring ready");

        loop {
            let now = time::now_or_epoch();
            let elapsed_ms = Mono::now().duration_since_epoch().to_millis() as u32;

            let due = monitor.tick(now.time_of_day(), elapsed_ms);

            if due.light {
                let level = light.read_percent();
                if let Some(transition) = monitor.observe_light(level) {
                    let record = EventRecord::Lights {
                        on: transition == LightTransition::On,
                        time: now.timestamp(),
                    };
                    emit(&mut console, &record);
                }
            }

            if due.temperature {
                match climate.read() {
                    Ok(reading) => {
                        debug!("humidity {}%", reading.humidity);
                        let record = EventRecord::Temperature {
                            celsius: reading.temperature,
                            time: now.timestamp(),
                        };
                        emit(&mut console, &record);
                    }
                    // A fault is not a reading: log it, emit nothing
                    // this interval, try again next interval
                    Err(_) => warn!("Temp sensor read failed"),
                }
            }

            Mono::delay(config::MONITOR_TICK_MS.millis()).await;
        }
    }

    fn serial_config() -> usart::Config {
        let mut cfg = usart::Config::default();
        cfg.baudrate = config::SERIAL_BAUD;
        cfg
    }

    fn emit(console: &mut EventConsole, record: &EventRecord) {
        match record.json() {
            Ok(payload) => console.write_line(&payload),
            Err(_) => warn!("event payload overflow, record dropped"),
        }
    }

    /// RTIC idle task - WFI sleep mode when no tasks active
    #[idle]
    fn idle(_cx: idle::Context) -> ! {
        info!("Idle task started - entering WFI loop");
        loop {
            cortex_m::asm::wfi();
        }
    }
}

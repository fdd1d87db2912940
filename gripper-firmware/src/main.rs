//! EPM Gripper Firmware
//!
//! Firmware for the electro-permanent magnet gripper controller
//! (STM32F042K6). Charges a capacitor bank and discharges it through a
//! thyristor bridge to switch the magnet, driven by bus commands, a push
//! button or an RC PWM input.

#![no_std]
#![no_main]

mod board;
mod bus;
mod channels;
mod config;
mod controller;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{self, Adc, AdcChannel};
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::peripherals::ADC1;
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_stm32::bind_interrupts;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use gripper_core::input::PwmDecoder;
use gripper_core::magnet::MagnetSequencer;
use gripper_core::status::Indicator;
use gripper_drivers::bridge::{ThyristorBridge, DEFAULT_GATE_PULSE_US};
use gripper_drivers::charger::{FlybackChargerProvider, FlybackHardware};
use gripper_drivers::led::StatusLed;
use gripper_hal_stm32f0::{GateOutput, IwdgWatchdog, SwitchInput};
use gripper_protocol::{CommandHandler, StatusPublisher};

use crate::board::{EmbassyClock, WATCHDOG_TIMEOUT_US};
use crate::channels::{CAP_SAMPLE, SUPPLY_SAMPLE};
use crate::controller::Controller;

bind_interrupts!(struct Irqs {
    ADC1 => adc::InterruptHandler<ADC1>;
    EXTI0_1 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI0_1>;
});

fn gate(pin: Output<'static>) -> GateOutput<'static> {
    GateOutput::new(pin)
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("EPM gripper firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Hardpoint id: config override, else DIP switches
    let dip = [
        SwitchInput::new(Input::new(p.PB3, Pull::Up)),
        SwitchInput::new(Input::new(p.PB4, Pull::Up)),
    ];
    let hardpoint_id = match config.hardpoint_id {
        Some(id) => id,
        None => board::hardpoint_id_from_dip(&dip),
    };
    info!("Hardpoint id {}", hardpoint_id);

    // Voltage sensing
    let adc = Adc::new(p.ADC1, Irqs);
    spawner
        .spawn(tasks::adc_task(
            adc,
            p.PA0.degrade_adc(),
            p.PA1.degrade_adc(),
        ))
        .unwrap();

    // Charger
    let enable = gate(Output::new(p.PA2, Level::Low, Speed::Low));
    let hardware = FlybackHardware::new(
        enable,
        CAP_SAMPLE.reader(),
        SUPPLY_SAMPLE.reader(),
        EmbassyClock,
        &config.charger,
    );
    let charger = FlybackChargerProvider::new(hardware, config.charger);

    // Thyristor bridge
    let gates = [
        gate(Output::new(p.PA4, Level::Low, Speed::High)),
        gate(Output::new(p.PA5, Level::Low, Speed::High)),
        gate(Output::new(p.PA6, Level::Low, Speed::High)),
        gate(Output::new(p.PA7, Level::Low, Speed::High)),
    ];
    let bridge = ThyristorBridge::new(gates, Delay, DEFAULT_GATE_PULSE_US);

    let sequencer = MagnetSequencer::new(
        charger,
        bridge,
        config.sequencer.min_command_interval_ms,
    );
    info!("Magnet sequencer ready (magnet assumed off)");

    // Local inputs
    let button = ExtiInput::new(p.PB1, p.EXTI1, Pull::Up, Irqs);
    spawner.spawn(tasks::button_task(button)).unwrap();

    if config.pwm.enabled {
        let pwm = ExtiInput::new(p.PB0, p.EXTI0, Pull::Down, Irqs);
        spawner
            .spawn(tasks::pwm_input_task(pwm, config.pwm.signal_timeout_ms))
            .unwrap();
    }

    let led = StatusLed::new(
        gate(Output::new(p.PA3, Level::Low, Speed::Low)),
        Indicator::new(config.indicator),
    );

    let watchdog = IwdgWatchdog::start(IndependentWatchdog::new(p.IWDG, WATCHDOG_TIMEOUT_US));
    info!("Watchdog started ({} us)", WATCHDOG_TIMEOUT_US);

    let controller = Controller {
        sequencer,
        handler: CommandHandler::new(hardpoint_id),
        publisher: StatusPublisher::new(hardpoint_id, config.status_period_ms),
        pwm: PwmDecoder::new(config.pwm, config.sequencer.turn_on_cycles),
        led,
        node: bus::LogNode::new(),
        watchdog,
        turn_on_cycles: config.sequencer.turn_on_cycles,
    };

    info!("Entering main loop");
    controller.run().await
}

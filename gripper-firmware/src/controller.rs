//! Cooperative main loop
//!
//! One iteration services the bus, feeds the watchdog, collects commands
//! from every source, advances the magnet sequencer by one tick, refreshes
//! the LED and publishes status when due. Nothing in an iteration blocks;
//! the loop yields to the input tasks between iterations.

use defmt::*;
use embassy_futures::yield_now;
use embassy_time::Instant;

use gripper_core::input::{toggle_command, MagnetCommand, PwmDecoder};
use gripper_core::magnet::PulseEvent;
use gripper_core::status::Health;
use gripper_drivers::led::StatusLed;
use gripper_hal::Watchdog;
use gripper_hal_stm32f0::GateOutput;
use gripper_protocol::{BusNode, CommandHandler, MagnetSnapshot, NodeMode, StatusPublisher};

use crate::board::Sequencer;
use crate::channels::{BUTTON_PRESSED, PWM_PULSE};

/// Where a command came from, for logging
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandSource {
    Bus,
    Button,
    Pwm,
}

/// Main loop state
pub struct Controller<N, W> {
    pub sequencer: Sequencer,
    pub handler: CommandHandler,
    pub publisher: StatusPublisher,
    pub pwm: PwmDecoder,
    pub led: StatusLed<GateOutput<'static>>,
    pub node: N,
    pub watchdog: W,
    /// Cycles used for button presses
    pub turn_on_cycles: u8,
}

impl<N: BusNode, W: Watchdog> Controller<N, W> {
    /// Run the loop forever
    pub async fn run(mut self) -> ! {
        self.node.set_mode(NodeMode::Operational);
        let mut last_health = self.sequencer.health();

        loop {
            let now_ms = Instant::now().as_millis();
            self.step(now_ms);

            let health = self.sequencer.health();
            if health != last_health {
                match health {
                    Health::Ok => info!("Health {} -> {}", last_health, health),
                    Health::Warning => warn!("Health {} -> {}", last_health, health),
                    Health::Error => error!("Health {} -> {}", last_health, health),
                }
                last_health = health;
            }

            yield_now().await;
        }
    }

    fn step(&mut self, now_ms: u64) {
        self.watchdog.feed();

        if let Some(msg) = self.node.spin_once(now_ms) {
            if let Some(command) = self.handler.handle(&msg) {
                if self.execute(command, CommandSource::Bus, now_ms) {
                    self.handler.commit(&msg);
                }
            }
        }

        if BUTTON_PRESSED.try_take().is_some() {
            let command = toggle_command(self.sequencer.is_turned_on(), self.turn_on_cycles);
            self.execute(command, CommandSource::Button, now_ms);
        }

        if let Some(width_us) = PWM_PULSE.try_take() {
            if let Some(command) = self.pwm.update(width_us) {
                if self.execute(command, CommandSource::Pwm, now_ms) {
                    self.pwm.acknowledge(command);
                }
            }
        }

        match self.sequencer.poll() {
            Some(PulseEvent::Completed { polarity, volts }) => {
                debug!(
                    "Pulse {} V {}, counter {}",
                    volts,
                    polarity,
                    self.sequencer.counter()
                );
                if !self.sequencer.is_busy() {
                    info!(
                        "Sequence complete, magnet {}",
                        if self.sequencer.is_turned_on() { "on" } else { "off" }
                    );
                }
            }
            Some(PulseEvent::Failed { flags }) => {
                error!("Charger fault {}, sequence aborted", flags);
            }
            None => {}
        }

        self.led.update(
            now_ms,
            self.sequencer.health(),
            self.sequencer.is_busy(),
        );

        let snapshot = MagnetSnapshot {
            turned_on: self.sequencer.is_turned_on(),
            health: self.sequencer.health(),
            flags: self.sequencer.status_flags(),
        };
        if let Some((hardpoint, node)) =
            self.publisher.poll(now_ms, NodeMode::Operational, snapshot)
        {
            self.node.publish(&hardpoint, &node);
        }
    }

    /// Hand a command to the sequencer; returns whether it was admitted
    ///
    /// Bus and PWM commands are retried on every retransmission until
    /// admitted, so their rejections are logged at debug level.
    fn execute(&mut self, command: MagnetCommand, source: CommandSource, now_ms: u64) -> bool {
        match self.sequencer.apply(command, now_ms) {
            Ok(pulses) => {
                info!("{} from {}: {} pulses", command, source, pulses);
                true
            }
            Err(e) => {
                match source {
                    CommandSource::Button => warn!("{} from {} rejected: {}", command, source, e),
                    CommandSource::Bus | CommandSource::Pwm => {
                        debug!("{} from {} rejected: {}", command, source, e)
                    }
                }
                false
            }
        }
    }
}

//! Magnet sequencer state machine
//!
//! A signed cycle counter carries the whole sequence state:
//!
//! - `0`: idle
//! - `> 0`: turning on, value is the number of on-pulses left
//! - `< 0`: turning off, magnitude is the number of ramp entries left,
//!   counted from the end of [`DEMAGNETIZE_CYCLES`]
//!
//! Each [`MagnetSequencer::poll`] call advances at most one charger pulse by
//! one step and never blocks. The charger is acquired when a pulse starts
//! and released as soon as it reports Done or Error, so at most one charger
//! exists at any time.

use core::cmp::Ordering;

use super::cycles::{
    CycleStep, ALREADY_OFF_SKIP, DEMAGNETIZE_CYCLES, DEMAGNETIZE_LEN, MAX_CYCLES,
    MIN_TURN_ON_CYCLES, TURN_ON_VOLTS,
};
use super::gate::{CommandError, CommandGate};
use crate::input::MagnetCommand;
use crate::status::{ChargerFlags, Health, StatusFlags};
use crate::traits::{ChargeStatus, Charger, ChargerProvider, Polarity, PolarityBridge};

/// Terminal outcome of one pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseEvent {
    /// Capacitor discharged into the coil
    Completed { polarity: Polarity, volts: u16 },
    /// Charger fault, sequence aborted
    Failed { flags: ChargerFlags },
}

/// Decoded view of the cycle counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencePhase {
    Idle,
    TurningOn { remaining: u8 },
    TurningOff { remaining: u8 },
}

/// Non-blocking magnet actuation sequencer
pub struct MagnetSequencer<P: ChargerProvider, B: PolarityBridge> {
    provider: P,
    bridge: B,
    gate: CommandGate,
    /// Signed cycle counter, see module docs
    counter: i16,
    /// Charger for the pulse in flight
    charger: Option<P::Charger>,
    /// Pole state, `true` while the magnet is on
    turned_on: bool,
    health: Health,
    /// Latched flags from the most recent charger poll
    charger_flags: ChargerFlags,
}

impl<P: ChargerProvider, B: PolarityBridge> MagnetSequencer<P, B> {
    /// Create an idle sequencer with the magnet assumed off
    pub fn new(provider: P, bridge: B, min_command_interval_ms: u32) -> Self {
        Self {
            provider,
            bridge,
            gate: CommandGate::new(min_command_interval_ms),
            counter: 0,
            charger: None,
            turned_on: false,
            health: Health::Ok,
            charger_flags: ChargerFlags::empty(),
        }
    }

    /// Request a turn-on sequence
    ///
    /// `cycles` is clamped to `[MIN_TURN_ON_CYCLES, MAX_CYCLES]`. Returns the
    /// number of pulses scheduled.
    pub fn turn_on(&mut self, cycles: u8, now_ms: u64) -> Result<u8, CommandError> {
        self.gate.check(self.is_busy(), self.turned_on, now_ms)?;

        let cycles = cycles.clamp(MIN_TURN_ON_CYCLES, MAX_CYCLES);
        self.counter = i16::from(cycles);
        self.gate.record(now_ms);
        Ok(cycles)
    }

    /// Request a turn-off sequence
    ///
    /// Runs the whole demagnetization ramp, or skips its leading entries
    /// when the magnet is already off. Returns the number of pulses
    /// scheduled.
    pub fn turn_off(&mut self, now_ms: u64) -> Result<u8, CommandError> {
        let already_off = !self.turned_on;
        self.gate.check(self.is_busy(), already_off, now_ms)?;

        let mut counter = -(DEMAGNETIZE_LEN as i16);
        if already_off {
            counter += i16::from(ALREADY_OFF_SKIP);
        }
        self.counter = counter;
        self.gate.record(now_ms);
        Ok(counter.unsigned_abs() as u8)
    }

    /// Dispatch a command from any source
    pub fn apply(&mut self, command: MagnetCommand, now_ms: u64) -> Result<u8, CommandError> {
        match command {
            MagnetCommand::TurnOn { cycles } => self.turn_on(cycles, now_ms),
            MagnetCommand::TurnOff => self.turn_off(now_ms),
        }
    }

    /// Advance the active pulse by one tick
    ///
    /// Returns an event when a pulse reaches a terminal outcome and `None`
    /// while idle or while the charger is still working.
    pub fn poll(&mut self) -> Option<PulseEvent> {
        let step = self.current_step()?;

        if self.charger.is_none() {
            match self.provider.acquire() {
                Some(mut charger) => {
                    charger.begin(step.volts);
                    self.charger = Some(charger);
                }
                None => return Some(self.abort(ChargerFlags::SENSE_FAULT)),
            }
        }

        let charger = self.charger.as_mut()?;
        let status = charger.poll();
        self.charger_flags = charger.error_flags();

        match status {
            ChargeStatus::InProgress => None,
            ChargeStatus::Done => Some(self.complete(step)),
            ChargeStatus::Error => Some(self.abort(self.charger_flags)),
        }
    }

    /// Pole state; stable outside of a running sequence
    pub fn is_turned_on(&self) -> bool {
        self.turned_on
    }

    pub fn health(&self) -> Health {
        self.health
    }

    /// Charger flags from the most recent poll
    pub fn charger_flags(&self) -> ChargerFlags {
        self.charger_flags
    }

    /// Charger flags plus the switching direction bits
    pub fn status_flags(&self) -> StatusFlags {
        StatusFlags::compose(self.charger_flags, self.counter > 0, self.counter < 0)
    }

    /// Raw signed cycle counter
    pub fn counter(&self) -> i16 {
        self.counter
    }

    pub fn phase(&self) -> SequencePhase {
        let remaining = self.counter.unsigned_abs() as u8;
        match self.counter.cmp(&0) {
            Ordering::Greater => SequencePhase::TurningOn { remaining },
            Ordering::Less => SequencePhase::TurningOff { remaining },
            Ordering::Equal => SequencePhase::Idle,
        }
    }

    /// Check if a sequence is in progress
    pub fn is_busy(&self) -> bool {
        self.counter != 0
    }

    /// Check if a charger is currently held
    pub fn has_charger(&self) -> bool {
        self.charger.is_some()
    }

    /// Timestamp of the last admitted command
    pub fn last_command_ms(&self) -> Option<u64> {
        self.gate.last_command_ms()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Step the counter currently points at
    fn current_step(&self) -> Option<CycleStep> {
        match self.counter.cmp(&0) {
            Ordering::Greater => Some(CycleStep {
                volts: TURN_ON_VOLTS,
                polarity: Polarity::Positive,
            }),
            Ordering::Less => {
                let remaining = usize::from(self.counter.unsigned_abs());
                DEMAGNETIZE_CYCLES
                    .get(DEMAGNETIZE_LEN.checked_sub(remaining)?)
                    .copied()
            }
            Ordering::Equal => None,
        }
    }

    fn complete(&mut self, step: CycleStep) -> PulseEvent {
        self.bridge.drive(step.polarity);
        self.release_charger();

        if self.counter > 0 {
            self.turned_on = true;
            self.counter -= 1;
        } else {
            if step.polarity.is_off() {
                self.turned_on = false;
            }
            self.counter += 1;
        }
        self.health = Health::after_pulse(self.charger_flags);

        PulseEvent::Completed {
            polarity: step.polarity,
            volts: step.volts,
        }
    }

    fn abort(&mut self, flags: ChargerFlags) -> PulseEvent {
        self.release_charger();
        self.counter = 0;
        self.charger_flags = flags;
        self.health = Health::Error;
        PulseEvent::Failed { flags }
    }

    fn release_charger(&mut self) {
        if let Some(charger) = self.charger.take() {
            self.provider.release(charger);
        }
    }
}

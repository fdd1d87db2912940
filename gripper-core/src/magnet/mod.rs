//! Magnet actuation
//!
//! Turns on/off requests into bounded series of charge/discharge pulses.
//!
//! ```text
//!            turn_on(n)                    turn_off()
//!   Idle ────────────────► TurningOn(n)    Idle ──────► TurningOff(43 | 41)
//!    ▲                        │ Done: n-1                  │ Done: toward 0
//!    └──── counter == 0 ◄─────┴──── Error: abort ◄─────────┘
//! ```

pub mod cycles;
pub mod gate;
pub mod sequencer;

pub use cycles::{
    CycleStep, ALREADY_OFF_SKIP, DEMAGNETIZE_CYCLES, DEMAGNETIZE_LEN, MAX_CYCLES,
    MIN_TURN_ON_CYCLES, TURN_ON_VOLTS,
};
pub use gate::{CommandError, CommandGate};
pub use sequencer::{MagnetSequencer, PulseEvent, SequencePhase};

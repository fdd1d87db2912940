//! Hardpoint bus contract
//!
//! This crate defines what the gripper exchanges with the vehicle bus:
//! hardpoint commands coming in, hardpoint and node status going out. The
//! bus stack itself (addressing, transport framing, wire encoding) lives
//! behind the [`BusNode`] trait.
//!
//! # Message flow
//!
//! ```text
//!   bus ──HardpointCommand──► CommandHandler ──MagnetCommand──► sequencer
//!                              (id filter, dedup, clamp)
//!
//!   sequencer ──snapshot──► StatusPublisher ──every 500 ms──► bus
//!                           (HardpointStatus + NodeStatus)
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod handler;
pub mod hardpoint;
pub mod node;
pub mod publisher;

pub use handler::CommandHandler;
pub use hardpoint::{HardpointCommand, HardpointStatus};
pub use node::{BusNode, NodeHealth, NodeMode, NodeStatus};
pub use publisher::{MagnetSnapshot, StatusPublisher};

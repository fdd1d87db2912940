//! Capacitor charger drivers

pub mod flyback;

pub use flyback::{FlybackCharger, FlybackChargerProvider, FlybackHardware};

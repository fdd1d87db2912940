//! Embassy async tasks
//!
//! Each task owns one input peripheral and publishes through `channels`.

pub mod adc;
pub mod button;
pub mod pwm_input;

pub use adc::adc_task;
pub use button::button_task;
pub use pwm_input::pwm_input_task;

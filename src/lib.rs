#![doc = include_str!("../README.md")]
#![no_std]

pub mod constants;
mod irq;
pub mod platform;
pub mod radio;
pub mod receiver;
mod types;

pub use irq::IrqFlags;
pub use receiver::{BindRecord, Failsafe, Receiver};
pub use types::{Error, LedMode};

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
extern crate log;

pub use usb_if::Mmio;
pub use usb_if::err::PlatformError;
pub use usb_if::host::{ClockBulkOp, DeviceOp, PhyBulkOp, RegulatorOp};

pub mod err;
pub mod host;

mod backend;
mod osal;

pub use host::*;
pub use osal::{KernelOp, SpinKernel};

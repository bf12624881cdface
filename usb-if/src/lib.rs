#![no_std]

extern crate alloc;

pub mod err;
pub mod host;

use core::ptr::NonNull;

/// Base address of a memory-mapped register window.
pub type Mmio = NonNull<u8>;

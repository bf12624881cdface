use alloc::boxed::Box;

use crate::{Mmio, err::PlatformError};

/// Device handle handed to a platform glue driver at probe time.
///
/// Wraps the configuration source (device-tree node) together with the
/// resource providers the node references.
pub trait DeviceOp: Send + 'static {
    /// Device name used as the log prefix.
    fn name(&self) -> &str;

    /// Base address of the register window named `name` (`reg-names`).
    fn reg_base(&self, name: &str) -> Option<Mmio>;

    /// Optional 32-bit property. `None` if absent.
    fn read_u32(&self, prop: &str) -> Option<u32>;

    /// Whether the node lists `compat` in its `compatible` property.
    fn is_compatible(&self, compat: &str) -> bool;

    /// Looks up the regulator behind the `<name>` supply property.
    ///
    /// `None` means the board does not describe this rail, which is a
    /// valid configuration.
    fn supply(&mut self, name: &str) -> Option<Box<dyn RegulatorOp>>;

    /// Every clock listed by the node.
    fn clocks(&mut self) -> Result<Box<dyn ClockBulkOp>, PlatformError>;

    /// Every PHY listed by the node.
    fn phys(&mut self) -> Result<Box<dyn PhyBulkOp>, PlatformError>;
}

/// Power rail control.
pub trait RegulatorOp: Send + 'static {
    fn set_enable(&mut self, enable: bool) -> Result<(), PlatformError>;
}

/// A bundle of clock gates switched together.
pub trait ClockBulkOp: Send + 'static {
    fn enable_all(&mut self) -> Result<(), PlatformError>;
    fn disable_all(&mut self);
}

/// A bundle of PHY lanes.
///
/// `init` must precede `power_on`; `power_off` precedes `exit`.
pub trait PhyBulkOp: Send + 'static {
    fn init(&mut self) -> Result<(), PlatformError>;
    fn power_on(&mut self) -> Result<(), PlatformError>;
    fn power_off(&mut self);
    fn exit(&mut self);
}

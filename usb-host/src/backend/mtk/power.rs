//! Scoped handles for the rails, clocks and PHYs a host depends on.
//!
//! Each guard releases its resource when dropped. Guards are acquired in
//! `vusb33 -> vbus -> clocks -> phys` order and held so that they drop in
//! the opposite order.

use alloc::boxed::Box;

use usb_if::host::{ClockBulkOp, DeviceOp, PhyBulkOp, RegulatorOp};

use crate::err::{MtkError, PlatformError, Resource, Result};

/// An enabled power rail.
pub struct SupplyGuard {
    name: &'static str,
    reg: Box<dyn RegulatorOp>,
}

impl SupplyGuard {
    /// Enables the rail behind `name`. A rail the board does not describe
    /// yields `Ok(None)`.
    pub fn enable<D: DeviceOp + ?Sized>(
        dev: &mut D,
        name: &'static str,
        resource: Resource,
    ) -> Result<Option<Self>> {
        let Some(mut reg) = dev.supply(name) else {
            debug!("{}: can't get {name} regulator", dev.name());
            return Ok(None);
        };

        match reg.set_enable(true) {
            Err(e) if !e.is_not_supported() => {
                error!("{}: failed to enable {name}: {e}", dev.name());
                Err(MtkError::unavailable(resource)(e))
            }
            _ => Ok(Some(Self { name, reg })),
        }
    }
}

impl Drop for SupplyGuard {
    fn drop(&mut self) {
        match self.reg.set_enable(false) {
            Err(e) if !e.is_not_supported() => warn!("failed to disable {}: {e}", self.name),
            _ => debug!("{} disabled", self.name),
        }
    }
}

/// The clock bundle, enabled.
pub struct ClockGuard {
    clks: Box<dyn ClockBulkOp>,
}

impl ClockGuard {
    pub fn enable<D: DeviceOp + ?Sized>(dev: &mut D) -> Result<Self> {
        let mut clks = dev.clocks().map_err(|e| {
            error!("{}: failed to get clocks {e}", dev.name());
            MtkError::unavailable(Resource::Clocks)(e)
        })?;

        clks.enable_all().map_err(|e| {
            error!("{}: failed to enable clocks {e}", dev.name());
            MtkError::unavailable(Resource::Clocks)(e)
        })?;

        Ok(Self { clks })
    }
}

impl Drop for ClockGuard {
    fn drop(&mut self) {
        self.clks.disable_all();
        debug!("clocks disabled");
    }
}

/// The PHY bundle, initialized and powered on.
pub struct PhyGuard {
    phys: Box<dyn PhyBulkOp>,
}

impl PhyGuard {
    pub fn power_on<D: DeviceOp + ?Sized>(dev: &mut D) -> Result<Self> {
        let mut phys = dev.phys().map_err(Self::setup_failed)?;
        phys.init().map_err(Self::setup_failed)?;

        if let Err(e) = phys.power_on() {
            phys.exit();
            return Err(Self::setup_failed(e));
        }

        Ok(Self { phys })
    }

    fn setup_failed(e: PlatformError) -> MtkError {
        error!("phy setup failed {e}");
        MtkError::unavailable(Resource::Phys)(e)
    }
}

impl Drop for PhyGuard {
    fn drop(&mut self) {
        self.phys.power_off();
        self.phys.exit();
        debug!("phys powered off");
    }
}

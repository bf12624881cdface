//! MediaTek SSUSB xHCI glue
//!
//! The SSUSB IP wraps a standard xHCI core (MAC window) with a vendor IP
//! port control block (IPPC). Before the generic xHCI driver may touch the
//! MAC window the glue must power the IP, enable the ports the board uses
//! and wait for the clock domains to come out of reset.
//!
//! ## Probe order
//!
//! 1. Resolve the `mac`/`ippc` windows and the port disable masks
//! 2. Enable `vusb33` and `vbus` supplies, clocks, then PHYs
//! 3. Pulse the IP software reset and read the port topology
//! 4. Power on the host IP and every port not masked off
//! 5. Wait for `IP_PW_STS1` to report stable clocks and released resets
//! 6. Fix the frame interval on MT8195
//! 7. Hand the xHCI window over
//!
//! Any failure unwinds whatever was done so far, in reverse.

use alloc::sync::Arc;

use tock_registers::interfaces::Readable;
use usb_if::host::DeviceOp;

mod config;
mod frame;
mod ippc;
mod port;
mod power;
mod reg;

pub use config::*;
pub use ippc::{READY_POLL_STEP, READY_TIMEOUT, ready_mask};
pub use port::{PortKind, PortSet};

use ippc::Ippc;
use power::{ClockGuard, PhyGuard, SupplyGuard};
use reg::{CAPBASE, MacRegs};

use crate::{
    Mmio,
    err::{Resource, Result},
    host::{Quirks, XhciWindow},
    osal::KernelOp,
};

/// Lifecycle of a controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    ResourcesBound,
    IpReset,
    PortsConfigured,
    Stable,
    HandedOff,
    PortsTornDown,
    ResourcesReleased,
}

/// One SSUSB host controller.
///
/// Dropping the instance has the same effect as [`XhciMtk::remove`].
pub struct XhciMtk<D: DeviceOp> {
    dev: D,
    kernel: Arc<dyn KernelOp>,
    cfg: MtkConfig,
    ippc: Ippc,
    ports: Option<PortSet>,
    window: Option<XhciWindow>,
    state: State,
    // Released in this order.
    phys: Option<PhyGuard>,
    clks: Option<ClockGuard>,
    vbus: Option<SupplyGuard>,
    vusb33: Option<SupplyGuard>,
}

unsafe impl<D: DeviceOp> Send for XhciMtk<D> {}

impl<D: DeviceOp> XhciMtk<D> {
    /// Brings the host IP up and returns it ready for the xHCI driver.
    pub fn probe(dev: D, kernel: Arc<dyn KernelOp>) -> Result<Self> {
        let cfg = MtkConfig::from_device(&dev)?;
        let ippc = unsafe { Ippc::new(cfg.ippc) };

        let mut mtk = Self {
            dev,
            kernel,
            cfg,
            ippc,
            ports: None,
            window: None,
            state: State::Idle,
            phys: None,
            clks: None,
            vbus: None,
            vusb33: None,
        };

        mtk.bind_resources()?;
        mtk.ssusb_init()?;
        mtk.set_frame_interval();
        mtk.hand_off();

        Ok(mtk)
    }

    /// Powers the host down and releases every resource.
    pub fn remove(mut self) {
        info!("{}: remove", self.dev.name());
        self.shutdown();
    }

    fn bind_resources(&mut self) -> Result {
        self.vusb33 = SupplyGuard::enable(&mut self.dev, SUPPLY_VUSB33, Resource::Vusb33Supply)?;
        self.vbus = SupplyGuard::enable(&mut self.dev, SUPPLY_VBUS, Resource::VbusSupply)?;
        self.clks = Some(ClockGuard::enable(&mut self.dev)?);
        self.phys = Some(PhyGuard::power_on(&mut self.dev)?);
        self.enter(State::ResourcesBound);
        Ok(())
    }

    fn ssusb_init(&mut self) -> Result {
        let kernel = self.kernel.clone();

        self.ippc.ip_reset(kernel.as_ref());
        let (num_u3ports, num_u2ports) = self.ippc.read_port_count();
        info!(
            "{}: u2p:{}, u3p:{}",
            self.dev.name(),
            num_u2ports,
            num_u3ports
        );
        let ports = PortSet::new(
            num_u3ports,
            num_u2ports,
            self.cfg.u3p_dis_msk,
            self.cfg.u2p_dis_msk,
        );
        self.ports = Some(ports);
        self.enter(State::IpReset);

        self.ippc.host_enable(&ports);
        self.enter(State::PortsConfigured);

        let sts1 = self.ippc.wait_ready(&ports, kernel.as_ref()).inspect_err(|e| {
            error!("{}: {e}", self.dev.name());
        })?;
        debug!("{}: IP_PW_STS1 {:#x}", self.dev.name(), sts1);
        self.enter(State::Stable);

        Ok(())
    }

    fn mac_regs(&self) -> &MacRegs {
        unsafe { &*(self.cfg.mac.as_ptr() as *const MacRegs) }
    }

    fn set_frame_interval(&self) {
        if frame::set_frame_interval(self.cfg.variant, self.mac_regs()) {
            info!("{}: frame interval fixed up", self.dev.name());
        }
    }

    fn hand_off(&mut self) {
        let capbase = self.mac_regs().capbase.extract();
        let caplength = capbase.read(CAPBASE::CAPLENGTH) as u8;
        let hci_version = capbase.read(CAPBASE::HCIVERSION) as u16;
        let hcor = unsafe { self.cfg.mac.add(caplength as usize) };

        if self.ippc.is_sleeping() {
            warn!("{}: IP reports sleep state after power on", self.dev.name());
        }

        info!(
            "{}: xHCI {:#x} ready, hccr {:p}, hcor {:p}",
            self.dev.name(),
            hci_version,
            self.cfg.mac,
            hcor
        );

        self.window = Some(XhciWindow {
            hccr: self.cfg.mac,
            hcor,
            caplength,
            hci_version,
            quirks: Quirks::MTK_HOST,
        });
        self.enter(State::HandedOff);
    }

    /// Tears down whatever the instance holds. Safe to call repeatedly.
    fn shutdown(&mut self) {
        let ports_powered = matches!(
            self.state,
            State::PortsConfigured | State::Stable | State::HandedOff
        );

        if let Some(ports) = self.ports.filter(|_| ports_powered) {
            self.window = None;
            self.ippc.host_disable(&ports);
            self.enter(State::PortsTornDown);
        }

        if self.holds_resources() {
            self.phys = None;
            self.clks = None;
            self.vbus = None;
            self.vusb33 = None;
            self.enter(State::ResourcesReleased);
        }

        if self.state != State::Idle {
            self.enter(State::Idle);
        }
    }

    fn holds_resources(&self) -> bool {
        self.phys.is_some() || self.clks.is_some() || self.vbus.is_some() || self.vusb33.is_some()
    }

    fn enter(&mut self, state: State) {
        debug!("{}: {:?} -> {:?}", self.dev.name(), self.state, state);
        self.state = state;
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn device(&self) -> &D {
        &self.dev
    }

    pub fn variant(&self) -> Variant {
        self.cfg.variant
    }

    /// Port topology, known once the IP has been reset.
    pub fn ports(&self) -> Option<&PortSet> {
        self.ports.as_ref()
    }

    /// Register window for the generic xHCI driver.
    pub fn xhci_window(&self) -> Option<XhciWindow> {
        self.window
    }

    /// Whether `port` is powered and owned by the host. Ports outside the
    /// topology read from `IP_XHCI_CAP` are never enabled.
    pub fn is_port_enabled(&self, kind: PortKind, port: u8) -> bool {
        match self.ports {
            Some(ports) if port < ports.count(kind) => self.ippc.is_port_enabled(kind, port),
            _ => false,
        }
    }

    /// Raw `IP_PW_STS1`.
    pub fn ip_status(&self) -> u32 {
        self.ippc.status()
    }

    /// The `mac` window, as resolved from the device.
    pub fn mac(&self) -> Mmio {
        self.cfg.mac
    }
}

impl<D: DeviceOp> Drop for XhciMtk<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

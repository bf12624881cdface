//! IPPC sequencing: IP reset, port topology, port power and readiness.

use core::time::Duration;

use mbarrier::mb;
use tock_registers::interfaces::{ReadWriteable, Readable};

use super::port::{PortKind, PortSet};
use super::reg::*;
use crate::{
    Mmio,
    err::{MtkError, Result},
    osal::{KernelOp, read_poll_timeout},
};

/// Upper bound for the clock/reset domains to settle after power on.
pub const READY_TIMEOUT: Duration = Duration::from_millis(20);
/// Interval between two `IP_PW_STS1` reads while waiting.
pub const READY_POLL_STEP: Duration = Duration::from_micros(10);
/// Width of the IP software reset pulse.
pub const IP_SW_RST_HOLD: Duration = Duration::from_micros(1);

/// Status bits the host must see before the xHCI core is usable.
///
/// A controller with every SuperSpeed port disabled never releases the U3
/// MAC reset, so that bit is only required while a U3 port is enabled.
pub fn ready_mask(ports: &PortSet) -> u32 {
    let mut check = IP_PW_STS1::SYSPLL_STABLE::SET
        + IP_PW_STS1::REF_RST::SET
        + IP_PW_STS1::SYS125_RST::SET
        + IP_PW_STS1::XHCI_RST::SET;

    if ports.num_enabled(PortKind::SuperSpeed) > 0 {
        check += IP_PW_STS1::U3_MAC_RST::SET;
    }

    check.value
}

/// IPPC register accessor.
pub struct Ippc {
    base: usize,
}

impl Ippc {
    /// # Safety
    ///
    /// `base` must point at a mapped IPPC window that stays valid for the
    /// lifetime of the accessor.
    pub unsafe fn new(base: Mmio) -> Self {
        Self {
            base: base.as_ptr() as usize,
        }
    }

    fn regs(&self) -> &IppcRegs {
        unsafe { &*(self.base as *const IppcRegs) }
    }

    fn port_ctrl(&self, kind: PortKind, port: u8) -> &PortCtrl {
        let first = match kind {
            PortKind::SuperSpeed => U3_CTRL_0P,
            PortKind::HighSpeed => U2_CTRL_0P,
        };
        let addr = self.base + first + port as usize * PORT_CTRL_STRIDE;
        unsafe { &*(addr as *const PortCtrl) }
    }

    /// Pulses the software reset of the whole IP.
    pub fn ip_reset(&self, kernel: &dyn KernelOp) {
        let ctrl0 = &self.regs().ip_pw_ctrl0;
        ctrl0.modify(IP_PW_CTRL0::IP_SW_RST::Reset);
        mb();
        kernel.delay(IP_SW_RST_HOLD);
        ctrl0.modify(IP_PW_CTRL0::IP_SW_RST::Normal);
        mb();
    }

    /// Port counts as `(u3, u2)`.
    pub fn read_port_count(&self) -> (u8, u8) {
        let cap = self.regs().ip_xhci_cap.extract();
        (
            cap.read(IP_XHCI_CAP::U3_PORT_NUM) as u8,
            cap.read(IP_XHCI_CAP::U2_PORT_NUM) as u8,
        )
    }

    /// Powers on the host IP and every port not disabled by the board.
    pub fn host_enable(&self, ports: &PortSet) {
        self.regs()
            .ip_pw_ctrl1
            .modify(IP_PW_CTRL1::IP_HOST_PDN::PowerOn);

        for kind in [PortKind::SuperSpeed, PortKind::HighSpeed] {
            for port in ports.all(kind) {
                if ports.is_disabled(kind, port) {
                    debug!("{kind}{port}: kept powered down");
                    continue;
                }
                self.port_ctrl(kind, port).modify(
                    PORT_CTRL::PORT_PDN::CLEAR
                        + PORT_CTRL::PORT_DIS::CLEAR
                        + PORT_CTRL::PORT_HOST_SEL::SET,
                );
                debug!("{kind}{port}: powered on");
            }
        }
    }

    /// Waits for the clocks to be stable and the clock domain resets to be
    /// released.
    pub fn wait_ready(&self, ports: &PortSet, kernel: &dyn KernelOp) -> Result<u32> {
        let check = ready_mask(ports);
        let sts1 = &self.regs().ip_pw_sts1;

        read_poll_timeout(
            kernel,
            READY_TIMEOUT,
            READY_POLL_STEP,
            || sts1.get(),
            |value| value & check == check,
        )
        .map_err(|last_status| MtkError::HardwareTimeout { last_status })
    }

    /// Powers down every port, whatever the disable masks, then the host IP.
    pub fn host_disable(&self, ports: &PortSet) {
        for kind in [PortKind::SuperSpeed, PortKind::HighSpeed] {
            for port in ports.all(kind) {
                self.port_ctrl(kind, port)
                    .modify(PORT_CTRL::PORT_PDN::SET + PORT_CTRL::PORT_DIS::SET);
            }
        }

        self.regs()
            .ip_pw_ctrl1
            .modify(IP_PW_CTRL1::IP_HOST_PDN::PowerDown);
    }

    /// Whether `port` is owned by the host and powered.
    pub fn is_port_enabled(&self, kind: PortKind, port: u8) -> bool {
        let ctrl = self.port_ctrl(kind, port).extract();
        ctrl.is_set(PORT_CTRL::PORT_HOST_SEL)
            && !ctrl.is_set(PORT_CTRL::PORT_PDN)
            && !ctrl.is_set(PORT_CTRL::PORT_DIS)
    }

    pub fn is_host_powered_down(&self) -> bool {
        self.regs().ip_pw_ctrl1.is_set(IP_PW_CTRL1::IP_HOST_PDN)
    }

    pub fn is_sleeping(&self) -> bool {
        self.regs().ip_pw_sts1.is_set(IP_PW_STS1::IP_SLEEP_STS)
    }

    pub fn status(&self) -> u32 {
        self.regs().ip_pw_sts1.get()
    }
}

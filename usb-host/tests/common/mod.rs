//! Mock SSUSB board: register windows backed by memory, and rail/clock/PHY
//! providers that log what was done to them.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::ptr::NonNull;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use crab_usb_mtk::*;
use spin::Mutex;

pub const IP_PW_CTRL0: usize = 0x00;
pub const IP_PW_CTRL1: usize = 0x04;
pub const IP_PW_STS1: usize = 0x10;
pub const IP_XHCI_CAP: usize = 0x24;
pub const U3_CTRL_0P: usize = 0x30;
pub const U2_CTRL_0P: usize = 0x50;

pub const PORT_DIS: u32 = 1 << 0;
pub const PORT_PDN: u32 = 1 << 1;
pub const PORT_HOST_SEL: u32 = 1 << 2;

/// SYSPLL_STABLE | REF_RST | SYS125_RST | XHCI_RST
pub const STS1_CLOCKS_READY: u32 = 0x0d01;
pub const STS1_U3_MAC_RST: u32 = 1 << 16;

/// Memory standing in for an MMIO window.
pub struct Window {
    mem: Box<[AtomicU32]>,
}

impl Window {
    pub fn new(bytes: usize) -> Arc<Self> {
        Arc::new(Self {
            mem: (0..bytes / 4).map(|_| AtomicU32::new(0)).collect(),
        })
    }

    pub fn mmio(&self) -> Mmio {
        NonNull::new(self.mem.as_ptr() as *mut u8).unwrap()
    }

    pub fn read(&self, offset: usize) -> u32 {
        self.mem[offset / 4].load(Ordering::SeqCst)
    }

    pub fn write(&self, offset: usize, value: u32) {
        self.mem[offset / 4].store(value, Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SupplyOn(&'static str),
    SupplyOff(&'static str),
    ClkEnable,
    ClkDisable,
    PhyInit,
    PhyPowerOn,
    PhyPowerOff,
    PhyExit,
}

impl Event {
    /// The event that undoes `self`, for acquire events.
    pub fn undo(self) -> Option<Event> {
        match self {
            Event::SupplyOn(name) => Some(Event::SupplyOff(name)),
            Event::ClkEnable => Some(Event::ClkDisable),
            Event::PhyInit => Some(Event::PhyExit),
            Event::PhyPowerOn => Some(Event::PhyPowerOff),
            _ => None,
        }
    }
}

/// Injected failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct Faults {
    pub vusb33_enable: Option<PlatformError>,
    pub vbus_enable: Option<PlatformError>,
    pub clk_get: Option<PlatformError>,
    pub clk_enable: Option<PlatformError>,
    pub phy_get: Option<PlatformError>,
    pub phy_init: Option<PlatformError>,
    pub phy_power_on: Option<PlatformError>,
}

pub struct Board {
    pub mac: Arc<Window>,
    pub ippc: Arc<Window>,
    pub events: Arc<Mutex<Vec<Event>>>,
    pub props: BTreeMap<&'static str, u32>,
    pub compatible: Vec<&'static str>,
    pub supplies: Vec<&'static str>,
    pub faults: Faults,
    pub has_mac: bool,
    pub has_ippc: bool,
}

impl Board {
    /// A board with `u3` SuperSpeed and `u2` HighSpeed ports, both rails,
    /// and every port control register reset to powered down.
    pub fn new(u3: u8, u2: u8) -> Self {
        let mac = Window::new(0x1000);
        let ippc = Window::new(0x100);

        // CAPLENGTH 0x20, HCIVERSION 1.10
        mac.write(0x00, 0x0110_0020);
        ippc.write(IP_XHCI_CAP, (u2 as u32) << 8 | u3 as u32);
        ippc.write(IP_PW_CTRL1, 1);
        for p in 0..u3 as usize {
            ippc.write(U3_CTRL_0P + p * 8, PORT_PDN | PORT_DIS);
        }
        for p in 0..u2 as usize {
            ippc.write(U2_CTRL_0P + p * 8, PORT_PDN | PORT_DIS);
        }

        Self {
            mac,
            ippc,
            events: Arc::new(Mutex::new(Vec::new())),
            props: BTreeMap::new(),
            compatible: vec!["mediatek,mtk-xhci"],
            supplies: vec!["vusb33-supply", "vbus-supply"],
            faults: Faults::default(),
            has_mac: true,
            has_ippc: true,
        }
    }

    pub fn with_masks(mut self, u3p_dis_msk: u32, u2p_dis_msk: u32) -> Self {
        self.props.insert("mediatek,u3p-dis-msk", u3p_dis_msk);
        self.props.insert("mediatek,u2p-dis-msk", u2p_dis_msk);
        self
    }

    pub fn with_status(self, sts1: u32) -> Self {
        self.ippc.write(IP_PW_STS1, sts1);
        self
    }

    pub fn device(&self) -> MockDevice {
        MockDevice {
            mac: self.mac.clone(),
            ippc: self.ippc.clone(),
            events: self.events.clone(),
            props: self.props.clone(),
            compatible: self.compatible.clone(),
            supplies: self.supplies.clone(),
            faults: self.faults,
            has_mac: self.has_mac,
            has_ippc: self.has_ippc,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn clear_events(&self) {
        self.events.lock().clear();
    }

    pub fn port_ctrl(&self, kind: PortKind, port: usize) -> u32 {
        let first = match kind {
            PortKind::SuperSpeed => U3_CTRL_0P,
            PortKind::HighSpeed => U2_CTRL_0P,
        };
        self.ippc.read(first + port * 8)
    }

    pub fn port_enabled(&self, kind: PortKind, port: usize) -> bool {
        self.port_ctrl(kind, port) == PORT_HOST_SEL
    }

    pub fn host_powered_down(&self) -> bool {
        self.ippc.read(IP_PW_CTRL1) & 1 != 0
    }
}

pub struct MockDevice {
    mac: Arc<Window>,
    ippc: Arc<Window>,
    events: Arc<Mutex<Vec<Event>>>,
    props: BTreeMap<&'static str, u32>,
    compatible: Vec<&'static str>,
    supplies: Vec<&'static str>,
    faults: Faults,
    has_mac: bool,
    has_ippc: bool,
}

impl DeviceOp for MockDevice {
    fn name(&self) -> &str {
        "usb@11200000"
    }

    fn reg_base(&self, name: &str) -> Option<Mmio> {
        match name {
            "mac" if self.has_mac => Some(self.mac.mmio()),
            "ippc" if self.has_ippc => Some(self.ippc.mmio()),
            _ => None,
        }
    }

    fn read_u32(&self, prop: &str) -> Option<u32> {
        self.props.get(prop).copied()
    }

    fn is_compatible(&self, compat: &str) -> bool {
        self.compatible.contains(&compat)
    }

    fn supply(&mut self, name: &str) -> Option<Box<dyn RegulatorOp>> {
        let name = *self.supplies.iter().find(|&&s| s == name)?;
        let fault = match name {
            "vusb33-supply" => self.faults.vusb33_enable,
            _ => self.faults.vbus_enable,
        };
        Some(Box::new(MockRegulator {
            name,
            fault,
            events: self.events.clone(),
        }))
    }

    fn clocks(&mut self) -> Result<Box<dyn ClockBulkOp>, PlatformError> {
        if let Some(e) = self.faults.clk_get {
            return Err(e);
        }
        Ok(Box::new(MockClocks {
            fault: self.faults.clk_enable,
            events: self.events.clone(),
        }))
    }

    fn phys(&mut self) -> Result<Box<dyn PhyBulkOp>, PlatformError> {
        if let Some(e) = self.faults.phy_get {
            return Err(e);
        }
        Ok(Box::new(MockPhys {
            init_fault: self.faults.phy_init,
            power_on_fault: self.faults.phy_power_on,
            events: self.events.clone(),
        }))
    }
}

struct MockRegulator {
    name: &'static str,
    fault: Option<PlatformError>,
    events: Arc<Mutex<Vec<Event>>>,
}

impl RegulatorOp for MockRegulator {
    fn set_enable(&mut self, enable: bool) -> Result<(), PlatformError> {
        if enable {
            if let Some(e) = self.fault {
                return Err(e);
            }
            self.events.lock().push(Event::SupplyOn(self.name));
        } else {
            self.events.lock().push(Event::SupplyOff(self.name));
        }
        Ok(())
    }
}

struct MockClocks {
    fault: Option<PlatformError>,
    events: Arc<Mutex<Vec<Event>>>,
}

impl ClockBulkOp for MockClocks {
    fn enable_all(&mut self) -> Result<(), PlatformError> {
        if let Some(e) = self.fault {
            return Err(e);
        }
        self.events.lock().push(Event::ClkEnable);
        Ok(())
    }

    fn disable_all(&mut self) {
        self.events.lock().push(Event::ClkDisable);
    }
}

struct MockPhys {
    init_fault: Option<PlatformError>,
    power_on_fault: Option<PlatformError>,
    events: Arc<Mutex<Vec<Event>>>,
}

impl PhyBulkOp for MockPhys {
    fn init(&mut self) -> Result<(), PlatformError> {
        if let Some(e) = self.init_fault {
            return Err(e);
        }
        self.events.lock().push(Event::PhyInit);
        Ok(())
    }

    fn power_on(&mut self) -> Result<(), PlatformError> {
        if let Some(e) = self.power_on_fault {
            return Err(e);
        }
        self.events.lock().push(Event::PhyPowerOn);
        Ok(())
    }

    fn power_off(&mut self) {
        self.events.lock().push(Event::PhyPowerOff);
    }

    fn exit(&mut self) {
        self.events.lock().push(Event::PhyExit);
    }
}

/// Kernel whose clock only advances through `delay`. Optionally makes the
/// IPPC status register report `status` once `ready_after` has elapsed,
/// the way the hardware does some time after the ports are powered.
pub struct MockKernel {
    ippc: Arc<Window>,
    ready: Option<(Duration, u32)>,
    elapsed_us: AtomicU64,
    /// IP_PW_CTRL0 as seen during the first delay (the reset pulse).
    pub ctrl0_in_first_delay: Mutex<Option<u32>>,
}

impl MockKernel {
    pub fn new(board: &Board) -> Arc<Self> {
        Arc::new(Self {
            ippc: board.ippc.clone(),
            ready: None,
            elapsed_us: AtomicU64::new(0),
            ctrl0_in_first_delay: Mutex::new(None),
        })
    }

    pub fn ready_after(board: &Board, after: Duration, status: u32) -> Arc<Self> {
        Arc::new(Self {
            ippc: board.ippc.clone(),
            ready: Some((after, status)),
            elapsed_us: AtomicU64::new(0),
            ctrl0_in_first_delay: Mutex::new(None),
        })
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.elapsed_us.load(Ordering::SeqCst))
    }
}

impl KernelOp for MockKernel {
    fn delay(&self, duration: Duration) {
        {
            let mut first = self.ctrl0_in_first_delay.lock();
            if first.is_none() {
                *first = Some(self.ippc.read(IP_PW_CTRL0));
            }
        }

        let elapsed = self
            .elapsed_us
            .fetch_add(duration.as_micros() as u64, Ordering::SeqCst)
            + duration.as_micros() as u64;

        if let Some((after, status)) = self.ready {
            if Duration::from_micros(elapsed) >= after {
                self.ippc.write(IP_PW_STS1, status);
            }
        }
    }
}

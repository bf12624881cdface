use core::fmt::Display;

/// Signalling tier of a root port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// USB 3.x SuperSpeed (U3) port
    SuperSpeed,
    /// USB 2.0 HighSpeed (U2) port
    HighSpeed,
}

impl Display for PortKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PortKind::SuperSpeed => f.write_str("u3p"),
            PortKind::HighSpeed => f.write_str("u2p"),
        }
    }
}

/// Port topology as reported by `IP_XHCI_CAP`, partitioned by the
/// board's disable masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSet {
    num_u3ports: u8,
    num_u2ports: u8,
    u3p_dis_msk: u32,
    u2p_dis_msk: u32,
}

impl PortSet {
    pub fn new(num_u3ports: u8, num_u2ports: u8, u3p_dis_msk: u32, u2p_dis_msk: u32) -> Self {
        Self {
            num_u3ports,
            num_u2ports,
            u3p_dis_msk,
            u2p_dis_msk,
        }
    }

    pub fn count(&self, kind: PortKind) -> u8 {
        match kind {
            PortKind::SuperSpeed => self.num_u3ports,
            PortKind::HighSpeed => self.num_u2ports,
        }
    }

    pub fn disable_mask(&self, kind: PortKind) -> u32 {
        match kind {
            PortKind::SuperSpeed => self.u3p_dis_msk,
            PortKind::HighSpeed => self.u2p_dis_msk,
        }
    }

    /// Whether the board keeps `port` powered down. Ports past bit 31
    /// cannot be described by the mask and are never disabled.
    pub fn is_disabled(&self, kind: PortKind, port: u8) -> bool {
        1u32.checked_shl(port as u32)
            .is_some_and(|bit| self.disable_mask(kind) & bit != 0)
    }

    /// Every port index of `kind` present in hardware.
    pub fn all(&self, kind: PortKind) -> impl Iterator<Item = u8> {
        0..self.count(kind)
    }

    pub fn enabled(&self, kind: PortKind) -> impl Iterator<Item = u8> + '_ {
        self.all(kind).filter(move |&p| !self.is_disabled(kind, p))
    }

    pub fn disabled(&self, kind: PortKind) -> impl Iterator<Item = u8> + '_ {
        self.all(kind).filter(move |&p| self.is_disabled(kind, p))
    }

    pub fn num_enabled(&self, kind: PortKind) -> usize {
        self.enabled(kind).count()
    }
}

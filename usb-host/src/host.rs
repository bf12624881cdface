//! What the generic xHCI driver receives once the glue is done.

use crate::Mmio;

pub use crate::backend::mtk::{
    COMPATIBLES, MtkConfig, PortKind, PortSet, READY_TIMEOUT, State, Variant, XhciMtk,
    ready_mask,
};

bitflags::bitflags! {
    /// Behaviour the xHCI driver has to adapt to on this host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Quirks: u32 {
        /// MediaTek host: vendor TT scheduling and TD size calculation.
        const MTK_HOST = 1 << 21;
    }
}

/// The powered-up xHCI register window.
#[derive(Debug, Clone, Copy)]
pub struct XhciWindow {
    /// Capability registers, at the start of the `mac` window.
    pub hccr: Mmio,
    /// Operational registers, `hccr + CAPLENGTH`.
    pub hcor: Mmio,
    pub caplength: u8,
    pub hci_version: u16,
    pub quirks: Quirks,
}

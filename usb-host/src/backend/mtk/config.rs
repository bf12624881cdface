use usb_if::host::DeviceOp;

use crate::{
    Mmio,
    err::{MtkError, PlatformError, Resource, Result},
};

pub const COMPAT_MTK_XHCI: &str = "mediatek,mtk-xhci";
pub const COMPAT_MT8195_XHCI: &str = "mediatek,mt8195-xhci";

/// Compatible strings this glue binds to.
pub const COMPATIBLES: &[&str] = &[COMPAT_MTK_XHCI, COMPAT_MT8195_XHCI];

pub const REG_MAC: &str = "mac";
pub const REG_IPPC: &str = "ippc";

/// prop `mediatek,u3p-dis-msk`
pub const PROP_U3P_DIS_MSK: &str = "mediatek,u3p-dis-msk";
/// prop `mediatek,u2p-dis-msk`
pub const PROP_U2P_DIS_MSK: &str = "mediatek,u2p-dis-msk";

pub const SUPPLY_VUSB33: &str = "vusb33-supply";
pub const SUPPLY_VBUS: &str = "vbus-supply";

/// Hardware variant, resolved once from the compatible list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Generic,
    Mt8195,
}

impl Variant {
    pub fn from_device<D: DeviceOp + ?Sized>(dev: &D) -> Self {
        if dev.is_compatible(COMPAT_MT8195_XHCI) {
            Variant::Mt8195
        } else {
            Variant::Generic
        }
    }

    /// Frame counter clock runs at 48MHz instead of the assumed 24MHz.
    pub fn has_48m_frame_clock(&self) -> bool {
        matches!(self, Variant::Mt8195)
    }
}

/// Board description of one SSUSB host.
#[derive(Debug, Clone, Copy)]
pub struct MtkConfig {
    /// xHCI register window
    pub mac: Mmio,
    /// IP port control window
    pub ippc: Mmio,
    pub u3p_dis_msk: u32,
    pub u2p_dis_msk: u32,
    pub variant: Variant,
}

impl MtkConfig {
    pub fn from_device<D: DeviceOp + ?Sized>(dev: &D) -> Result<Self> {
        let mac = dev.reg_base(REG_MAC).ok_or_else(|| {
            error!("{}: failed to get xHCI base address", dev.name());
            MtkError::unavailable(Resource::MacWindow)(PlatformError::NotFound)
        })?;

        let ippc = dev.reg_base(REG_IPPC).ok_or_else(|| {
            error!("{}: failed to get IPPC base address", dev.name());
            MtkError::unavailable(Resource::IppcWindow)(PlatformError::NotFound)
        })?;

        info!("{}: hcd: {:p}, ippc: {:p}", dev.name(), mac, ippc);

        // optional, no port is disabled when absent
        let u3p_dis_msk = dev.read_u32(PROP_U3P_DIS_MSK).unwrap_or(0);
        let u2p_dis_msk = dev.read_u32(PROP_U2P_DIS_MSK).unwrap_or(0);
        info!(
            "{}: ports disabled mask: u3p-{:#x}, u2p-{:#x}",
            dev.name(),
            u3p_dis_msk,
            u2p_dis_msk
        );

        Ok(Self {
            mac,
            ippc,
            u3p_dis_msk,
            u2p_dis_msk,
            variant: Variant::from_device(dev),
        })
    }
}

use core::fmt::Display;

pub use usb_if::err::PlatformError;

pub type Result<T = ()> = core::result::Result<T, MtkError>;

/// Resource a probe step failed to obtain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    MacWindow,
    IppcWindow,
    Vusb33Supply,
    VbusSupply,
    Clocks,
    Phys,
}

impl Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Resource::MacWindow => "xHCI (mac) register window",
            Resource::IppcWindow => "IPPC register window",
            Resource::Vusb33Supply => "vusb33 supply",
            Resource::VbusSupply => "vbus supply",
            Resource::Clocks => "clocks",
            Resource::Phys => "phys",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MtkError {
    #[error("{resource} unavailable: {source}")]
    ResourceUnavailable {
        resource: Resource,
        source: PlatformError,
    },
    #[error("clocks are not stable, IP_PW_STS1 = {last_status:#x}")]
    HardwareTimeout { last_status: u32 },
}

impl MtkError {
    /// Adapter for `map_err` on a platform call that acquires `resource`.
    pub(crate) fn unavailable(resource: Resource) -> impl FnOnce(PlatformError) -> Self {
        move |source| Self::ResourceUnavailable { resource, source }
    }

    /// The resource tag of a `ResourceUnavailable` error.
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Self::ResourceUnavailable { resource, .. } => Some(*resource),
            Self::HardwareTimeout { .. } => None,
        }
    }
}

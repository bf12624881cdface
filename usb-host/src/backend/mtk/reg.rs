//! MediaTek SSUSB register definitions
//!
//! Two windows are touched by the glue:
//!
//! - IPPC (IP Port Control): IP reset, host power-down, per-port power
//!   control and the clock/reset status used to decide readiness.
//! - MAC: the xHCI register block. Apart from the capability header read
//!   at handoff, only a few vendor frame-timing CSRs are written here.
//!
//! Based on Linux/U-Boot `drivers/usb/host/xhci-mtk.c`.
//!
//! ```text
//! IPPC
//! 0x00 IP_PW_CTRL0   [0] IP_SW_RST
//! 0x04 IP_PW_CTRL1   [0] IP_HOST_PDN
//! 0x10 IP_PW_STS1    [0] SYSPLL_STABLE [8] REF_RST [10] SYS125_RST
//!                    [11] XHCI_RST [16] U3_MAC_RST [30] IP_SLEEP_STS
//! 0x24 IP_XHCI_CAP   [7:0] U3 port count, [15:8] U2 port count
//! 0x30 + 8*p U3_CTRL [0] PORT_DIS [1] PORT_PDN [2] PORT_HOST_SEL
//! 0x50 + 8*p U2_CTRL (same layout)
//! ```

use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

/// First SuperSpeed port control register.
pub const U3_CTRL_0P: usize = 0x30;
/// First HighSpeed port control register.
pub const U2_CTRL_0P: usize = 0x50;
/// Distance between two port control registers of the same speed.
pub const PORT_CTRL_STRIDE: usize = 0x08;

// IP_PW_CTRL0 - 0x00
register_bitfields![u32,
    pub IP_PW_CTRL0 [
        /// Software reset of the whole SSUSB IP
        IP_SW_RST OFFSET(0) NUMBITS(1) [
            Normal = 0,
            Reset = 1
        ]
    ]
];

// IP_PW_CTRL1 - 0x04
register_bitfields![u32,
    pub IP_PW_CTRL1 [
        /// Host IP power down
        IP_HOST_PDN OFFSET(0) NUMBITS(1) [
            PowerOn = 0,
            PowerDown = 1
        ]
    ]
];

// IP_PW_STS1 - 0x10
//
// The *_RST bits read 1 once the corresponding reset has been released.
register_bitfields![u32,
    pub IP_PW_STS1 [
        SYSPLL_STABLE OFFSET(0) NUMBITS(1) [],
        REF_RST OFFSET(8) NUMBITS(1) [],
        SYS125_RST OFFSET(10) NUMBITS(1) [],
        XHCI_RST OFFSET(11) NUMBITS(1) [],
        U3_MAC_RST OFFSET(16) NUMBITS(1) [],
        IP_SLEEP_STS OFFSET(30) NUMBITS(1) []
    ]
];

// IP_XHCI_CAP - 0x24
register_bitfields![u32,
    pub IP_XHCI_CAP [
        U3_PORT_NUM OFFSET(0) NUMBITS(8) [],
        U2_PORT_NUM OFFSET(8) NUMBITS(8) []
    ]
];

// U3_CTRL_Px / U2_CTRL_Px
register_bitfields![u32,
    pub PORT_CTRL [
        PORT_DIS OFFSET(0) NUMBITS(1) [],
        PORT_PDN OFFSET(1) NUMBITS(1) [],
        PORT_HOST_SEL OFFSET(2) NUMBITS(1) []
    ]
];

// xHCI CAPLENGTH/HCIVERSION dword - MAC 0x00
register_bitfields![u32,
    pub CAPBASE [
        CAPLENGTH OFFSET(0) NUMBITS(8) [],
        HCIVERSION OFFSET(16) NUMBITS(16) []
    ]
];

// HFCNTR_CFG - MAC 0x944
register_bitfields![u32,
    pub HFCNTR_CFG [
        /// Frame counter clock divider for the ITP interval
        ITP_DELTA_CLK OFFSET(1) NUMBITS(5) [],
        /// Frame counter level-1 range
        FRMCNT_LEV1_RANG OFFSET(8) NUMBITS(12) []
    ]
];

// LS/FS/SS_GEN1/SS_GEN2 EOF_CFG
register_bitfields![u32,
    pub EOF_CFG [
        XSEOF_OFFSET OFFSET(0) NUMBITS(12) []
    ]
];

register_structs! {
    /// IPPC fixed registers. Port control registers follow at
    /// [`U3_CTRL_0P`] and [`U2_CTRL_0P`]; their count is only known after
    /// reading `ip_xhci_cap`.
    pub IppcRegs {
        (0x00 => pub ip_pw_ctrl0: ReadWrite<u32, IP_PW_CTRL0::Register>),
        (0x04 => pub ip_pw_ctrl1: ReadWrite<u32, IP_PW_CTRL1::Register>),
        (0x08 => _reserved0),
        (0x10 => pub ip_pw_sts1: ReadOnly<u32, IP_PW_STS1::Register>),
        (0x14 => _reserved1),
        (0x24 => pub ip_xhci_cap: ReadOnly<u32, IP_XHCI_CAP::Register>),
        (0x28 => _reserved2),
        (0x30 => @END),
    }
}

register_structs! {
    /// The slice of the MAC window this glue touches.
    pub MacRegs {
        (0x000 => pub capbase: ReadOnly<u32, CAPBASE::Register>),
        (0x004 => _reserved0),
        (0x930 => pub ls_eof_cfg: ReadWrite<u32, EOF_CFG::Register>),
        (0x934 => pub fs_eof_cfg: ReadWrite<u32, EOF_CFG::Register>),
        (0x938 => _reserved1),
        (0x93c => pub ss_gen1_eof_cfg: ReadWrite<u32, EOF_CFG::Register>),
        (0x940 => _reserved2),
        (0x944 => pub hfcntr_cfg: ReadWrite<u32, HFCNTR_CFG::Register>),
        (0x948 => _reserved3),
        (0x990 => pub ss_gen2_eof_cfg: ReadWrite<u32, EOF_CFG::Register>),
        (0x994 => @END),
    }
}

pub type PortCtrl = ReadWrite<u32, PORT_CTRL::Register>;

//! SOF/ITP frame timing workaround.
//!
//! MT8195 has four controllers. On controllers 1~3 the default SOF/ITP
//! interval is derived from a 24MHz frame counter clock while the clock
//! actually runs at 48MHz, so the interval and EOF offsets are reprogrammed.

use tock_registers::interfaces::ReadWriteable;

use super::config::Variant;
use super::reg::*;

const ITP_DELTA_CLK: u32 = 0xa;
const FRMCNT_LEV1_RANG: u32 = 0x12b;

const LSEOF_OFFSET: u32 = 0x89;
const FSEOF_OFFSET: u32 = 0x2e;
const SSG1EOF_OFFSET: u32 = 0x78;
const SSG2EOF_OFFSET: u32 = 0x3c;

/// Applies the frame interval fix if `variant` needs it.
///
/// Returns whether the MAC registers were touched.
pub fn set_frame_interval(variant: Variant, mac: &MacRegs) -> bool {
    if !variant.has_48m_frame_clock() {
        return false;
    }

    mac.hfcntr_cfg.modify(
        HFCNTR_CFG::ITP_DELTA_CLK.val(ITP_DELTA_CLK)
            + HFCNTR_CFG::FRMCNT_LEV1_RANG.val(FRMCNT_LEV1_RANG),
    );

    mac.ls_eof_cfg.modify(EOF_CFG::XSEOF_OFFSET.val(LSEOF_OFFSET));
    mac.fs_eof_cfg.modify(EOF_CFG::XSEOF_OFFSET.val(FSEOF_OFFSET));
    mac.ss_gen1_eof_cfg
        .modify(EOF_CFG::XSEOF_OFFSET.val(SSG1EOF_OFFSET));
    mac.ss_gen2_eof_cfg
        .modify(EOF_CFG::XSEOF_OFFSET.val(SSG2EOF_OFFSET));

    true
}

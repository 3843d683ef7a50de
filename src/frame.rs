//! Decoded frame types shared by all protocol decoders.

/// Which decoder produced a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Protocol {
    Nec,
    Panasonic,
    /// Timing-hash fallback for remotes no structured decoder understands.
    Hash,
}

/// One decoded command, returned at most once per received frame.
///
/// Field widths are protocol defined: NEC carries an 8-bit command (extended
/// NEC uses the full 16-bit address), Panasonic a 32-bit command, and the
/// hash fallback reports the pulse count in `address` and the 32-bit
/// fingerprint in `command`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IrFrame {
    pub protocol: Protocol,
    pub address: u16,
    pub command: u32,
}

impl IrFrame {
    /// True for the NEC auto-repeat sentinel synthesized while a button is
    /// held down (address `0xFFFF`, command `0x00`) instead of a fresh press.
    #[must_use]
    pub fn is_nec_repeat(&self) -> bool {
        self.protocol == Protocol::Nec
            && self.address == crate::nec::REPEAT_ADDRESS
            && self.command == u32::from(crate::nec::REPEAT_COMMAND)
    }
}

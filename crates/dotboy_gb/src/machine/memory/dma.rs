use super::{Memory, OAM_SIZE};
use crate::registers::DMA;

impl Memory {
    /// OAM DMA: copy 160 bytes from XX00..XX9F to FE00..FE9F.
    ///
    /// The transfer is immediate; its 160 M-cycle duration and the bus
    /// conflicts it causes on hardware are not modelled. Source bytes are
    /// read like any CPU read, so a locked VRAM source yields 0xFF.
    pub(super) fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        for i in 0..OAM_SIZE {
            let byte = self.read(base.wrapping_add(i as u16), false);
            self.oam[i] = byte;
        }
        self.io[(DMA - 0xFF00) as usize] = page;
        log::debug!("GB DMA: copied 0x{:04X}-0x{:04X} into OAM", base, base + 0x9F);
    }
}

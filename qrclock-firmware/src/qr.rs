//! QR symbol generation
//!
//! Fixed at version 3 (29×29 modules) with medium error correction,
//! which fits the panel with a one-pixel quiet zone. The text is always
//! encoded in byte mode as UTF-8.

use qrcodegen_no_heap::{QrCode, QrCodeEcc, Version};

use qrclock_core::display::SymbolBitmap;
use qrclock_core::traits::SymbolEncoder;

const VERSION: Version = Version::new(3);
const BUFFER_LEN: usize = VERSION.buffer_len();

pub struct QrEncoder {
    data: [u8; BUFFER_LEN],
    out: [u8; BUFFER_LEN],
}

impl QrEncoder {
    pub const fn new() -> Self {
        Self {
            data: [0; BUFFER_LEN],
            out: [0; BUFFER_LEN],
        }
    }
}

impl SymbolEncoder for QrEncoder {
    fn encode(&mut self, text: &str) -> Option<SymbolBitmap> {
        let bytes = text.as_bytes();
        self.data.get_mut(..bytes.len())?.copy_from_slice(bytes);

        let qr = QrCode::encode_binary(
            &mut self.data,
            bytes.len(),
            &mut self.out,
            QrCodeEcc::Medium,
            VERSION,
            VERSION,
            None,
            false,
        )
        .ok()?;

        let size = usize::try_from(qr.size()).ok()?;
        let mut symbol = SymbolBitmap::new(size)?;
        for y in 0..size {
            for x in 0..size {
                if qr.get_module(x as i32, y as i32) {
                    symbol.set(x, y);
                }
            }
        }
        Some(symbol)
    }
}

//! QR symbol encoder trait

use crate::display::SymbolBitmap;

/// Text-to-QR encoder
pub trait SymbolEncoder {
    /// Encode `text`, or `None` if it does not fit the symbol version
    /// and error correction level the encoder was built for
    fn encode(&mut self, text: &str) -> Option<SymbolBitmap>;
}

//! Display composition for the 32×32 two-plane panel
//!
//! The panel is driven by 16 TM1640 chips, each owning an 8×8 tile.
//! Every pixel has two independent LED planes: plane A (red) and
//! plane B (green). Lighting both shows orange.
//!
//! Composition happens in three layers:
//!
//! ```text
//! renderers ──► LogicalMatrix ──(AddressMap)──► PhysicalFrame ──► TM1640 chain
//!  (text,        [row][col]                      [chip][plane]
//!   hands, QR)    two bools                       64-bit words
//! ```

pub mod address;
pub mod analog;
pub mod font;
pub mod frame;
pub mod matrix;
pub mod qr;

pub use address::{AddressMap, PixelAddress};
pub use frame::PhysicalFrame;
pub use matrix::{Cell, LogicalMatrix, Plane};
pub use qr::{draw_symbol, SymbolBitmap};

/// Panel edge length in pixels
pub const PANEL_SIZE: usize = 32;

/// Edge length of the tile owned by one driver chip
pub const TILE_SIZE: usize = 8;

/// Number of driver chips on the shared clock line
pub const CHANNEL_COUNT: usize = 16;

/// Number of color planes per pixel
pub const PLANE_COUNT: usize = 2;

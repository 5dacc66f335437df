//! Rotary encoder input
//!
//! Raw pin samples pass through a [`DebounceFilter`] per pin. Edges on
//! the two phase pins drive the half-step [`QuadratureDecoder`], and a
//! falling edge on the push pin is a press. Results are latched in
//! [`PendingEvents`] until the consumer takes them.

pub mod aggregator;
pub mod debounce;
pub mod events;
pub mod quadrature;

pub use aggregator::{InputAggregator, PinSample};
pub use debounce::{DebounceFilter, Edge, Level};
pub use events::{PendingEvents, RefreshFlag};
pub use quadrature::{Direction, QuadratureDecoder, RotaryState};

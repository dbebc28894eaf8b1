pub mod bounds;
pub mod point;
pub mod precision;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use point::*;
pub use precision::*;
pub use time::*;

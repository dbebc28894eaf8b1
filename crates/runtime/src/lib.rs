pub mod clock;
pub mod notice;

pub use clock::*;
pub use notice::*;

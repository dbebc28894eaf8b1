pub mod defaults;
pub mod storage;
pub mod store;

pub use defaults::*;
pub use storage::*;
pub use store::*;

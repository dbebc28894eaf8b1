pub mod command;
pub mod config;
pub mod event;
pub mod state;
pub mod widget;

pub use command::*;
pub use config::*;
pub use event::*;
pub use state::*;
pub use widget::*;

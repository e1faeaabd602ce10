pub mod live;
pub mod ports;
pub mod services;
pub mod state;
pub mod view;

pub use live::*;
pub use ports::*;
pub use state::*;
pub use view::*;

pub mod entities;
pub mod ports;
pub mod subscription;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use subscription::*;
pub use value_objects::*;

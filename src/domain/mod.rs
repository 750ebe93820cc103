pub mod entity;
pub mod game;
pub mod pitch;
pub mod shot;

pub use entity::*;
pub use game::*;
pub use pitch::*;
pub use shot::*;

pub mod health;
pub mod movement;
pub mod projectiles;

pub use health::*;
pub use movement::*;
pub use projectiles::*;

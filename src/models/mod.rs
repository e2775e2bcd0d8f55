pub mod condition;
pub mod constraint;
pub mod entity;
pub mod judge;

pub use condition::*;
pub use constraint::*;
pub use entity::*;
pub use judge::*;

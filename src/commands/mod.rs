pub mod compare;
pub mod plans;
pub mod reference;

pub use compare::*;
pub use plans::*;
pub use reference::*;

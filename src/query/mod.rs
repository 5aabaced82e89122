pub mod matcher;
pub mod render;

pub use matcher::*;
pub use render::*;

pub mod error;
pub mod post;

pub use error::*;
pub use post::*;

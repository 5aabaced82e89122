pub mod exact;
pub mod priority;
pub mod range;

pub use exact::ExactIndex;
pub use priority::PriorityIndex;
pub use range::{RangeIndex, RangeIter};

pub mod conversion;
pub mod definition;
pub mod ordered;

pub use conversion::*;
pub use definition::*;
pub use ordered::OrderedMap;

pub mod blog;
pub mod shopping;
pub mod summary;
pub mod trend;

pub use blog::*;
pub use shopping::*;
pub use summary::*;
pub use trend::*;

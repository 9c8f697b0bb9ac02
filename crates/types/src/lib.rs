pub mod address;
pub mod amount;

pub use address::*;
pub use amount::*;

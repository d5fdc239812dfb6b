// Utils compartidos

pub mod browser;
pub mod constants;

pub use browser::*;
pub use constants::*;

pub mod export;
pub mod formatter;
pub mod histogram;

pub use export::*;
pub use formatter::*;
pub use histogram::*;

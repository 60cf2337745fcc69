//! Setting handlers for the configuration keys.

pub mod boolean;
pub mod number;
pub mod simple;

pub use boolean::*;
pub use number::*;
pub use simple::*;

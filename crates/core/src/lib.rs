mod allocate;
mod copy;
mod orchestrate;
mod sanitize;
mod validate;

pub use self::allocate::*;
pub use self::copy::*;
pub use self::orchestrate::*;
pub use self::sanitize::*;
pub use self::validate::*;

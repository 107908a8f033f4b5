//! Handler modules

pub mod health;
pub mod identity;
pub mod lists;
pub mod recipes;

pub use health::*;
pub use identity::CurrentUser;
pub use lists::*;
pub use recipes::*;

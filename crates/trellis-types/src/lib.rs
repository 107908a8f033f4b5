pub mod content;
pub mod execution;
pub mod feature;
pub mod notify;
pub mod recipe;
pub mod security;
pub mod site;

pub use content::*;
pub use execution::*;
pub use feature::*;
pub use notify::*;
pub use recipe::*;
pub use security::*;
pub use site::*;

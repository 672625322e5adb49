pub mod dll;
pub mod list;
pub mod set;

pub use dll::{Dll, DllError};
pub use list::List;
pub use set::Set;

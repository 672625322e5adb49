pub mod collections;
pub mod either;
pub mod fun;
pub mod monoid;
pub mod option;
pub mod pair;
pub mod process;
pub mod render;
pub mod servers;
pub mod state;

pub use either::{Either, Exception};
pub use fun::Fun;
pub use monoid::Monoid;
pub use pair::Pair;
pub use process::Process;
pub use state::{StateData, StatefulFun};

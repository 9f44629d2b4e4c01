pub mod areas;
pub mod event;
pub mod eventful;
pub mod storage;
pub mod value;

pub use areas::*;
pub use event::*;
pub use eventful::*;
pub use storage::*;
pub use value::*;

pub mod frontend;
pub mod playlist;

pub use frontend::*;
pub use playlist::*;

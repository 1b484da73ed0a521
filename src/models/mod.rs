pub mod item;
pub mod day_key;
pub mod time;
pub mod notification;
pub mod directory;

pub use item::*;
pub use day_key::*;
pub use time::*;
pub use notification::*;

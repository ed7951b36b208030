mod cursor;
mod tree;

pub use cursor::Cursor;
pub use tree::{IntoIter, Iter};

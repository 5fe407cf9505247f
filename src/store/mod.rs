pub mod collection;
pub mod connection;
pub mod handle;
pub mod schema;

pub use collection::{Collection, Direction, Filter};
pub use connection::Store;
pub use handle::SharedStore;

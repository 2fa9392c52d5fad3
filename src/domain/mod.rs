// Domain layer: the Address value type. No I/O, only std/serde.

pub mod address;

pub use address::{Address, MAX_PORT};

mod connection;
mod record;

pub use connection::*;
pub use record::*;

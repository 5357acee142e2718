//! The box-and-glue layout engine: dimensional resolution (`hpack`/`vpack`) and the `ship`
//! traversal that turns a packed tree into a stream of draw calls.

pub mod constants;
pub mod pack;
pub mod ship;

pub use pack::{hpack, vpack, PackMode};
pub use ship::ship;

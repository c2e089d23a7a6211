pub mod curve;
pub mod derive;
pub mod ecdh;
pub mod keys;
pub mod tweak;

pub use curve::*;
pub use derive::*;
pub use ecdh::*;
pub use keys::*;
pub use tweak::*;

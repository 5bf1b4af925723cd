pub mod address;
pub mod decode;
pub mod error;

pub mod prelude {
    pub use super::address::{StunAddress, prepare_addresses};
    pub use super::decode::parse_input;
    pub use super::error::InputError;
}

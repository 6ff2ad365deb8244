pub mod error;
pub mod logging;
pub mod nasa_client;

#[cfg(test)]
pub mod test_utils;

pub use error::*;
pub use nasa_client::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Key unit {unit:#x} at position {position} does not fit in a byte")]
    InvalidKey { unit: u32, position: usize },
    #[error("Key is not present in the trie")]
    KeyNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;

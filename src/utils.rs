use std::path::Path;

use memchr::memchr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    MiniJinja(#[from] minijinja::Error),
    #[error("unrecognized template option: '{0}'")]
    UnrecognizedOption(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn is_binary_buf(buf: &[u8]) -> bool {
    memchr(0u8, buf).is_some()
}

pub(crate) fn path_to_string<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .to_str()
        .expect("path encoding should be utf-8")
        .to_string()
}

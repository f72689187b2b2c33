use error::ProbeError;

pub mod backend;
pub mod collector;
pub mod dnf;
pub mod error;
pub mod mapper;
pub mod output;
pub mod record;
pub mod yum;

#[cfg(test)]
pub(crate) mod test_utils;

pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

//! CLI command implementations

pub(crate) mod info;
pub(crate) mod init;
pub(crate) mod migrate;
pub(crate) mod rollback;

mod build;
mod init;

pub use build::cmd_build;
pub use init::cmd_init;

pub mod init;
pub mod opts;
pub mod render;
pub mod validate;
pub mod write;

pub mod check;
pub mod init;
pub mod show;
pub mod take;
pub mod validate;

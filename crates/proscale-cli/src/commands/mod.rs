pub mod decide;
pub mod init;
pub mod simulate;

//! Plain (unencrypted) archiving collaborators.
//!
//! - **gzip**: single-file compression with the file name in the header
//! - **tarball**: packing a file or directory tree, and unpacking it safely

pub mod gzip;
pub mod tarball;

pub use gzip::{gunzip_file, gzip_file};
pub use tarball::{tar_path, untar};

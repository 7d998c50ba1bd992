use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

pub(super) fn open_read_only(path: &Path) -> io::Result<File> {
    OpenOptions::new().read(true).open(path)
}

mod access_line;

pub use access_line::{quote, AccessLine, Request, DEFAULT_STATUS};

//! Canonical names of the built-in tools.
//!
//! Agent definitions reference tools by these names; the infrastructure
//! executor routes on them.

pub const GET_DIRECTORY_STRUCTURE: &str = "get_directory_structure";
pub const READ_FILE: &str = "read_file";
pub const READ_FILE_CHUNK: &str = "read_file_chunk";
pub const RECORD_NOTES: &str = "record_notes";
pub const SEARCH_WEB: &str = "search_web";
pub const WRITE_README: &str = "write_readme";
pub const REVIEW_README: &str = "review_readme";

/// All built-in tool names.
pub const ALL: [&str; 7] = [
    GET_DIRECTORY_STRUCTURE,
    READ_FILE,
    READ_FILE_CHUNK,
    RECORD_NOTES,
    SEARCH_WEB,
    WRITE_README,
    REVIEW_README,
];

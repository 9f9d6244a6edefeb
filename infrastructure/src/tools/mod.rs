//! Tool implementations for the README crew.
//!
//! | Tool | Module | Used by |
//! |------|--------|---------|
//! | `get_directory_structure` | [`directory`] | ExplorerAgent |
//! | `read_file`, `read_file_chunk` | [`file`] | ExplorerAgent |
//! | `record_notes` | [`notes`] | ExplorerAgent |
//! | `search_web` | [`web_search`] | ResearcherAgent |
//! | `write_readme` | [`readme`] | WriterAgent |
//! | `review_readme` | [`review`] | ReviewerAgent |

pub mod directory;
pub mod file;
pub mod notes;
pub mod readme;
pub mod review;
pub mod web_search;

mod executor;
mod path;
mod schema;

pub use executor::LocalToolExecutor;
pub use review::ReadmeCritic;
pub use schema::JsonSchemaToolConverter;
pub use web_search::{SearchProvider, SearchSettings};

use crew_domain::tool::entities::ToolSpec;

/// Specification of every tool the crew can be granted.
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(directory::get_directory_structure_definition())
        .register(file::read_file_definition())
        .register(file::read_file_chunk_definition())
        .register(notes::record_notes_definition())
        .register(web_search::search_web_definition())
        .register(readme::write_readme_definition())
        .register(review::review_readme_definition())
}

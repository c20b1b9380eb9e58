mod page_file;
/// JSON serialization for pages and the pool.
pub use page_file::{LoadError, PageFile};

mod pool_file;
pub use pool_file::PoolFile;

mod path_parser;
pub use path_parser::{locator_from_path, path_from_locator, ParseError};

mod workspace;
pub use workspace::{
    AcceptResult, DanglingLink, FlushError, Mismatch, OpenError, StaleLink, Workspace,
    WorkspaceError,
};

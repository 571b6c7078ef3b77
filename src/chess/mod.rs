pub mod diagram;
pub mod directive;
pub mod document;
pub mod error;
pub mod formatter;
pub mod line;
pub mod log;
pub mod moves;
pub mod nag;
pub mod options;
pub mod reader;
pub mod types;
pub mod visitor;

pub use document::{Document, convert_file, output_path_for};
pub use error::{Error, Result};
pub use formatter::{ColorCycle, GameTreeFormatter};
pub use options::FormatOptions;
pub use reader::{PgnGames, expand_inputs};
pub use types::{Game, GameTree, MoveNode, NodeId};

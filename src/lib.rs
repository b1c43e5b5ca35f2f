pub mod cell;
pub mod config;
pub mod editor;
pub mod frontier;
pub mod grid;
pub mod layout;
pub mod reconstruct;
pub mod save_state;
pub mod search;

pub use cell::{Cell, CellState, Position, Role, Status};
pub use editor::Editor;
pub use grid::Grid;
pub use search::{run, Outcome, Phase, Search, SearchError, Step, Strategy};

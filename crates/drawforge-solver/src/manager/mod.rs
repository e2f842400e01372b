//! Drawing lifecycle management.
//!
//! The manager module provides:
//! - [`DrawManager`]: Runs a draw for a group and stores the resulting `Drawing`
//! - [`GroupRepository`] / [`DrawingRepository`]: Persistence seams
//! - [`InMemoryRepository`]: Both repositories behind mutexes, for tests and the CLI

mod draw_manager;
mod repository;


pub use draw_manager::{DrawError, DrawManager};
pub use repository::{
    DrawingRepository, GroupInput, GroupRepository, InMemoryRepository, RepositoryError,
};

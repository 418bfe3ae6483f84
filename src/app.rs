//! Application module: the browser context handed to the runtime.
//!
//! `Browser` lives in `app::model` and owns the library, the debounced query,
//! the search indexes and the navigation state.

mod model;

pub use model::*;

//! Records stored by the API and the request bodies that produce them.

mod category;
mod note;
mod todo;
pub use category::*;
pub use note::*;
pub use todo::*;

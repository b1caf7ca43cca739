//! Link management commands

mod add;
mod helpers;
mod list;
mod open;

pub use add::{add_link, batch_links};
pub use list::list_links;
pub use open::{open_link, show_link};

pub mod page;
pub mod panel;
pub mod sitemap;

pub use page::{Action, Item, JournalEntry, Page};
pub use panel::Panel;
pub use sitemap::{PageDescriptor, Sitemap};

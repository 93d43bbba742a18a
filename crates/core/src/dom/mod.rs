//! Document model: pages holding figures and text boxes.
//!
//! - `Figure`: an image on a page
//! - `TextBox`: a block of text with its upstream id
//! - `Page`: ordered content with id-based lookup
//! - `Document`: open file, converted pages and cached derived state

mod document;
mod figure;
mod page;
mod textbox;

pub use document::Document;
pub use figure::Figure;
pub use page::{Page, PageContent};
pub use textbox::TextBox;

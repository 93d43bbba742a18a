//! Finding text boxes relative to an anchor element.
//!
//! - `locator`: parsing of `text:` and `coords:` locators
//! - `options`: `Direction` and `FindOptions`
//! - `anchor`: the reference box of a lookup
//! - `search`: `Document::set_anchor_to_element` and `Document::find_text`

mod anchor;
pub mod locator;
pub mod options;
pub mod search;

pub use anchor::Anchor;
pub use locator::Locator;
pub use options::{Direction, FindOptions};
pub use search::{PIXEL_TOLERANCE, distance, is_eligible};

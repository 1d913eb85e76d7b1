//! UI Components
//!
//! Leptos components rendering the card.

mod card_body;
mod category_section;
mod category_select;
mod product_row;
mod search_box;

pub use card_body::CardBodyView;
pub use category_section::CategorySection;
pub use category_select::CategorySelect;
pub use product_row::ProductRow;
pub use search_box::SearchBox;

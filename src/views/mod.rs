pub mod list_item;

pub use list_item::{ActionEvent, ListItem, ListItemView, StatusIcon, Tone};

//! Item system
//!
//! Item categories, subtypes and instances placed by the generator.

mod item;

pub use item::{Color, Item, ItemClass, ItemSubtype};

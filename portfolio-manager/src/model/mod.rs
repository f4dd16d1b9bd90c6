pub mod line_item;
pub mod projection;

pub use line_item::LineItem;
pub use projection::ProjectedHolding;

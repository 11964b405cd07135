pub mod button;
pub mod confirm;
pub mod input;
pub mod spinner;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use button::*;
pub use confirm::*;
pub use input::*;
pub use spinner::*;

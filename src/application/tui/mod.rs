pub mod explorer_view;
pub mod render;
pub mod state;
pub mod text;
pub mod theme;

pub use explorer_view::*;
pub use state::*;
pub use text::*;
pub use theme::*;

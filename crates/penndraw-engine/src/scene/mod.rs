//! Retained scene (draw stream) types.
//!
//! Responsibilities:
//! - define the [`Renderer`] submission contract used by the drawing API
//! - store submitted primitives until they are explicitly released
//! - provide deterministic paint order (submission order)
//! - keep primitive payloads isolated per file under `scene::shapes`

mod cmd;
mod key;
mod list;
mod renderer;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::{PrimitiveHandle, PrimitiveKey};
pub use list::{DrawItem, DrawList};
pub use renderer::Renderer;
pub use shapes::fill::FillCmd;
pub use shapes::line::LineCmd;
pub use shapes::stroke::StrokeCmd;
pub use shapes::text::{HorizontalAnchor, TextCmd};

//! Presentation layer
//!
//! Turns a level into plain draw data: sprite instances and debug outline
//! vertices. Uploading them to a GPU is left to the host application.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{DrawCommand, channel_color, entity_color};
pub use vertex::{DrawInstance, Vertex, colors};

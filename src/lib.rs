pub mod cli;
pub mod contents_json;
pub mod error;
pub mod icon_gen;
pub mod png_encoder;

pub use contents_json::IconSpec;
pub use error::ManifestError;
pub use icon_gen::{generate_icons, GeneratorConfig};
pub use png_encoder::Color;

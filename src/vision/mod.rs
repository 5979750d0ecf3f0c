// Vision (text+image) support

mod models;
mod translation;

pub use models::{validate_image_size, ImageFormat, MAX_IMAGE_BYTES};
pub use translation::encode_image;

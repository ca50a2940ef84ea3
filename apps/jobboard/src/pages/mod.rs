pub mod handlers;
pub mod landing;
pub mod views;

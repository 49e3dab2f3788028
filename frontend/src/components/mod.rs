pub mod chat_widget;
pub mod landing;

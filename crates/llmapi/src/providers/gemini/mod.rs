mod api;
pub mod models;

pub use api::{
    convert_body_parts_gemini, convert_messages_to_gemini_contents, first_text_part,
    send_generate_request,
};

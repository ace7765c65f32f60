pub mod chat_box;
pub mod input_bar;
pub mod loader;
pub mod message_bubble;
pub mod prompt_bar;

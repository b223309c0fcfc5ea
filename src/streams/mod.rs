pub mod chunked_buffer_input;
pub mod file_buffer_input;
pub mod slice_input;

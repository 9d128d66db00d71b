pub mod pet_writer;
pub mod request_reader;

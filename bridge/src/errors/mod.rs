pub mod synthesis_error;

pub mod console;
pub mod shutdown;

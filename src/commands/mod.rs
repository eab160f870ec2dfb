pub mod check;

pub use check::execute_check;

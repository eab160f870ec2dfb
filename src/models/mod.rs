pub mod response;

pub use response::ObservedResponse;

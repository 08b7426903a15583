pub mod labeler_mock;

pub use labeler_mock::*;

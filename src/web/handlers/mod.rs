pub mod compare;
pub mod funds;
pub mod storage;
pub mod upload;

pub mod clock;
pub mod markdown;
pub mod storage;

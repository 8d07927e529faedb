pub mod prizes;
pub mod spin_records;

pub use prizes as prize_entity;
pub use spin_records as spin_record_entity;

pub use prizes::PrizeKind;

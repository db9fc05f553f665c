pub mod posting_dto;
pub mod telegram_dto;

pub mod i18n;
pub mod render;
pub mod time;
pub mod validation;

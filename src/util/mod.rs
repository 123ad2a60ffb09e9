pub mod whatsapp;
pub mod logger;
pub mod error;

//! Domain types, collaborator traits and the ingestion/dispatch service.

pub mod error;
pub mod ports;
pub mod service;
pub mod taker;

pub use error::{fatal, is_fatal, AppResult, Fatal, StoreError};
pub use ports::{EmailSender, IdSet, TakerApi, TakerQueue};
pub use service::ThanksService;
pub use taker::{EmailAddress, EmailMessage, Taker, TakerId, MIN_PASSING_PERCENT};

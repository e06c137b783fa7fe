//! Infrastructure layer: concrete implementations of the domain interfaces
//! and the wire/HTTP data transfer objects.

pub mod dto;
pub mod message_pusher;
pub mod repository;

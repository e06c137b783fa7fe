//! Registry implementations.

mod inmemory;

pub use inmemory::InMemoryRoomRegistry;

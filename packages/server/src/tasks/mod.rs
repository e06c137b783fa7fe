//! Long-running periodic tasks: the simulated-participant drivers and the
//! room expiry sweeper. Both run for the lifetime of the process and
//! serialize their mutations through the same registry as the connection
//! handlers.

pub mod bots;
pub mod sweeper;

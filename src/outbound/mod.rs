//! Outbound adapters: persistence, external statistics source, reverse
//! geocoding, generative chat, and the background job queue.

pub mod chat;
pub mod datagov;
pub mod geocode;
pub mod persistence;
pub mod queue;

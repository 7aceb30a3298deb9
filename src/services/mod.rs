//! Services for the kelner client.

mod classify;

pub use classify::ClassificationService;

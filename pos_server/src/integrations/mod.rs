//! Adapters between the engine's [`PaymentsGateway`](pos_engine::PaymentsGateway) contract and concrete payments
//! platforms.
pub mod square;

pub use square::SquareGateway;

//! Generic finite-state runtime shared by enemy and player brains.

pub mod machine;


pub use machine::{Phase, State, StateChange, StateLabel, StateMachine, Transition};

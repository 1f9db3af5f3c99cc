use core::fmt::Debug;

use displaydoc::Display;

pub struct WrappedError<T: Debug>(pub T);

#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum Errors {
    //////////
    // Generic
    //////////
    /// Size of vec/array does not match (expected: {0}, found: {1})
    LengthMismatch(usize, usize),
    /// Value out of range (max: {0}, found: {1})
    ValueOutOfRange(u64, u64),

    //////////
    // Permutation parameters
    //////////
    /// Lane size must be one of 1, 2, 4, 8, 16, 32 or 64 (found: {0})
    InvalidLaneSize(u32),
    /// Width must be one of 25, 50, 100, 200, 400, 800 or 1600 (found: {0})
    InvalidWidth(u32),
    /// States have different lane sizes (expected: {0}, found: {1})
    LaneSizeMismatch(u32, u32),

    //////////
    // Search parameters
    //////////
    /// Number of rounds must be at least 1 (found: {0})
    InvalidRoundCount(u32),
    /// Maximum number of trails to report must be at least 1 (found: {0})
    InvalidTrailCount(usize),
    /// Number of worker threads must be at least 1 (found: {0})
    InvalidThreadCount(usize),
    /// Trail kind is not known, expected 'differential' or 'linear' (found: {0})
    UnknownTrailKind(String),
    /// Worker thread pool could not be created
    ThreadPoolCreationFailure,

    //////////
    // Trails
    //////////
    /// Weight of round {0} is not attainable (expected: {1}, found: {2})
    TrailWeightMismatch(usize, u32, u32),
    /// Active row count of round {0} does not match its state (expected: {1}, found: {2})
    ActiveRowsMismatch(usize, u32, u32),
    /// Round {0} holds a transition that the nonlinear step cannot produce
    IncompatibleTransition(usize),
    /// Round {0} is not connected to the previous round by the linear layer
    BrokenDiffusion(usize),
    /// Theta-gap of round {0} does not match its state
    ThetaGapMismatch(usize),
    /// Round {0} is missing a state snapshot
    MissingSnapshot(usize),
    /// Round has neither the input nor the output of the nonlinear step
    EmptyRound,
    /// Trail has no rounds
    EmptyTrail,
}

impl std::error::Error for Errors {}

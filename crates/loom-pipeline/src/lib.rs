//! Loom Pipeline - Batch Transformation Runner
//!
//! Applies one transformation across a node set against the generation
//! service:
//! - Strictly sequential steps with a fixed inter-call delay (the upstream
//!   service enforces rate limits; do not parallelize without revisiting
//!   that contract)
//! - Per-node failure isolation: a failed step is logged and the run
//!   continues
//! - Progress observable as `"{completed}/{total}"` after every step
//! - Caller-supplied abort signal checked between steps (an in-flight
//!   generation call is not preempted)
//!
//! The [`GenerationGateway`] trait is the collaborator boundary: retry and
//! timeout policy live behind it, not here.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod action;
pub mod gateway;
pub mod runner;

pub use action::{InstructionAction, TransformAction};
pub use gateway::{GatewayError, GenerationGateway, GenerationRequest, ResponseFormat};
pub use runner::{
    AbortSignal, BatchPipelineRunner, BatchSummary, Progress, StepResult, StepStatus,
    TransformationError, STEP_DELAY,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

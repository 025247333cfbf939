//! The sequential batch runner

use crate::action::TransformAction;
use crate::gateway::{GatewayError, GenerationGateway};
use futures::Stream;
use loom_graph::{GraphStore, NodeId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fixed delay between consecutive generation calls
///
/// Upstream rate-limit contract; not a tunable performance knob.
pub const STEP_DELAY: Duration = Duration::from_millis(500);

/// Caller-supplied abort signal, checked between steps
///
/// Cloning shares the signal. Aborting never preempts an in-flight
/// generation call; the run ends after the current step.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    flag: Arc<AtomicBool>,
}

impl AbortSignal {
    /// Create an un-aborted signal
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request abort
    #[inline]
    pub fn abort(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether abort was requested
    #[inline]
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Per-node failure within a batch
///
/// Isolated by contract: logged, reported in the step result, never aborts
/// the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformationError {
    /// The node disappeared between selection and execution
    #[error("node missing: {0}")]
    NodeMissing(NodeId),

    /// The generation call failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Step status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    Failure,
}

/// Batch progress after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Steps finished so far
    pub completed: usize,
    /// Nodes supplied to the batch
    pub total: usize,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// Outcome of one batch step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Node the step ran against
    pub node_id: NodeId,
    /// Success or failure
    pub status: StepStatus,
    /// Generation output on success
    pub output: Option<String>,
    /// Failure cause on failure
    pub error: Option<TransformationError>,
    /// Progress after this step
    pub progress: Progress,
}

impl StepResult {
    /// Whether the step succeeded
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Success
    }
}

/// Collected outcome of a whole batch
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Nodes supplied to the batch
    pub requested: usize,
    /// Step results, in execution order
    pub results: Vec<StepResult>,
    /// Whether the run ended on an abort signal
    pub aborted: bool,
}

impl BatchSummary {
    /// Number of successful steps
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of failed steps
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} succeeded", self.succeeded(), self.requested)?;
        if self.aborted {
            write!(f, " (aborted)")?;
        }
        Ok(())
    }
}

struct RunState {
    ids: std::vec::IntoIter<NodeId>,
    completed: usize,
    total: usize,
    signal: AbortSignal,
}

/// Applies one transformation across a node set, sequentially
#[derive(Clone)]
pub struct BatchPipelineRunner {
    gateway: Arc<dyn GenerationGateway>,
    step_delay: Duration,
}

impl BatchPipelineRunner {
    /// Create a runner over a gateway with the standard step delay
    #[must_use]
    pub fn new(gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            gateway,
            step_delay: STEP_DELAY,
        }
    }

    /// With a custom step delay
    #[inline]
    #[must_use]
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Run the transformation over `node_ids`, yielding one step result
    /// per visited node
    ///
    /// Steps execute strictly in supply order, one generation call per
    /// node, with the fixed delay between consecutive calls. A failed
    /// step yields a `Failure` result and the run continues. The abort
    /// signal is consulted before each step; once set, the stream ends
    /// and unvisited nodes produce no results.
    pub fn run<'a>(
        &'a self,
        store: &'a GraphStore,
        node_ids: Vec<NodeId>,
        action: &'a dyn TransformAction,
        signal: AbortSignal,
    ) -> impl Stream<Item = StepResult> + 'a {
        let total = node_ids.len();
        let state = RunState {
            ids: node_ids.into_iter(),
            completed: 0,
            total,
            signal,
        };

        futures::stream::unfold(state, move |mut state| async move {
            if state.signal.is_aborted() {
                tracing::info!(
                    completed = state.completed,
                    total = state.total,
                    "batch aborted between steps"
                );
                return None;
            }
            let node_id = state.ids.next()?;
            if state.completed > 0 {
                tokio::time::sleep(self.step_delay).await;
            }

            let result = self.execute_step(store, node_id, action).await;
            state.completed += 1;
            let progress = Progress {
                completed: state.completed,
                total: state.total,
            };
            match &result {
                Ok(_) => tracing::info!(progress = %progress, "batch step succeeded"),
                Err((_, err)) => {
                    tracing::warn!(progress = %progress, %err, "batch step failed");
                }
            }

            let step = match result {
                Ok((node_id, output)) => StepResult {
                    node_id,
                    status: StepStatus::Success,
                    output: Some(output),
                    error: None,
                    progress,
                },
                Err((node_id, error)) => StepResult {
                    node_id,
                    status: StepStatus::Failure,
                    output: None,
                    error: Some(error),
                    progress,
                },
            };
            Some((step, state))
        })
    }

    /// Run the batch to completion and fold the results
    pub async fn run_collect(
        &self,
        store: &GraphStore,
        node_ids: Vec<NodeId>,
        action: &dyn TransformAction,
        signal: AbortSignal,
    ) -> BatchSummary {
        use futures::StreamExt;

        let requested = node_ids.len();
        let results: Vec<StepResult> = self
            .run(store, node_ids, action, signal.clone())
            .collect()
            .await;
        let aborted = signal.is_aborted() && results.len() < requested;
        let summary = BatchSummary {
            requested,
            results,
            aborted,
        };
        tracing::info!(action = action.id(), %summary, "batch finished");
        summary
    }

    async fn execute_step(
        &self,
        store: &GraphStore,
        node_id: NodeId,
        action: &dyn TransformAction,
    ) -> Result<(NodeId, String), (NodeId, TransformationError)> {
        let Some(node) = store.get_node(&node_id) else {
            return Err((node_id.clone(), TransformationError::NodeMissing(node_id)));
        };
        let request = action.build_request(node);
        match self.gateway.generate(request).await {
            Ok(output) => Ok((node_id, output)),
            Err(err) => Err((node_id, TransformationError::Gateway(err))),
        }
    }
}

impl std::fmt::Debug for BatchPipelineRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchPipelineRunner")
            .field("step_delay", &self.step_delay)
            .finish_non_exhaustive()
    }
}

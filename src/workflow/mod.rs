//! Two-phase project workflow.
//!
//! `setup` creates the repository and its branch skeleton (and seeds the
//! remote when one is bound). The caller then writes the boilerplate files.
//! `finalize` commits them on `dev` and spreads them to the feature branches,
//! pushing when a remote is bound.
//!
//! ```text
//! AwaitingSetup --setup ok--> AwaitingFinalize --finalize ok--> Done
//! ```
//!
//! A failed phase leaves the state where it was and the repository in
//! whatever shape the last successful step produced.

mod coordinator;
mod progress;
mod step;


pub use coordinator::{
    DEV_COMMIT_MESSAGE, MAIN_COMMIT_MESSAGE, Phase, State, Workflow, WorkflowPlan, WorkflowReport,
    check_preconditions,
};
pub use progress::{Progress, ProgressEvent, Worker, spawn_worker};
pub use step::{Sequencer, Step};

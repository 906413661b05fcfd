//! Tokio-spawn adapter for the sync job queue port.
//!
//! Each submitted job becomes a detached task on the runtime. The submitter
//! learns nothing beyond "accepted": completion and failure are recorded in
//! the sync audit log by the run itself, which is the lifecycle the status
//! endpoint reports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{JobDispatchError, SyncCommand, SyncJob, SyncJobQueue};

/// Queue adapter spawning each job onto the tokio runtime.
#[derive(Clone)]
pub struct TokioSyncJobQueue {
    sync: Arc<dyn SyncCommand>,
}

impl TokioSyncJobQueue {
    /// Create a queue executing jobs with the given sync service.
    pub fn new(sync: Arc<dyn SyncCommand>) -> Self {
        Self { sync }
    }
}

#[async_trait]
impl SyncJobQueue for TokioSyncJobQueue {
    async fn submit(&self, job: SyncJob) -> Result<(), JobDispatchError> {
        let sync = Arc::clone(&self.sync);
        tokio::spawn(async move {
            let result = match job {
                SyncJob::State {
                    state_name,
                    fin_year,
                } => sync.sync_state(&state_name, fin_year).await,
                SyncJob::Latest => sync.sync_latest().await,
            };
            match result {
                Ok(outcome) => info!(
                    run_id = %outcome.run_id,
                    record_count = outcome.record_count,
                    "background sync run finished"
                ),
                // The run already recorded its failure in the audit log;
                // this is the last place the error is visible.
                Err(run_error) => error!(error = %run_error, "background sync run failed"),
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockSyncCommand, SyncOutcome};
    use uuid::Uuid;

    /// Sync fixture that signals when a run starts and blocks until
    /// released, so the test can observe submit returning first.
    struct GatedSync {
        started: std::sync::Mutex<Option<tokio::sync::oneshot::Sender<()>>>,
        gate: std::sync::Mutex<Option<tokio::sync::oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl SyncCommand for GatedSync {
        async fn sync_state(
            &self,
            _state_name: &str,
            _fin_year: Option<String>,
        ) -> Result<SyncOutcome, crate::domain::Error> {
            unreachable!("test submits only latest jobs")
        }

        async fn sync_latest(&self) -> Result<SyncOutcome, crate::domain::Error> {
            if let Some(tx) = self.started.lock().expect("lock").take() {
                let _ = tx.send(());
            }
            let gate = self.gate.lock().expect("lock").take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(SyncOutcome {
                run_id: Uuid::new_v4(),
                record_count: 0,
                fin_year: None,
            })
        }
    }

    #[tokio::test]
    async fn submit_returns_before_the_run_finishes() {
        let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();
        let (finish_tx, finish_rx) = tokio::sync::oneshot::channel::<()>();

        let queue = TokioSyncJobQueue::new(Arc::new(GatedSync {
            started: std::sync::Mutex::new(Some(started_tx)),
            gate: std::sync::Mutex::new(Some(finish_rx)),
        }));
        queue
            .submit(SyncJob::Latest)
            .await
            .expect("submission should be accepted");

        // The job is running but not finished; submit has already returned.
        started_rx.await.expect("job should have started");
        let _ = finish_tx.send(());
    }

    #[tokio::test]
    async fn state_jobs_carry_their_filters() {
        let mut sync = MockSyncCommand::new();
        sync.expect_sync_state()
            .withf(|state_name, fin_year| {
                state_name == "MAHARASHTRA" && fin_year.as_deref() == Some("2025-2026")
            })
            .times(1)
            .returning(|_, _| {
                Ok(SyncOutcome {
                    run_id: Uuid::new_v4(),
                    record_count: 7,
                    fin_year: Some("2025-2026".to_owned()),
                })
            });

        let queue = TokioSyncJobQueue::new(Arc::new(sync));
        queue
            .submit(SyncJob::State {
                state_name: "MAHARASHTRA".to_owned(),
                fin_year: Some("2025-2026".to_owned()),
            })
            .await
            .expect("submission should be accepted");

        // Let the spawned task run to completion so the mock expectation is
        // checked.
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
}

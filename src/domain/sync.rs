//! Synchronization orchestration service.
//!
//! One run pages through the external statistics source and upserts every
//! record. Failure semantics are asymmetric by design: a single record's
//! persistence failure is logged and skipped, while a transport failure is
//! fatal to the run and recorded in the audit log before propagating.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::financial_year::FinancialYear;
use crate::domain::ports::{
    EmploymentIngestRepository, EmploymentStatisticsSource, StatisticsQuery, SyncCommand,
    SyncOutcome, SyncRunRepository, SyncRunRepositoryError, SyncRunType,
};
use crate::domain::record_mapping::to_observation_upsert;

/// Records requested per page.
const PAGE_SIZE: u64 = 1000;
/// Self-imposed pause between page requests, to stay inside the source's
/// rate limits.
const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Domain service driving sync runs against the statistics source.
#[derive(Clone)]
pub struct DataSyncService<S, I, L> {
    source: Arc<S>,
    ingest: Arc<I>,
    runs: Arc<L>,
    clock: Arc<dyn Clock>,
    page_delay: Duration,
}

impl<S, I, L> DataSyncService<S, I, L> {
    /// Create a new sync service.
    pub fn new(source: Arc<S>, ingest: Arc<I>, runs: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            ingest,
            runs,
            clock,
            page_delay: PAGE_DELAY,
        }
    }

    /// Override the inter-page pause. Tests set this to zero.
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }
}

impl<S, I, L> DataSyncService<S, I, L>
where
    S: EmploymentStatisticsSource,
    I: EmploymentIngestRepository,
    L: SyncRunRepository,
{
    async fn run(
        &self,
        run_type: SyncRunType,
        query: StatisticsQuery,
    ) -> Result<SyncOutcome, Error> {
        let run_id = self
            .runs
            .create_started(run_type, self.clock.utc())
            .await
            .map_err(map_run_log_error)?;

        match self.page_through(&query).await {
            Ok(record_count) => {
                self.runs
                    .mark_completed(run_id, record_count, self.clock.utc())
                    .await
                    .map_err(map_run_log_error)?;
                info!(
                    run_id = %run_id,
                    run_type = run_type.as_str(),
                    record_count,
                    "sync run completed"
                );
                Ok(SyncOutcome {
                    run_id,
                    record_count,
                    fin_year: query.fin_year,
                })
            }
            Err(error) => {
                if let Err(log_error) = self
                    .runs
                    .mark_failed(run_id, &error.to_string(), self.clock.utc())
                    .await
                {
                    warn!(
                        run_id = %run_id,
                        error = %log_error,
                        "failed to record sync failure in audit log"
                    );
                }
                Err(error)
            }
        }
    }

    /// Fetch pages until the source is exhausted, persisting each record in
    /// order. Returns the number of records processed.
    async fn page_through(&self, query: &StatisticsQuery) -> Result<u64, Error> {
        let mut offset = 0u64;
        let mut processed = 0u64;

        loop {
            let page = self
                .source
                .fetch_page(query, offset, PAGE_SIZE)
                .await
                .map_err(|error| Error::service_unavailable(error.to_string()))?;

            if page.records.is_empty() {
                break;
            }

            for raw in &page.records {
                let upsert = match to_observation_upsert(raw) {
                    Ok(upsert) => upsert,
                    Err(error) => {
                        warn!(error = %error, "skipping record without identity");
                        continue;
                    }
                };
                if let Err(error) = self.ingest.upsert_record(&upsert).await {
                    warn!(
                        district_code = %upsert.key.district_code,
                        fin_year = %upsert.key.fin_year,
                        month = %upsert.key.month,
                        error = %error,
                        "skipping record that failed to persist"
                    );
                }
            }
            processed += page.records.len() as u64;
            info!(
                offset,
                processed,
                total = page.total,
                "synced statistics page"
            );

            if offset + PAGE_SIZE >= page.total {
                break;
            }
            offset += PAGE_SIZE;

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(processed)
    }
}

#[async_trait]
impl<S, I, L> SyncCommand for DataSyncService<S, I, L>
where
    S: EmploymentStatisticsSource,
    I: EmploymentIngestRepository,
    L: SyncRunRepository,
{
    async fn sync_state(
        &self,
        state_name: &str,
        fin_year: Option<String>,
    ) -> Result<SyncOutcome, Error> {
        let state_name = state_name.trim();
        if state_name.is_empty() {
            return Err(Error::invalid_request("stateName must not be empty"));
        }

        info!(state_name, fin_year = ?fin_year, "starting state sync run");
        self.run(
            SyncRunType::State,
            StatisticsQuery {
                state_name: Some(state_name.to_owned()),
                fin_year,
            },
        )
        .await
    }

    async fn sync_latest(&self) -> Result<SyncOutcome, Error> {
        let fin_year = FinancialYear::containing(self.clock.utc()).label();
        info!(fin_year = %fin_year, "starting latest-year sync run");
        self.run(
            SyncRunType::Latest,
            StatisticsQuery {
                state_name: None,
                fin_year: Some(fin_year),
            },
        )
        .await
    }
}

fn map_run_log_error(error: SyncRunRepositoryError) -> Error {
    Error::service_unavailable(format!("failed to record sync run: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use mockall::predicate::eq;
    use rstest::rstest;
    use uuid::Uuid;

    use crate::domain::ports::{
        IngestRepositoryError, MockEmploymentIngestRepository, MockEmploymentStatisticsSource,
        MockSyncRunRepository, RawEmploymentRecord, StatisticsPage, StatisticsSourceError,
    };

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn fixed_clock(year: i32, month: u32) -> Arc<dyn Clock> {
        let instant = Utc
            .with_ymd_and_hms(year, month, 15, 10, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(FixtureClock { utc_now: instant })
    }

    fn raw_record(district_code: &str, month: &str) -> RawEmploymentRecord {
        RawEmploymentRecord {
            state_code: Some("18".to_owned()),
            state_name: Some("MAHARASHTRA".to_owned()),
            district_code: Some(district_code.to_owned()),
            district_name: Some("PUNE".to_owned()),
            fin_year: Some("2025-2026".to_owned()),
            month: Some(month.to_owned()),
            total_households_worked: Some("120".to_owned()),
            ..RawEmploymentRecord::default()
        }
    }

    fn page(len: usize, total: u64) -> StatisticsPage {
        StatisticsPage {
            records: (0..len)
                .map(|index| raw_record("1808", &format!("{:02}", index % 12 + 1)))
                .collect(),
            total,
        }
    }

    fn run_log_recording_completion() -> MockSyncRunRepository {
        let mut runs = MockSyncRunRepository::new();
        let run_id = Uuid::new_v4();
        runs.expect_create_started()
            .times(1)
            .returning(move |_, _| Ok(run_id));
        runs.expect_mark_completed()
            .times(1)
            .returning(|_, _, _| Ok(()));
        runs
    }

    fn service(
        source: MockEmploymentStatisticsSource,
        ingest: MockEmploymentIngestRepository,
        runs: MockSyncRunRepository,
        clock: Arc<dyn Clock>,
    ) -> DataSyncService<
        MockEmploymentStatisticsSource,
        MockEmploymentIngestRepository,
        MockSyncRunRepository,
    > {
        DataSyncService::new(Arc::new(source), Arc::new(ingest), Arc::new(runs), clock)
            .with_page_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn paginates_until_reported_total_is_reached() {
        let mut source = MockEmploymentStatisticsSource::new();
        for expected_offset in [0u64, 1000, 2000] {
            let len = if expected_offset == 2000 { 500 } else { 1000 };
            source
                .expect_fetch_page()
                .with(mockall::predicate::always(), eq(expected_offset), eq(1000))
                .times(1)
                .returning(move |_, _, _| Ok(page(len, 2500)));
        }

        let mut ingest = MockEmploymentIngestRepository::new();
        ingest.expect_upsert_record().times(2500).returning(|_| Ok(()));

        let svc = service(source, ingest, run_log_recording_completion(), fixed_clock(2026, 6));
        let outcome = svc
            .sync_state("MAHARASHTRA", Some("2025-2026".to_owned()))
            .await
            .expect("run should complete");
        assert_eq!(outcome.record_count, 2500);
    }

    #[tokio::test]
    async fn stops_on_first_empty_page() {
        let mut source = MockEmploymentStatisticsSource::new();
        source
            .expect_fetch_page()
            .times(1)
            .returning(|_, _, _| Ok(StatisticsPage::default()));

        let mut ingest = MockEmploymentIngestRepository::new();
        ingest.expect_upsert_record().never();

        let svc = service(source, ingest, run_log_recording_completion(), fixed_clock(2026, 6));
        let outcome = svc.sync_latest().await.expect("empty run should complete");
        assert_eq!(outcome.record_count, 0);
    }

    #[tokio::test]
    async fn one_failed_record_does_not_fail_the_run() {
        let mut source = MockEmploymentStatisticsSource::new();
        source.expect_fetch_page().times(1).returning(|_, _, _| {
            Ok(StatisticsPage {
                records: vec![
                    raw_record("1808", "01"),
                    raw_record("1809", "01"),
                    raw_record("1810", "01"),
                ],
                total: 3,
            })
        });

        let mut ingest = MockEmploymentIngestRepository::new();
        let mut call = 0usize;
        ingest.expect_upsert_record().times(3).returning(move |_| {
            call += 1;
            if call == 2 {
                Err(IngestRepositoryError::query("unique violation"))
            } else {
                Ok(())
            }
        });

        let svc = service(source, ingest, run_log_recording_completion(), fixed_clock(2026, 6));
        let outcome = svc
            .sync_state("MAHARASHTRA", None)
            .await
            .expect("run should still complete");
        assert_eq!(outcome.record_count, 3);
    }

    #[tokio::test]
    async fn records_without_identity_are_skipped_not_fatal() {
        let mut source = MockEmploymentStatisticsSource::new();
        source.expect_fetch_page().times(1).returning(|_, _, _| {
            let mut broken = raw_record("1808", "01");
            broken.district_code = None;
            Ok(StatisticsPage {
                records: vec![broken, raw_record("1809", "02")],
                total: 2,
            })
        });

        let mut ingest = MockEmploymentIngestRepository::new();
        ingest.expect_upsert_record().times(1).returning(|_| Ok(()));

        let svc = service(source, ingest, run_log_recording_completion(), fixed_clock(2026, 6));
        let outcome = svc.sync_latest().await.expect("run should complete");
        assert_eq!(outcome.record_count, 2);
    }

    #[tokio::test]
    async fn transport_failure_marks_run_failed_and_propagates() {
        let mut source = MockEmploymentStatisticsSource::new();
        source
            .expect_fetch_page()
            .times(1)
            .returning(|_, _, _| Err(StatisticsSourceError::transport("connection refused")));

        let ingest = MockEmploymentIngestRepository::new();

        let mut runs = MockSyncRunRepository::new();
        let run_id = Uuid::new_v4();
        runs.expect_create_started()
            .times(1)
            .returning(move |_, _| Ok(run_id));
        runs.expect_mark_failed()
            .with(
                eq(run_id),
                mockall::predicate::str::contains("connection refused"),
                mockall::predicate::always(),
            )
            .times(1)
            .returning(|_, _, _| Ok(()));
        runs.expect_mark_completed().never();

        let svc = service(source, ingest, runs, fixed_clock(2026, 6));
        let error = svc
            .sync_state("MAHARASHTRA", None)
            .await
            .expect_err("transport failure should propagate");
        assert!(error.to_string().contains("connection refused"));
    }

    #[rstest]
    #[case::april_onwards(2026, 7, "2026-2027")]
    #[case::before_april(2026, 2, "2025-2026")]
    #[tokio::test]
    async fn latest_mode_derives_financial_year_from_clock(
        #[case] year: i32,
        #[case] month: u32,
        #[case] expected: &str,
    ) {
        let expected_label = expected.to_owned();
        let mut source = MockEmploymentStatisticsSource::new();
        source
            .expect_fetch_page()
            .withf(move |query, _, _| {
                query.state_name.is_none() && query.fin_year.as_deref() == Some(expected_label.as_str())
            })
            .times(1)
            .returning(|_, _, _| Ok(StatisticsPage::default()));

        let ingest = MockEmploymentIngestRepository::new();
        let svc = service(source, ingest, run_log_recording_completion(), fixed_clock(year, month));
        let outcome = svc.sync_latest().await.expect("run should complete");
        assert_eq!(outcome.fin_year.as_deref(), Some(expected));
    }

    #[tokio::test]
    async fn blank_state_name_is_rejected_before_any_io() {
        let source = MockEmploymentStatisticsSource::new();
        let ingest = MockEmploymentIngestRepository::new();
        let mut runs = MockSyncRunRepository::new();
        runs.expect_create_started().never();

        let svc = service(source, ingest, runs, fixed_clock(2026, 6));
        let error = svc
            .sync_state("   ", None)
            .await
            .expect_err("blank name should be rejected");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    }
}

mod common;

use std::time::Duration;

use bridgejob_backend::models::posting::{Language, PostingStatus};
use bridgejob_backend::services::expiry_service::SweepReport;
use bridgejob_backend::utils::{render, time};
use chrono::Duration as ChronoDuration;
use common::{resume, vacancy, Harness, ADMIN_ID, AUTHOR_ID};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn posting_published_41_days_ago_is_archived_once() {
    let h = Harness::new();
    let old = h.published(vacancy()).await;
    let fresh = h.published(resume(Language::En)).await;
    let now = time::now();
    h.repo
        .backdate_publication(old.id, now - ChronoDuration::days(41))
        .await;
    h.repo
        .backdate_publication(fresh.id, now - ChronoDuration::days(39))
        .await;
    let old_message = old.publication.unwrap().channel_message_id;

    let report = h.state.expiry.sweep_at(now).await.unwrap();
    assert_eq!(report, SweepReport { archived: 1, failed: 0 });

    let old_now = h.state.postings.get(old.id).await.unwrap().posting;
    assert_eq!(old_now.status, PostingStatus::Archived);
    assert_eq!(h.publisher.deleted(), vec![old_message]);
    assert_eq!(
        h.transport.last_to(AUTHOR_ID).unwrap().text,
        render::removed_notice(&old_now)
    );

    let fresh_now = h.state.postings.get(fresh.id).await.unwrap().posting;
    assert_eq!(fresh_now.status, PostingStatus::Published);

    let again = h.state.expiry.sweep_at(now).await.unwrap();
    assert_eq!(again, SweepReport::default());
    assert_eq!(h.publisher.deleted().len(), 1);
}

#[tokio::test]
async fn sweep_ignores_everything_but_published() {
    let h = Harness::new();
    let pending = h.submit(vacancy()).await;
    let rejected = h.submit(vacancy()).await;
    h.state
        .postings
        .reject(rejected.id, ADMIN_ID, None)
        .await
        .unwrap();

    let far_future = time::now() + ChronoDuration::days(365);
    let report = h.state.expiry.sweep_at(far_future).await.unwrap();
    assert_eq!(report.archived, 0);

    let pending_now = h.state.postings.get(pending.id).await.unwrap().posting;
    assert_eq!(pending_now.status, PostingStatus::Pending);
}

#[tokio::test]
async fn max_age_comes_from_configuration() {
    let h = Harness::with_config(common::config_with(&[("POSTING_MAX_AGE_DAYS", "7")]));
    let posting = h.published(vacancy()).await;
    let now = time::now();
    h.repo
        .backdate_publication(posting.id, now - ChronoDuration::days(8))
        .await;

    let report = h.state.expiry.sweep_at(now).await.unwrap();
    assert_eq!(report.archived, 1);
}

#[tokio::test]
async fn run_loop_stops_on_cancellation() {
    let h = Harness::new();
    let shutdown = CancellationToken::new();
    let task = tokio::spawn(
        h.state
            .expiry
            .clone()
            .run(Duration::from_millis(10), shutdown.clone()),
    );

    tokio::time::sleep(Duration::from_millis(30)).await;
    shutdown.cancel();

    let finished = tokio::time::timeout(Duration::from_secs(1), task).await;
    assert!(matches!(finished, Ok(Ok(()))));
}

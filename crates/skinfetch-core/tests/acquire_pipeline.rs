//! Integration tests: resolver → fallback executor → cache → ledger, driven
//! through sweeps against an in-process image host.

mod common;

use common::mock_host::MockHost;
use skinfetch_core::acquire::{run_sweep, AcquireError, AcquireOutcome, Acquirer, FallbackExecutor};
use skinfetch_core::cache::ArtifactCache;
use skinfetch_core::control::RunControl;
use skinfetch_core::ledger::{AssetStatus, Ledger, StatusLedger};
use skinfetch_core::resolver::Resolver;
use skinfetch_core::retry::RetryPolicy;
use skinfetch_core::transcode::{JpegReencode, Passthrough, Transcode};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

const BASE: &str = "http://images.test/leagueoflegends/images";

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
    }
}

fn acquirer_with(
    ledger: &Ledger,
    host: Arc<MockHost>,
    transcoder: Arc<dyn Transcode>,
    artifacts: &Path,
) -> Arc<Acquirer> {
    let executor = FallbackExecutor::new(
        Arc::new(ledger.clone()),
        host,
        transcoder,
        ArtifactCache::new(artifacts),
    )
    .with_retry(fast_retry())
    .with_pacing(Duration::ZERO);
    Arc::new(Acquirer::new(Resolver::new(BASE), executor))
}

fn acquirer(ledger: &Ledger, host: Arc<MockHost>, artifacts: &Path) -> Arc<Acquirer> {
    acquirer_with(ledger, host, Arc::new(Passthrough), artifacts)
}

async fn wukong(dir: &Path) -> Ledger {
    common::seeded_ledger(dir, "MonkeyKing", "Wukong", &[(62001, 1, "Volcanic Wukong")]).await
}

fn candidate_urls(asset: &skinfetch_core::ledger::AssetRecord) -> Vec<String> {
    Resolver::new(BASE)
        .candidates(asset)
        .into_iter()
        .map(|c| c.url)
        .collect()
}

#[tokio::test]
async fn falls_back_to_third_name_and_records_success() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = wukong(state.path()).await;
    let asset = common::record(&ledger, 62001).await;

    let urls = candidate_urls(&asset);
    assert_eq!(urls.len(), 3);
    let host = Arc::new(MockHost::new().serve(&urls[2], b"splash"));

    let report = run_sweep(
        &ledger,
        acquirer(&ledger, Arc::clone(&host), artifacts.path()),
        4,
        Arc::new(RunControl::new()),
    )
    .await
    .unwrap();

    assert_eq!(report.total, 1);
    assert_eq!(report.downloaded, 1);
    assert_eq!(host.requests(), urls);
    let saved = artifacts.path().join("MonkeyKing_WukongVolcanic.jpg");
    assert_eq!(std::fs::read(saved).unwrap(), b"splash");
    assert!(!artifacts.path().join("Wukong_Volcanic.jpg").exists());
    assert!(!artifacts.path().join("Volcanic.jpg").exists());
    assert_eq!(std::fs::read_dir(artifacts.path()).unwrap().count(), 1);
    assert_eq!(
        ledger.get_status(62001).await.unwrap(),
        Some(AssetStatus::Succeeded)
    );
}

#[tokio::test]
async fn first_hit_stops_the_candidate_walk() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = wukong(state.path()).await;
    let asset = common::record(&ledger, 62001).await;
    let urls = candidate_urls(&asset);
    let host = Arc::new(
        MockHost::new()
            .serve(&urls[0], b"first")
            .serve(&urls[1], b"second"),
    );

    let outcome = acquirer(&ledger, Arc::clone(&host), artifacts.path())
        .acquire(&asset)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        AcquireOutcome::Downloaded {
            derived_name: "Wukong_Volcanic".to_string(),
            bytes: 5,
        }
    );
    assert_eq!(host.request_count(), 1);
}

#[tokio::test]
async fn second_sweep_makes_no_requests() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = wukong(state.path()).await;
    let asset = common::record(&ledger, 62001).await;
    let urls = candidate_urls(&asset);
    let host = Arc::new(MockHost::new().serve(&urls[0], b"splash"));
    let acq = acquirer(&ledger, Arc::clone(&host), artifacts.path());

    run_sweep(&ledger, Arc::clone(&acq), 2, Arc::new(RunControl::new()))
        .await
        .unwrap();
    assert_eq!(host.request_count(), 1);

    let again = run_sweep(&ledger, Arc::clone(&acq), 2, Arc::new(RunControl::new()))
        .await
        .unwrap();
    assert_eq!(again.total, 0);
    assert_eq!(host.request_count(), 1);

    // Even when handed the asset directly, the artifact on disk short-circuits.
    let outcome = acq.acquire(&common::record(&ledger, 62001).await).await.unwrap();
    assert!(matches!(outcome, AcquireOutcome::Cached { .. }));
    assert_eq!(host.request_count(), 1);
}

#[tokio::test]
async fn all_misses_exhaust_then_a_later_sweep_recovers() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = wukong(state.path()).await;
    let asset = common::record(&ledger, 62001).await;
    let urls = candidate_urls(&asset);

    let empty = Arc::new(MockHost::new().status(&urls[1], 403));
    let report = run_sweep(
        &ledger,
        acquirer(&ledger, Arc::clone(&empty), artifacts.path()),
        2,
        Arc::new(RunControl::new()),
    )
    .await
    .unwrap();
    assert_eq!(report.exhausted, 1);
    assert_eq!(empty.request_count(), 3);
    assert_eq!(
        ledger.get_status(62001).await.unwrap(),
        Some(AssetStatus::Exhausted)
    );
    assert!(std::fs::read_dir(artifacts.path()).unwrap().next().is_none());

    let fixed = Arc::new(MockHost::new().serve(&urls[1], b"late upload"));
    let report = run_sweep(
        &ledger,
        acquirer(&ledger, fixed, artifacts.path()),
        2,
        Arc::new(RunControl::new()),
    )
    .await
    .unwrap();
    assert_eq!(report.total, 1);
    assert_eq!(report.downloaded, 1);
    assert!(artifacts.path().join("Volcanic.jpg").is_file());
    assert_eq!(
        ledger.get_status(62001).await.unwrap(),
        Some(AssetStatus::Succeeded)
    );
}

#[tokio::test]
async fn existing_artifact_skips_the_network() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = common::seeded_ledger(state.path(), "Ahri", "Ahri", &[(103000, 0, "Original Ahri")]).await;
    std::fs::write(artifacts.path().join("Ahri_Original.jpg"), b"from an earlier run").unwrap();
    let host = Arc::new(MockHost::new());

    let report = run_sweep(
        &ledger,
        acquirer(&ledger, Arc::clone(&host), artifacts.path()),
        2,
        Arc::new(RunControl::new()),
    )
    .await
    .unwrap();

    assert_eq!(report.cached, 1);
    assert_eq!(host.request_count(), 0);
    assert_eq!(
        ledger.get_status(103000).await.unwrap(),
        Some(AssetStatus::Succeeded)
    );
}

#[tokio::test]
async fn transport_failure_leaves_the_asset_pending() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = wukong(state.path()).await;
    let asset = common::record(&ledger, 62001).await;
    let urls = candidate_urls(&asset);
    let host = Arc::new(MockHost::new().unreachable(&urls[1]));

    let err = acquirer(&ledger, Arc::clone(&host), artifacts.path())
        .acquire(&asset)
        .await
        .unwrap_err();
    match err.downcast_ref::<AcquireError>() {
        Some(AcquireError::AmbiguousExhaustion { asset_id, unreachable }) => {
            assert_eq!(*asset_id, 62001);
            assert_eq!(unreachable, &vec!["Volcanic".to_string()]);
        }
        other => panic!("expected ambiguous exhaustion, got {:?}", other),
    }
    // One try for each clean miss, two (retried) for the broken one.
    assert_eq!(host.request_count(), 4);
    assert_eq!(
        ledger.get_status(62001).await.unwrap(),
        Some(AssetStatus::Pending)
    );

    let report = run_sweep(
        &ledger,
        acquirer(&ledger, host, artifacts.path()),
        2,
        Arc::new(RunControl::new()),
    )
    .await
    .unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(
        ledger.get_status(62001).await.unwrap(),
        Some(AssetStatus::Pending)
    );
}

#[tokio::test]
async fn undecodable_payload_falls_through_to_next_name() {
    use image::{ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = wukong(state.path()).await;
    let asset = common::record(&ledger, 62001).await;
    let urls = candidate_urls(&asset);

    let mut png = Vec::new();
    RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]))
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .unwrap();
    let host = Arc::new(
        MockHost::new()
            .serve(&urls[0], b"<html>soft 404</html>")
            .serve(&urls[1], &png),
    );

    let outcome = acquirer_with(&ledger, host, Arc::new(JpegReencode::new(100)), artifacts.path())
        .acquire(&asset)
        .await
        .unwrap();

    assert_eq!(outcome.derived_name(), Some("Volcanic"));
    let saved = std::fs::read(artifacts.path().join("Volcanic.jpg")).unwrap();
    assert_eq!(&saved[..2], &[0xFF, 0xD8]);
    assert!(!artifacts.path().join("Wukong_Volcanic.jpg").exists());
}

#[tokio::test]
async fn sweep_respects_the_concurrency_bound() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let skins: Vec<(i64, i64, String)> = (1..=30)
        .map(|n| (62000 + n, n, format!("Skin{} Wukong", n)))
        .collect();
    let refs: Vec<(i64, i64, &str)> = skins.iter().map(|(a, b, c)| (*a, *b, c.as_str())).collect();
    let ledger = common::seeded_ledger(state.path(), "MonkeyKing", "Wukong", &refs).await;

    let mut host = MockHost::new().with_delay(Duration::from_millis(15));
    for (id, _, _) in &skins {
        let asset = common::record(&ledger, *id).await;
        host = host.serve(&candidate_urls(&asset)[0], b"img");
    }
    let host = Arc::new(host);

    let report = run_sweep(
        &ledger,
        acquirer(&ledger, Arc::clone(&host), artifacts.path()),
        5,
        Arc::new(RunControl::new()),
    )
    .await
    .unwrap();

    assert_eq!(report.downloaded, 30);
    assert!(host.peak_in_flight() <= 5, "peak {}", host.peak_in_flight());
    assert!(host.peak_in_flight() >= 2);
    assert_eq!(ledger.status_counts().await.unwrap().succeeded, 30);
}

#[tokio::test]
async fn stopped_run_admits_nothing() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = wukong(state.path()).await;
    let host = Arc::new(MockHost::new());
    let control = Arc::new(RunControl::new());
    control.request_stop();

    let report = run_sweep(
        &ledger,
        acquirer(&ledger, Arc::clone(&host), artifacts.path()),
        3,
        control,
    )
    .await
    .unwrap();

    assert_eq!(report.not_admitted, 1);
    assert_eq!(host.request_count(), 0);
    assert_eq!(
        ledger.status(62001).await.unwrap(),
        Some(AssetStatus::Pending)
    );
}

#[tokio::test]
async fn empty_candidate_list_is_exhausted() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = wukong(state.path()).await;
    let host = Arc::new(MockHost::new());
    let executor = FallbackExecutor::new(
        Arc::new(ledger.clone()),
        Arc::clone(&host) as Arc<dyn skinfetch_core::remote::RemoteHost>,
        Arc::new(Passthrough),
        ArtifactCache::new(artifacts.path()),
    )
    .with_retry(fast_retry())
    .with_pacing(Duration::ZERO);

    let outcome = executor.execute(62001, &[]).await.unwrap();

    assert_eq!(outcome, AcquireOutcome::Exhausted);
    assert_eq!(host.request_count(), 0);
    assert_eq!(
        ledger.get_status(62001).await.unwrap(),
        Some(AssetStatus::Exhausted)
    );
}

#[tokio::test]
async fn artifact_under_a_later_name_stops_the_walk_there() {
    let state = tempdir().unwrap();
    let artifacts = tempdir().unwrap();
    let ledger = wukong(state.path()).await;
    let asset = common::record(&ledger, 62001).await;
    let urls = candidate_urls(&asset);
    std::fs::write(
        artifacts.path().join("MonkeyKing_WukongVolcanic.jpg"),
        b"from an earlier run",
    )
    .unwrap();
    // Would be fetched if the walk went past the cached third name.
    let host = Arc::new(MockHost::new().serve(&urls[2], b"fresh"));

    let outcome = acquirer(&ledger, Arc::clone(&host), artifacts.path())
        .acquire(&asset)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        AcquireOutcome::Cached {
            derived_name: "MonkeyKing_WukongVolcanic".to_string(),
        }
    );
    assert_eq!(host.requests(), urls[..2].to_vec());
    assert_eq!(
        std::fs::read(artifacts.path().join("MonkeyKing_WukongVolcanic.jpg")).unwrap(),
        b"from an earlier run"
    );
    assert_eq!(
        ledger.get_status(62001).await.unwrap(),
        Some(AssetStatus::Succeeded)
    );
}

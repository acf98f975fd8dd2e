//! Orchestrator behavior against mocked supervision and admin boundaries.

use assert_matches::assert_matches;
use nodewarden_ensemble::{EnsembleConfig, EnsembleMember, Error, Reconfigurer};
use nodewarden_ensemble_mock::{MockAdminClient, MockSupervisor};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn member(id: u32, hostname: &str) -> EnsembleMember {
    EnsembleMember {
        id,
        hostname: hostname.to_string(),
        quorum_port: 2182,
        election_port: 2183,
        client_port: 2181,
    }
}

fn config(members: Vec<EnsembleMember>, dynamic_reconfiguration: bool) -> EnsembleConfig {
    EnsembleConfig {
        members,
        dynamic_reconfiguration,
    }
}

#[tokio::test]
async fn first_apply_starts_process_without_admin_calls() {
    init_tracing();
    let supervisor = MockSupervisor::new();
    let admin = MockAdminClient::new();
    let reconfigurer = Reconfigurer::new(supervisor.clone(), admin.clone());

    let initial = config(vec![member(1, "a"), member(2, "b")], true);
    reconfigurer.apply(initial.clone()).await.unwrap();

    assert!(reconfigurer.is_started().await);
    assert_eq!(supervisor.started(), vec![initial.clone()]);
    assert!(admin.connects().is_empty());
    assert_eq!(reconfigurer.current_config().await, Some(initial));
}

#[tokio::test]
async fn equal_config_is_a_no_op() {
    init_tracing();
    let admin = MockAdminClient::new();
    let reconfigurer = Reconfigurer::new(MockSupervisor::new(), admin.clone());

    let cfg = config(vec![member(1, "a")], true);
    reconfigurer.apply(cfg.clone()).await.unwrap();
    reconfigurer.apply(cfg.clone()).await.unwrap();

    assert!(admin.connects().is_empty());
    assert_eq!(reconfigurer.current_config().await, Some(cfg));
}

#[tokio::test]
async fn disabled_flag_skips_reconfiguration_but_records_config() {
    init_tracing();
    let admin = MockAdminClient::new();
    let reconfigurer = Reconfigurer::new(MockSupervisor::new(), admin.clone());

    reconfigurer
        .apply(config(vec![member(1, "a")], true))
        .await
        .unwrap();
    let changed = config(vec![member(1, "a"), member(2, "b")], false);
    reconfigurer.apply(changed.clone()).await.unwrap();

    assert!(admin.connects().is_empty());
    assert_eq!(reconfigurer.current_config().await, Some(changed));
}

#[tokio::test]
async fn changed_config_reconfigures_against_current_members() {
    init_tracing();
    let admin = MockAdminClient::new();
    let reconfigurer = Reconfigurer::new(MockSupervisor::new(), admin.clone());

    let initial = config(vec![member(1, "a"), member(2, "b"), member(3, "c")], true);
    let target = config(vec![member(2, "b"), member(3, "c"), member(4, "d")], true);
    reconfigurer.apply(initial).await.unwrap();
    reconfigurer.apply(target.clone()).await.unwrap();

    assert_eq!(admin.connects(), vec!["a:2181,b:2181,c:2181".to_string()]);

    let calls = admin.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].joining, "2=b:2182:2183,3=c:2182:2183,4=d:2182:2183");
    assert_eq!(calls[0].leaving, "1=a:2182:2183");
    assert_eq!(admin.closed_sessions(), 1);
    assert_eq!(reconfigurer.current_config().await, Some(target));
}

#[tokio::test]
async fn flag_toggle_alone_triggers_reconfiguration() {
    init_tracing();
    // Structural inequality includes the flag itself.
    let admin = MockAdminClient::new();
    let reconfigurer = Reconfigurer::new(MockSupervisor::new(), admin.clone());

    reconfigurer
        .apply(config(vec![member(1, "a")], false))
        .await
        .unwrap();
    reconfigurer
        .apply(config(vec![member(1, "a")], true))
        .await
        .unwrap();

    assert_eq!(admin.calls().len(), 1);
    assert_eq!(admin.calls()[0].joining, "1=a:2182:2183");
    assert_eq!(admin.calls()[0].leaving, "");
}

#[tokio::test]
async fn failed_reconfiguration_keeps_current_config() {
    init_tracing();
    let admin = MockAdminClient::failing_reconfigure();
    let reconfigurer = Reconfigurer::new(MockSupervisor::new(), admin.clone());

    let initial = config(vec![member(1, "a")], true);
    reconfigurer.apply(initial.clone()).await.unwrap();

    let target = config(vec![member(1, "a"), member(2, "b")], true);
    let err = reconfigurer.apply(target).await.unwrap_err();

    assert_matches!(err, Error::Reconfiguration(_));
    assert_eq!(reconfigurer.current_config().await, Some(initial));
    // The session still gets closed on the failure path.
    assert_eq!(admin.closed_sessions(), 1);
}

#[tokio::test]
async fn failed_connect_keeps_current_config() {
    init_tracing();
    let admin = MockAdminClient::failing_connect();
    let reconfigurer = Reconfigurer::new(MockSupervisor::new(), admin.clone());

    let initial = config(vec![member(1, "a")], true);
    reconfigurer.apply(initial.clone()).await.unwrap();

    let target = config(vec![member(2, "b")], true);
    let err = reconfigurer.apply(target).await.unwrap_err();

    assert_matches!(err, Error::Reconfiguration(_));
    assert_eq!(reconfigurer.current_config().await, Some(initial));
    assert_eq!(admin.closed_sessions(), 0);
}

#[tokio::test]
async fn failed_start_records_nothing() {
    init_tracing();
    let reconfigurer = Reconfigurer::new(MockSupervisor::failing(), MockAdminClient::new());

    let err = reconfigurer
        .apply(config(vec![member(1, "a")], true))
        .await
        .unwrap_err();

    assert_matches!(err, Error::Start(_));
    assert!(!reconfigurer.is_started().await);
    assert_eq!(reconfigurer.current_config().await, None);
}

#[tokio::test]
async fn process_is_started_once() {
    init_tracing();
    let supervisor = MockSupervisor::new();
    let reconfigurer = Reconfigurer::new(supervisor.clone(), MockAdminClient::new());

    reconfigurer
        .apply(config(vec![member(1, "a")], false))
        .await
        .unwrap();
    reconfigurer
        .apply(config(vec![member(2, "b")], false))
        .await
        .unwrap();

    assert_eq!(supervisor.started().len(), 1);
}

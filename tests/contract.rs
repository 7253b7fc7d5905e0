//! Contract conformance tests driven through a scripted gatherer

mod helper;

use helper::{ScriptedGatherer, Step, identifiers};
use version_gatherer::gatherer::binary::Binary;
use version_gatherer::gatherer::conformance::verify_gatherer;
use version_gatherer::gatherer::contract::VersionsGatherer;
use version_gatherer::gatherer::error::{GatherError, GathererError, MetaError};
use version_gatherer::gatherer::legacy::{BinaryVersionGatherer, LegacyAdapter};
use version_gatherer::gatherer::meta::GathererMeta;
use version_gatherer::gatherer::registry::GathererRegistry;

#[test]
fn results_are_empty_before_any_gather() {
    let gatherer = ScriptedGatherer::configured(vec![]);

    assert!(gatherer.versions().is_empty());
    assert_eq!(gatherer.latest_version(), None);
    assert_eq!(verify_gatherer(&gatherer), Ok(()));
}

#[tokio::test]
async fn gather_deduplicates_identifiers_and_latest_is_member() {
    let mut gatherer =
        ScriptedGatherer::configured(vec![Step::Found(vec!["v1.0", "v1.1", "v1.0", "v2.0"])]);

    gatherer.gather().await.unwrap();

    assert_eq!(identifiers(gatherer.versions()), vec!["v1.0", "v1.1", "v2.0"]);
    assert_eq!(gatherer.latest_version().unwrap().identifier, "v2.0");
    assert_eq!(verify_gatherer(&gatherer), Ok(()));
}

#[tokio::test]
async fn empty_gather_reports_no_latest_instead_of_failing() {
    let mut gatherer = ScriptedGatherer::configured(vec![Step::Found(vec![])]);

    gatherer.gather().await.unwrap();

    assert!(gatherer.versions().is_empty());
    assert_eq!(gatherer.latest_version(), None);
    assert_eq!(verify_gatherer(&gatherer), Ok(()));
}

#[tokio::test]
async fn second_gather_replaces_first_results() {
    let mut gatherer = ScriptedGatherer::configured(vec![
        Step::Found(vec!["v1.0", "v1.1"]),
        Step::Found(vec!["v1.1", "v1.2"]),
    ]);

    gatherer.gather().await.unwrap();
    gatherer.gather().await.unwrap();

    assert_eq!(identifiers(gatherer.versions()), vec!["v1.1", "v1.2"]);
    assert_eq!(gatherer.latest_version().unwrap().identifier, "v1.2");
}

#[tokio::test]
async fn failed_gather_keeps_previous_results() {
    let mut gatherer = ScriptedGatherer::configured(vec![
        Step::Found(vec!["v1.0", "v1.1"]),
        Step::Unreachable,
    ]);

    gatherer.gather().await.unwrap();
    let result = gatherer.gather().await;

    assert!(matches!(result, Err(GathererError::NotFound(name)) if name == "toolX"));
    assert_eq!(identifiers(gatherer.versions()), vec!["v1.0", "v1.1"]);
    assert_eq!(verify_gatherer(&gatherer), Ok(()));
}

#[tokio::test]
async fn failed_first_gather_leaves_results_empty() {
    let mut gatherer = ScriptedGatherer::configured(vec![Step::Unreachable]);

    assert!(gatherer.gather().await.is_err());

    assert!(gatherer.versions().is_empty());
    assert_eq!(gatherer.latest_version(), None);
}

#[tokio::test]
async fn gather_before_set_binary_is_not_configured() {
    let mut gatherer = ScriptedGatherer::new(vec![Step::Found(vec!["v1.0"])]);

    let result = gatherer.gather().await;

    assert!(matches!(result, Err(GathererError::NotConfigured("binary"))));
}

#[tokio::test]
async fn configuration_calls_chain() {
    let mut gatherer = ScriptedGatherer::new(vec![Step::Found(vec!["v1.0", "v2.0"])]);

    gatherer
        .set_binary(Binary::new("toolX"))
        .set_meta(&GathererMeta::parse("ORDER=first").unwrap())
        .unwrap()
        .gather()
        .await
        .unwrap();

    assert_eq!(gatherer.latest_version().unwrap().identifier, "v1.0");
}

#[tokio::test]
async fn registry_creates_configured_gatherers_by_name() {
    let mut registry = GathererRegistry::new();
    registry.register(|| {
        Box::new(ScriptedGatherer::new(vec![Step::Found(vec![
            "v1.0", "v1.1", "v2.0",
        ])]))
    });

    let mut gatherer = registry
        .create(
            "scripted",
            Binary::new("toolX"),
            &GathererMeta::parse("ORDER=last").unwrap(),
        )
        .unwrap();
    gatherer.gather().await.unwrap();

    assert_eq!(registry.names(), vec!["scripted"]);
    assert_eq!(gatherer.latest_version().unwrap().identifier, "v2.0");
    assert_eq!(verify_gatherer(gatherer.as_ref()), Ok(()));
}

#[test]
fn registry_surfaces_meta_errors_from_gatherer() {
    let mut registry = GathererRegistry::new();
    registry.register(|| Box::new(ScriptedGatherer::new(vec![])));

    let result = registry.create(
        "scripted",
        Binary::new("toolX"),
        &GathererMeta::parse("URL=http://example.test").unwrap(),
    );

    assert!(matches!(
        result,
        Err(GathererError::InvalidMeta(MetaError::UnknownKey(key))) if key == "URL"
    ));
}

#[tokio::test]
async fn legacy_adapter_skips_versions_older_than_last_known() {
    let mut adapter = LegacyAdapter::new(ScriptedGatherer::configured(vec![Step::Found(vec![
        "v0.9", "v1.0", "v1.1", "v2.0",
    ])]));

    adapter.gather(Some("v1.0")).await.unwrap();

    assert_eq!(identifiers(adapter.versions()), vec!["v1.0", "v1.1", "v2.0"]);
    assert_eq!(adapter.latest_version().unwrap().identifier, "v2.0");
}

#[tokio::test]
async fn legacy_adapter_without_last_known_keeps_everything() {
    let mut adapter = LegacyAdapter::new(ScriptedGatherer::configured(vec![Step::Found(vec![
        "v0.9", "v1.0",
    ])]));

    adapter.gather(None).await.unwrap();

    assert_eq!(identifiers(adapter.versions()), vec!["v0.9", "v1.0"]);
}

#[tokio::test]
async fn legacy_adapter_reports_no_latest_when_everything_is_filtered() {
    let mut adapter =
        LegacyAdapter::new(ScriptedGatherer::configured(vec![Step::Found(vec!["v0.9"])]));

    adapter.gather(Some("v1.0")).await.unwrap();

    assert!(adapter.versions().is_empty());
    assert_eq!(adapter.latest_version(), None);
}

#[tokio::test]
async fn legacy_adapter_keeps_inner_latest_choice() {
    let mut inner = ScriptedGatherer::configured(vec![Step::Found(vec!["v3.0", "v1.0", "v2.0"])]);
    inner
        .set_meta(&GathererMeta::parse("ORDER=last").unwrap())
        .unwrap();
    let mut adapter = LegacyAdapter::new(inner);

    adapter.gather(None).await.unwrap();

    assert_eq!(adapter.latest_version().unwrap().identifier, "v2.0");
}

#[tokio::test]
async fn legacy_adapter_translates_failures_and_keeps_results() {
    let mut adapter = LegacyAdapter::new(ScriptedGatherer::configured(vec![
        Step::Found(vec!["v1.0"]),
        Step::Unreachable,
    ]));

    adapter.gather(None).await.unwrap();
    let result = adapter.gather(Some("v1.0")).await;

    assert!(matches!(result, Err(GatherError::Fetch(_))));
    assert_eq!(identifiers(adapter.versions()), vec!["v1.0"]);
}

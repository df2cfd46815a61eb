/// Integration tests for the application layer
mod test_utilities;

use test_utilities::mocks::*;
use txe_quote::application::dto::{OptionsRequest, SmsChoice};
use txe_quote::ports::inbound::{CatalogRecord, ModelFilter, RecordFilter, RecordKind};
use txe_quote::prelude::*;

fn entry(model: &str, throughput: f64) -> ConfigurationRequest {
    ConfigurationRequest {
        model: Some(model.to_string()),
        throughput: Some(throughput),
        ..Default::default()
    }
}

fn parts(response: &QuoteResponse) -> Vec<&str> {
    response.lines.iter().map(|l| l.part.as_str()).collect()
}

#[tokio::test]
async fn test_generate_quote_happy_path() {
    let repository = MockCatalogRepository::builtin();
    let progress_reporter = MockProgressReporter::new();

    let use_case = GenerateQuoteUseCase::new(
        repository,
        progress_reporter.clone(),
        CompatibilityTable::builtin(),
    );

    let request = QuoteRequest::new(vec![
        ConfigurationRequest {
            name: Some("Branch".to_string()),
            slots: vec![Some("TPNN0412".to_string())],
            ..entry("txe-5600", 5.0)
        },
        ConfigurationRequest {
            name: Some("Core".to_string()),
            slots: vec![Some("TPNN0372".to_string()), Some("TPNN0371".to_string())],
            sms: Some(SmsChoice::Sku("TPNN0431".to_string())),
            ..entry("txe-9200", 100.0)
        },
    ]);

    let response = use_case.execute(request).await.unwrap();
    assert_eq!(
        parts(&response),
        vec![
            "TPNN0424", "TPNN0276", "TPNN0286", "TPNN0412", "TPNN0368", "TPNN0399",
            "TPNN0402", "TPNN0372", "TPNN0371", "TPNN0431"
        ]
    );
    assert!(response.warnings.is_empty());
    assert!(progress_reporter.warnings().is_empty());
    assert!(progress_reporter
        .get_messages()
        .iter()
        .any(|m| m == "Progress: 2/2 - Core"));
}

#[tokio::test]
async fn test_config_ids_follow_request_order() {
    let use_case = GenerateQuoteUseCase::new(
        MockCatalogRepository::builtin(),
        MockProgressReporter::new(),
        CompatibilityTable::builtin(),
    );
    let request = QuoteRequest::new(vec![
        ConfigurationRequest {
            sms: Some(SmsChoice::Enabled(true)),
            ..entry("txe-8600", 20.0)
        },
        entry("txe-8600", 20.0),
    ]);

    let response = use_case.execute(request).await.unwrap();
    let ids: Vec<Option<usize>> = response.lines.iter().map(|l| l.config_id).collect();
    assert_eq!(
        ids,
        vec![Some(1), Some(1), Some(1), Some(2), Some(2), Some(2), None]
    );
    assert!(response.lines.iter().all(|l| l.qty == 1));
    assert_eq!(response.lines[0].part, response.lines[3].part);
}

#[tokio::test]
async fn test_shared_license_is_accepted_on_9200() {
    let use_case = GenerateQuoteUseCase::new(
        MockCatalogRepository::builtin(),
        MockProgressReporter::new(),
        CompatibilityTable::builtin(),
    );
    let request = QuoteRequest::new(vec![entry("txe-9200", 40.0)]);

    let response = use_case.execute(request).await.unwrap();
    assert_eq!(parts(&response), vec!["TPNN0368", "TPNN0280", "TPNN0290"]);
}

#[tokio::test]
async fn test_invalid_picks_become_warnings() {
    let progress_reporter = MockProgressReporter::new();
    let use_case = GenerateQuoteUseCase::new(
        MockCatalogRepository::builtin(),
        progress_reporter.clone(),
        CompatibilityTable::builtin(),
    );
    let request = QuoteRequest::new(vec![ConfigurationRequest {
        name: Some("Edge".to_string()),
        slots: vec![Some("TPNN0372".to_string())],
        ..entry("txe-5600", 7.0)
    }]);

    let response = use_case.execute(request).await.unwrap();
    assert_eq!(response.warnings.len(), 2);
    assert!(response.warnings.iter().all(|w| w.starts_with("Edge: ")));
    assert_eq!(progress_reporter.warnings().len(), 2);
    // 0.25 Gbps tier kept; the 100GbE module never lands in a slot
    assert_eq!(parts(&response), vec!["TPNN0424", "TPNM0129", "TPNN0281"]);
}

#[tokio::test]
async fn test_empty_catalog_yields_empty_quote() {
    let progress_reporter = MockProgressReporter::new();
    let use_case = GenerateQuoteUseCase::new(
        MockCatalogRepository::empty(),
        progress_reporter.clone(),
        CompatibilityTable::builtin(),
    );

    let response = use_case
        .execute(QuoteRequest::new(vec![ConfigurationRequest::default()]))
        .await
        .unwrap();
    assert!(response.lines.is_empty());
    assert_eq!(response.configurations.len(), 1);
    assert!(progress_reporter
        .warnings()
        .iter()
        .any(|m| m.contains("catalog seed")));
}

#[tokio::test]
async fn test_repository_failure_propagates() {
    let use_case = GenerateQuoteUseCase::new(
        MockCatalogRepository::with_failure(),
        MockProgressReporter::new(),
        CompatibilityTable::builtin(),
    );
    let result = use_case.execute(QuoteRequest::default()).await;
    assert!(result.unwrap_err().to_string().contains("Mock catalog read failure"));
}

#[tokio::test]
async fn test_quote_renders_in_every_format() {
    let use_case = GenerateQuoteUseCase::new(
        MockCatalogRepository::builtin(),
        MockProgressReporter::new(),
        CompatibilityTable::builtin(),
    );
    let response = use_case
        .execute(QuoteRequest::new(vec![ConfigurationRequest {
            name: Some("Lab".to_string()),
            sms: Some(SmsChoice::Enabled(true)),
            ..entry("txe-8600", 15.0)
        }]))
        .await
        .unwrap();
    let model = QuoteReadModelBuilder::build(&response);

    let table = TableFormatter::new().format(&model).unwrap();
    assert!(table.starts_with("SKU "));
    assert!(table.contains("TPNN0425"));
    assert!(table.contains("TPNN0278"));

    let markdown = MarkdownFormatter::new().format(&model).unwrap();
    assert!(markdown.starts_with("# TippingPoint TXE Quote"));
    assert!(markdown.contains("## Bill of Materials"));
    assert!(markdown.contains("Lab"));

    let json = JsonFormatter::new().format(&model).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let lines = value["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["part"], "TPNN0425");
    assert_eq!(lines[0]["configId"], 1);
    assert!(lines[3].get("configId").is_none());
}

#[tokio::test]
async fn test_list_options_for_8600() {
    let use_case = ListOptionsUseCase::new(
        MockCatalogRepository::builtin(),
        CompatibilityTable::builtin(),
    );
    let response = use_case
        .execute(OptionsRequest::new("txe-8600".to_string(), Some(20.0), None))
        .await
        .unwrap();

    let bypass: Vec<&str> = response.bypass_modules.iter().map(|m| m.sku.as_str()).collect();
    for sku in ["TPNN0410", "TPNN0414", "TPNN0374", "TPNN0409"] {
        assert!(bypass.contains(&sku), "missing {}", sku);
    }
    assert!(!bypass.contains(&"TPNN0372"));
    assert_eq!(response.non_bypass_modules.len(), 2);
    assert!(response
        .inspect_licenses
        .iter()
        .all(|l| l.applies_to_gbps_max >= 20.0));
}

#[tokio::test]
async fn test_list_options_unknown_model() {
    let use_case = ListOptionsUseCase::new(
        MockCatalogRepository::builtin(),
        CompatibilityTable::builtin(),
    );
    let error = use_case
        .execute(OptionsRequest::new("txe-1100".to_string(), None, None))
        .await
        .unwrap_err();
    assert!(error.to_string().contains("Model with ID txe-1100 not found"));
}

#[test]
fn test_8600_modules_include_5600_modules() {
    let table = CompatibilityTable::builtin();
    let resolver = CompatibilityResolver::new(&table);
    let small = resolver.compatible_modules("txe-5600");
    let large = resolver.compatible_modules("txe-8600");
    assert!(small.is_subset(&large));
    assert_eq!(resolver.compatible_modules("txe-1100").len(), 2);
}

#[tokio::test]
async fn test_admin_workflow_with_backups() {
    let repository = MockCatalogRepository::empty();
    let progress_reporter = MockProgressReporter::new();
    let admin = ManageCatalogUseCase::new(
        repository.clone(),
        progress_reporter.clone(),
        CompatibilityTable::builtin(),
        Some("integration".to_string()),
    );

    let stats = admin.seed().await.unwrap();
    assert_eq!(stats.models, 3);

    let sms: CatalogRecord = CatalogRecord::from_json(
        RecordKind::Sms,
        r#"{"sku":"TPNN0500","name":"SMS H6"}"#,
    )
    .unwrap();
    admin.add_record(sms).await.unwrap();
    assert_eq!(repository.current().sms_models.len(), 4);
    assert_eq!(
        repository.current().metadata.updated_by.as_deref(),
        Some("integration")
    );

    let unbound = admin
        .list_records(
            RecordKind::License,
            &RecordFilter {
                model: Some(ModelFilter::Unbound),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unbound.len(), 8);

    let removed = admin
        .remove_record(RecordKind::Sms, "TPNN0500", None)
        .await
        .unwrap();
    assert_eq!(removed.name(), "SMS H6");
    assert_eq!(repository.backup_count(), 3);

    let backups = admin.backups().await.unwrap();
    admin.restore(&backups[0].filename).await.unwrap();
    assert_eq!(repository.current().sms_models.len(), 4);
    assert!(progress_reporter
        .get_messages()
        .iter()
        .any(|m| m.starts_with("Completed: ✅ Catalog restored")));
}

#[tokio::test]
async fn test_export_import_reconstructs_collections() {
    let source = MockCatalogRepository::builtin();
    let target = MockCatalogRepository::empty();

    let exported = ManageCatalogUseCase::new(
        source.clone(),
        MockProgressReporter::new(),
        CompatibilityTable::builtin(),
        None,
    )
    .export()
    .await
    .unwrap();

    ManageCatalogUseCase::new(
        target.clone(),
        MockProgressReporter::new(),
        CompatibilityTable::builtin(),
        None,
    )
    .import(&exported)
    .await
    .unwrap();

    let (a, b) = (source.current(), target.current());
    assert_eq!(a.models, b.models);
    assert_eq!(a.io_modules, b.io_modules);
    assert_eq!(a.licenses, b.licenses);
    assert_eq!(a.sms_models, b.sms_models);
}

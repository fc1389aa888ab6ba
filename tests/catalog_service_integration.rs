use irlsim::application::{SimulationRequest, SimulationService};
use irlsim::config::SimulationConfig;
use irlsim::domain::errors::{CatalogError, SimulationError};
use irlsim::domain::simulation::{MissingRangePolicy, NormalizationPolicy};
use irlsim::domain::types::{MethodId, WeightVector};
use irlsim::infrastructure::InMemoryCatalog;
use std::io::Write;

const CATALOG: &str = r#"
[[projects]]
project_id = 1
name = "DECODE"

[[technologies]]
technology_id = 1
name = "PEMFC"

[[technologies]]
technology_id = 2
name = "SOFC"

[[tasks]]
task_id = 1
project_id = 1
task_code = "T1.2"
partner = "PSI"

[[tasks]]
task_id = 2
project_id = 1
task_code = "T2.1"

[[methods]]
method_id = 1
task_id = 1
name = "Neutron Imaging"
maturity = "TRL 6"

[[methods]]
method_id = 2
task_id = 2
name = "Electron Tomography"
maturity = "TRL 7"

[[methods]]
method_id = 3
task_id = 2
name = "Raman Spectroscopy"

[[services]]
service_id = 1
method_id = 1
technology_id = 1
ranges.cost = { min = 3.0, max = 5.0 }
ranges.maturity = { min = 6.0, max = 8.0 }
ranges.integration = { min = 4.0, max = 6.0 }
ranges.interoperability = { min = 5.0, max = 7.0 }

[[services]]
service_id = 2
method_id = 2
technology_id = 2
ranges.cost = { min = 1.0, max = 3.0 }
ranges.maturity = { min = 2.0, max = 4.0 }
ranges.integration = { min = 3.0, max = 5.0 }
ranges.interoperability = { min = 4.0, max = 6.0 }
"#;

fn load() -> InMemoryCatalog {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();
    InMemoryCatalog::from_toml_file(file.path()).unwrap()
}

fn degenerate_config() -> SimulationConfig {
    SimulationConfig {
        trials: 250,
        sigma: 0.0,
        seed: Some(1),
        ..SimulationConfig::default()
    }
}

#[test]
fn test_catalog_views_from_file() {
    let catalog = load();

    let by_task: Vec<(String, usize)> = catalog
        .methods_by_task()
        .iter()
        .map(|(task, methods)| (task.task_code.clone(), methods.len()))
        .collect();
    assert_eq!(by_task, vec![("T1.2".to_string(), 1), ("T2.1".to_string(), 2)]);

    let by_technology: Vec<(String, Vec<String>)> = catalog
        .methods_by_technology()
        .iter()
        .map(|(tech, methods)| {
            (tech.name.clone(), methods.iter().map(|m| m.name.clone()).collect())
        })
        .collect();
    assert_eq!(
        by_technology,
        vec![
            ("PEMFC".to_string(), vec!["Neutron Imaging".to_string()]),
            ("SOFC".to_string(), vec!["Electron Tomography".to_string()]),
        ]
    );
}

#[test]
fn test_service_end_to_end_with_weights() {
    let catalog = load();
    let selection = catalog
        .resolve_selection(&["Neutron Imaging", "Electron Tomography"])
        .unwrap();
    let mut request = SimulationRequest::with_default_weights(selection);
    request.set_weights(MethodId(2), "cost=2,maturity=2,integration=0,interoperability=0".parse().unwrap());

    let report = SimulationService::new(&catalog, degenerate_config())
        .simulate(&request)
        .unwrap();

    // method 1: 4+7+5+6 = 22 over weight 4; method 2: 2*2 + 2*3 = 10 over weight 4
    let expected = (22.0 + 10.0) / 8.0;
    let stats = report.stats.unwrap();
    assert!((stats.mean - expected).abs() < 1e-12);
    assert_eq!(stats.std_dev, 0.0);

    assert_eq!(report.snapshot.cost, 3.0);
    assert_eq!(report.snapshot.maturity, 5.0);
}

#[test]
fn test_service_legacy_normalization() {
    let catalog = load();
    let selection = catalog
        .resolve_selection(&["Neutron Imaging", "Electron Tomography"])
        .unwrap();
    let mut request = SimulationRequest::with_default_weights(selection);
    request.set_weights(MethodId(2), WeightVector::uniform(0.5).unwrap());

    let config = SimulationConfig {
        normalization: NormalizationPolicy::LastMethod,
        ..degenerate_config()
    };
    let report = SimulationService::new(&catalog, config).simulate(&request).unwrap();

    // last method's weight sum (2.0) times two methods
    let expected = (22.0 + 0.5 * 14.0) / 4.0;
    assert!((report.stats.unwrap().mean - expected).abs() < 1e-12);
}

#[test]
fn test_method_without_service_record() {
    let catalog = load();
    let selection = catalog
        .resolve_selection(&["Neutron Imaging", "Raman Spectroscopy"])
        .unwrap();
    let request = SimulationRequest::with_default_weights(selection);

    let strict = SimulationService::new(&catalog, degenerate_config());
    assert!(matches!(
        strict.simulate(&request),
        Err(SimulationError::MissingAttributeRange { method: MethodId(3), .. })
    ));

    let lenient = SimulationService::new(
        &catalog,
        SimulationConfig {
            missing_range: MissingRangePolicy::Skip,
            ..degenerate_config()
        },
    );
    let report = lenient.simulate(&request).unwrap();
    assert!((report.stats.unwrap().mean - 5.5).abs() < 1e-12);
    assert_eq!(report.snapshot.methods, 1);
}

#[test]
fn test_unknown_method_name() {
    let catalog = load();
    let err = catalog.resolve_selection(&["Neutron Imaging", "Mass Spectrometry"]).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownMethod { ref name } if name == "Mass Spectrometry"));
}

#[test]
fn test_dangling_method_task_is_rejected() {
    let broken = CATALOG.replace("task_id = 2\nname = \"Raman Spectroscopy\"", "task_id = 9\nname = \"Raman Spectroscopy\"");
    assert!(matches!(
        InMemoryCatalog::from_toml_str(&broken),
        Err(CatalogError::DanglingReference { entity: "method", target: "task", target_id: 9, .. })
    ));
}

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::*;
use scenario_reports::output::FileOutput;
use scenario_reports::reports::end_use::EndUse;
use scenario_reports::reports::location::Location;
use scenario_reports::reports::reporting_period::PeriodId;
use scenario_reports::reports::thermal_storage::ThermalStorage;
use scenario_reports::{
    aggregate_feature_reports, FeatureReport, MergeIncompatibility, ReportError, ReportNode,
    ScenarioReport,
};
use serde_json::{json, Value};
use std::fs::{read_to_string, File};
use std::io::BufReader;
use std::path::PathBuf;
use walkdir::WalkDir;

#[fixture]
fn demo_feature_reports() -> Vec<FeatureReport> {
    let mut paths: Vec<PathBuf> = WalkDir::new("./demos/feature_reports")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let value: Value =
                serde_json::from_reader(BufReader::new(File::open(path).unwrap())).unwrap();
            FeatureReport::from_value(value).unwrap()
        })
        .collect()
}

#[rstest]
fn should_aggregate_demo_feature_reports(demo_feature_reports: Vec<FeatureReport>) {
    let scenario = aggregate_feature_reports(
        "baseline",
        "Baseline Scenario",
        "run/baseline_scenario",
        demo_feature_reports,
    )
    .unwrap();

    assert_eq!(scenario.feature_reports.len(), 3);
    assert_eq!(scenario.number_of_complete_simulations, 2);
    assert_eq!(scenario.number_of_failed_simulations, 1);
    assert_eq!(scenario.timesteps_per_hour, Some(4));

    let period = &scenario.reporting_periods[0];
    assert_eq!(scenario.reporting_periods.len(), 1);
    assert_eq!(period.id, Some(PeriodId::Index(0)));
    assert_eq!(period.total_site_energy_kwh, Some(2000.));
    assert_eq!(period.electricity_kwh, Some(1800.));
    assert_eq!(period.end_uses.electricity_kwh.heating, Some(500.));

    assert_eq!(scenario.program.floor_area_sqft, Some(57000.));
    assert_eq!(scenario.program.maximum_roof_height_ft, Some(45.));
    assert_eq!(scenario.program.number_of_residential_units, Some(6));
    assert_eq!(scenario.location.latitude_deg, Some(39.74));

    let dg = &scenario.distributed_generation;
    assert_eq!(dg.technologies().count(), 3);
    assert_eq!(dg.total_solar_pv_kw(), Some(30.));
    assert_eq!(dg.total_wind_kw(), Some(5.));
    assert_eq!(dg.total_generator_kw(), Some(12.));

    assert_eq!(scenario.power_distribution.max_power_kw, Some(210.));
    assert_eq!(scenario.power_distribution.under_voltage_hours, Some(2.));
}

#[rstest]
fn should_save_scenario_report_that_reads_back(demo_feature_reports: Vec<FeatureReport>) {
    let dir = tempfile::tempdir().unwrap();
    let output = FileOutput::new(dir.path().to_path_buf(), "{}.{}".to_string());
    let scenario =
        aggregate_feature_reports("baseline", "Baseline", "run", demo_feature_reports).unwrap();

    scenario
        .save_json_report(&output, "default_scenario_report")
        .unwrap();

    let written = read_to_string(dir.path().join("default_scenario_report.json")).unwrap();
    let read_back = ScenarioReport::from_value(serde_json::from_str(&written).unwrap()).unwrap();
    assert_eq!(read_back, scenario);
}

#[rstest]
fn should_aggregate_features_with_named_periods() {
    let feature = |id: &str| {
        FeatureReport::from_value(json!({
            "id": id,
            "simulation_status": "Complete",
            "reporting_periods": [{"id": "annual", "total_site_energy_kwh": 1000.0}],
        }))
        .unwrap()
    };

    let scenario =
        aggregate_feature_reports("s", "s", "run", [feature("1"), feature("2")]).unwrap();

    assert_eq!(scenario.reporting_periods.len(), 1);
    assert_eq!(
        scenario.reporting_periods[0].id,
        Some(PeriodId::Name("annual".into()))
    );
    assert_eq!(scenario.reporting_periods[0].total_site_energy_kwh, Some(2000.));

    let value = scenario.to_value().unwrap();
    assert_eq!(value["reporting_periods"][0]["id"], json!("annual"));
}

#[rstest]
fn should_stop_at_feature_with_different_reporting_periods() {
    let feature = |id: &str, period_id: Value| {
        FeatureReport::from_value(json!({
            "id": id,
            "reporting_periods": [{"id": period_id, "total_site_energy_kwh": 10.0}],
        }))
        .unwrap()
    };

    let result = aggregate_feature_reports(
        "s",
        "s",
        "run",
        [feature("1", json!(0)), feature("2", json!("Annual"))],
    );

    assert!(matches!(
        result,
        Err(ReportError::MergeIncompatibility(
            MergeIncompatibility::ReportingPeriodIds { .. }
        ))
    ));
}

#[rstest]
#[case(json!({"program": {"maximum_number_of_stories": 2.5}}))]
#[case(json!({"timesteps_per_hour": 0}))]
#[case(json!({"location": {"longitude_deg": 200.0}}))]
#[case(json!({"reporting_periods": [{"start_date": {"month": 13}}]}))]
fn should_reject_feature_reports_violating_schema(#[case] value: Value) {
    let result = FeatureReport::from_value(value);

    match result {
        Err(ReportError::SchemaViolation {
            definition,
            violations,
        }) => {
            assert_eq!(definition, "FeatureReport");
            assert!(!violations.is_empty());
        }
        other => panic!("expected a schema violation, got {other:?}"),
    }
}

fn quantity() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of(0.0..1.0e9f64)
}

prop_compose! {
    fn arb_end_use()(
        heating in quantity(),
        cooling in quantity(),
        fans in quantity(),
        water_systems in quantity(),
        generators in proptest::option::of(-1.0e6..0.0f64),
    ) -> EndUse {
        EndUse { heating, cooling, fans, water_systems, generators, ..Default::default() }
    }
}

prop_compose! {
    fn arb_location()(
        latitude_deg in proptest::option::of(-90.0..=90.0f64),
        longitude_deg in proptest::option::of(-180.0..=180.0f64),
        surface_elevation_ft in proptest::option::of(-1000.0..30000.0f64),
        weather_filename in proptest::option::of("[A-Za-z0-9_.-]{1,40}"),
    ) -> Location {
        Location { latitude_deg, longitude_deg, surface_elevation_ft, weather_filename }
    }
}

proptest! {
    #[test]
    fn end_use_survives_validated_round_trip(end_use in arb_end_use()) {
        let value = end_use.to_value().unwrap();
        prop_assert_eq!(EndUse::from_value(value).unwrap(), end_use);
    }

    #[test]
    fn location_survives_validated_round_trip(location in arb_location()) {
        let value = location.to_value().unwrap();
        prop_assert_eq!(Location::from_value(value).unwrap(), location);
    }

    #[test]
    fn merged_thermal_storage_is_sum_of_sizes(
        its in quantity(),
        ptes in quantity(),
        other_its in quantity(),
    ) {
        let mut storage = ThermalStorage { its_size_kwh: its, ptes_size_kwh: ptes };
        storage.merge_thermal_storage(&ThermalStorage { its_size_kwh: other_its, ptes_size_kwh: None });

        let expected_its = match (its, other_its) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0.) + b.unwrap_or(0.)),
        };
        prop_assert_eq!(storage.its_size_kwh, expected_its);
        prop_assert_eq!(storage.ptes_size_kwh, ptes);
        prop_assert!(storage.to_value().is_ok());
    }
}

use pv_sizer::config::FileConfig;
use pv_sizer::{
    CalcError, Calculation, EnergyInputs, PanelGeometry, Recommendation, RoofGeometry,
    ThermalInputs, compute_energy_output, compute_layout, temperature_factor,
};

#[test]
fn test_reference_installation() {
    let thermal = ThermalInputs::new(-0.35, 35.0).with_reference(25.0);
    let panel = PanelGeometry::new(2.0, 1.1);
    let energy = EnergyInputs::new(4.5, 550.0);

    assert!((temperature_factor(&thermal) - 0.965).abs() < 1e-12);

    let result = compute_energy_output(&thermal, true, &panel, &energy).unwrap();
    assert!((result.area - 2.2).abs() < 1e-12);
    assert!((result.eout - 991.128_118_05).abs() < 1e-6, "Eout was {}", result.eout);

    // Panel dimensions flow from the estimator inputs into the planner
    let roof = RoofGeometry::new(10.0, 20.0).with_spacing(0.1);
    let layout = compute_layout(&roof, &panel).unwrap();
    assert_eq!(
        (layout.landscape.across_width, layout.landscape.across_length, layout.landscape.total),
        (8, 9, 72)
    );
    assert_eq!(
        (layout.portrait.across_width, layout.portrait.across_length, layout.portrait.total),
        (4, 16, 64)
    );
    assert_eq!(layout.recommendation, Recommendation::Landscape);
}

#[test]
fn test_config_file_run_with_disabled_terms() {
    let cfg = FileConfig::from_toml_str(
        r#"
        [thermal]
        use_ftemp = false

        [energy]
        use_pastc = false

        [factors.fclean]
        enabled = false
        [factors.fdegrad]
        enabled = false
        [factors.eta_cable]
        enabled = false
        [factors.eta_inv]
        enabled = false

        [panel]
        length = 1.0
        width = 1.0
        "#,
    )
    .unwrap();

    let mut calc = Calculation::default();
    cfg.apply_to(&mut calc);
    let report = calc.run();

    let energy = report.energy.unwrap();
    assert_eq!(energy.ftemp, 1.0);
    // Only PSH (4.5) and the 1.0 defaults of fmm/fsunshade remain
    assert!((energy.eout - 4.5).abs() < 1e-12);

    let layout = report.layout.unwrap();
    assert_eq!(layout.recommendation, Recommendation::Tie);
}

#[test]
fn test_components_fail_independently() {
    let mut calc = Calculation::default();
    calc.panel = PanelGeometry::new(0.0, 0.0);
    calc.roof.spacing = 0.0;
    let report = calc.run();

    assert!(matches!(report.energy, Err(CalcError::InvalidGeometry { .. })));
    assert!(matches!(report.layout, Err(CalcError::DegenerateSpacing { .. })));
    assert!(!report.is_complete());
}

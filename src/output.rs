//! Output Formatting Module
//!
//! Renders calculator results as a terminal report or as JSON.

use serde_json::json;

use pv_sizer::{Calculation, CalculationReport, LayoutResult, OrientationFit, Recommendation};

// ===================== FORMATTING HELPERS =====================

/// Append one formatted line to a `String` report.
macro_rules! emit {
    ($out:expr) => {
        $out.push('\n')
    };
    ($out:expr, $($arg:tt)*) => {{
        $out.push_str(&format!($($arg)*));
        $out.push('\n');
    }};
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// Recommendation sentence for the layout section.
pub fn recommendation_message(layout: &LayoutResult) -> String {
    let land = layout.landscape.total;
    let port = layout.portrait.total;
    match layout.recommendation {
        Recommendation::Landscape => {
            format!("Landscape recommended: {} panels (more than Portrait {})", land, port)
        }
        Recommendation::Portrait => {
            format!("Portrait recommended: {} panels (more than Landscape {})", port, land)
        }
        Recommendation::Tie => {
            format!("Both orientations fit the same number of panels: {}", land)
        }
    }
}

fn write_fit(out: &mut String, label: &str, fit: &OrientationFit) {
    emit!(out, "{} Mode", label);
    emit!(out, "  Up (roof width)     : {}", fit.across_width);
    emit!(out, "  Across (roof length): {}", fit.across_length);
    emit!(out, "  Total               : {} panels", fit.total);
}

// ===================== TEXT REPORT =====================

/// Build the terminal report. A failed section shows its error instead.
pub fn render_report(calc: &Calculation, report: &CalculationReport) -> String {
    let mut out = String::new();

    emit!(out, "=== Step 1: Temperature, Area & Energy Output ===");
    emit!(
        out,
        "Pcoef {:.4} %/°C | Tavg {:.4} °C | Tstc {:.4} °C | ftemp in Eout: {}",
        calc.thermal.pcoef,
        calc.thermal.tavg,
        calc.thermal.tstc,
        on_off(calc.use_ftemp)
    );
    emit!(
        out,
        "PSH {:.4} h ({}) | PASTC {:.4} W ({})",
        calc.energy.psh,
        on_off(calc.energy.use_psh),
        calc.energy.pastc,
        on_off(calc.energy.use_pastc)
    );
    for f in calc.energy.factors() {
        emit!(out, "  {:<20}: {:.4} ({})", f.name, f.value, on_off(f.enabled));
    }
    emit!(out);

    match &report.energy {
        Ok(e) => {
            emit!(out, "Calculated ftemp : {:.4}", e.ftemp_calculated);
            if !calc.use_ftemp {
                emit!(out, "Applied ftemp    : {:.4} (bypassed)", e.ftemp);
            }
            emit!(out, "Panel area       : {:.4} m²", e.area);
            emit!(out, "Estimated Eout   : {:.4} Wh per m²", e.eout);
        }
        Err(err) => {
            emit!(out, "Error: {}", err);
        }
    }
    emit!(out);

    emit!(out, "=== Step 2: Landscape vs Portrait Panel Count ===");
    emit!(
        out,
        "Roof {:.4} m x {:.4} m | Panel {:.4} m x {:.4} m | Spacing {:.4} m",
        calc.roof.width, calc.roof.length, calc.panel.length, calc.panel.width, calc.roof.spacing
    );
    emit!(out);

    match &report.layout {
        Ok(layout) => {
            write_fit(&mut out, "Landscape", &layout.landscape);
            write_fit(&mut out, "Portrait", &layout.portrait);
            emit!(out);
            emit!(out, "=== Recommendation ===");
            emit!(out, "{}", recommendation_message(layout));
        }
        Err(err) => {
            emit!(out, "Error: {}", err);
        }
    }

    out
}

pub fn print_report(calc: &Calculation, report: &CalculationReport) {
    print!("{}", render_report(calc, report));
}

// ===================== JSON =====================

/// JSON document with the inputs and both result sections.
pub fn render_json(
    calc: &Calculation,
    report: &CalculationReport,
) -> Result<String, serde_json::Error> {
    let section = |r: Result<serde_json::Value, String>| match r {
        Ok(v) => v,
        Err(msg) => json!({ "error": msg }),
    };

    let energy = section(match &report.energy {
        Ok(e) => serde_json::to_value(e).map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    });
    let layout = section(match &report.layout {
        Ok(l) => serde_json::to_value(l)
            .map(|mut v| {
                v["recommended_total"] = json!(l.recommended_total());
                v
            })
            .map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    });

    serde_json::to_string_pretty(&json!({
        "inputs": calc,
        "energy": energy,
        "layout": layout,
    }))
}

pub fn print_json(calc: &Calculation, report: &CalculationReport) -> Result<(), serde_json::Error> {
    println!("{}", render_json(calc, report)?);
    Ok(())
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_text() {
        let calc = Calculation::default();
        let text = render_report(&calc, &calc.run());

        assert!(text.contains("Calculated ftemp : 0.9650"), "{}", text);
        assert!(text.contains("Panel area       : 2.2000 m²"), "{}", text);
        assert!(text.contains("Estimated Eout   : 991.1281 Wh per m²"), "{}", text);
        assert!(text.contains("Landscape recommended: 72 panels (more than Portrait 64)"), "{}", text);
        assert!(!text.contains("bypassed"));
    }

    #[test]
    fn test_bypassed_ftemp_is_shown() {
        let calc = Calculation { use_ftemp: false, ..Calculation::default() };
        let text = render_report(&calc, &calc.run());
        assert!(text.contains("Calculated ftemp : 0.9650"));
        assert!(text.contains("Applied ftemp    : 1.0000 (bypassed)"));
    }

    #[test]
    fn test_failed_section_shows_error_and_other_section_still_renders() {
        let mut calc = Calculation::default();
        calc.panel.width = 0.0;
        calc.roof.spacing = 0.0;
        let text = render_report(&calc, &calc.run());

        assert!(text.contains("Error: invalid panel geometry"), "{}", text);
        assert!(text.contains("Error: degenerate spacing"), "{}", text);
        assert!(!text.contains("Estimated Eout"));
    }

    #[test]
    fn test_unrepresentable_panel_count_reported_as_error() {
        let mut calc = Calculation::default();
        calc.roof = pv_sizer::RoofGeometry::new(1e6, 1e6).with_spacing(0.0);
        calc.panel = pv_sizer::PanelGeometry::new(1e-5, 1e-5);
        let text = render_report(&calc, &calc.run());

        assert!(text.contains("Error: landscape layout panel count exceeds"), "{}", text);
        assert!(text.contains("Estimated Eout"), "{}", text);
    }

    #[test]
    fn test_tie_message() {
        let mut calc = Calculation::default();
        calc.panel.length = 1.0;
        calc.panel.width = 1.0;
        let layout = calc.run().layout.unwrap();
        let msg = recommendation_message(&layout);
        assert!(msg.starts_with("Both orientations fit the same number of panels"));
    }

    #[test]
    fn test_json_document() {
        let calc = Calculation::default();
        let text = render_json(&calc, &calc.run()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(v["layout"]["recommendation"], "landscape");
        assert_eq!(v["layout"]["recommended_total"], 72);
        assert_eq!(v["layout"]["landscape"]["across_width"], 8);
        assert!((v["energy"]["eout"].as_f64().unwrap() - 991.128_118_05).abs() < 1e-6);
        assert_eq!(v["inputs"]["energy"]["eta_inv"]["value"], 0.97);
    }

    #[test]
    fn test_json_error_section() {
        let mut calc = Calculation::default();
        calc.roof.spacing = -1.1;
        let text = render_json(&calc, &calc.run()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert!(v["energy"]["eout"].is_number());
        assert!(v["layout"]["error"].as_str().unwrap().contains("degenerate spacing"));
    }
}

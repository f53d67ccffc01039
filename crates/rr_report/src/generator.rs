// --------------------------------------------------------------------------------
// FILE: crates/rr_report/src/generator.rs
// --------------------------------------------------------------------------------
//! Report document generation: drives the layout engine through the fixed
//! section sequence.
//!
//! Section order:
//!   header → results → stress analysis → (new page) executive summary →
//!   insights → submitter → financial profile (optional) → allocation →
//!   recommendations → footers.
//!
//! Coordinates are mm from the top-left of an A4 page.

use tracing::{debug, info};

use rr_algo::allocation::exposure_notes;
use rr_algo::stress::{
    impact_severity, ImpactSeverity, ACTION_ITEMS, HEDGING_STRATEGIES, RECOVERY_PROJECTION,
};
use rr_core::{money::fmt_usd, rounding::pct_label, AssetClass, ScenarioGroup};

use crate::layout::{Column, LayoutEngine, PageGeometry, LINE_HEIGHT_FACTOR};
use crate::structure::{build_report_model, ReportData, ReportModel, ReportOptions};
use crate::surface::{Document, FontStyle, RecordingSurface, Rgb, Surface};
use crate::LayoutError;

pub const REPORT_TITLE: &str = "COMPREHENSIVE RISK ASSESSMENT REPORT";
pub const REPORT_SUBTITLE: &str = "Professional Investment Risk Analysis";
pub const STRESS_HEADING: &str = "COMPREHENSIVE STRESS TESTING ANALYSIS";
pub const SUMMARY_HEADING: &str = "STRESS TESTING EXECUTIVE SUMMARY";
pub const HEDGING_HEADING: &str = "Recommended Hedging Strategies";
pub const RECOVERY_HEADING: &str = "Recovery Projections";
pub const EXPOSURE_HEADING: &str = "Risk Exposure by Asset Class";
pub const DISCLAIMER: &str = "Note: These are illustrative projections. Actual outcomes may vary. \
     Consult a financial advisor for personalized risk mitigation.";

const HEADER_BAND: f64 = 40.0;
const RESULTS_BOX: f64 = 30.0;
const STRESS_BLOCK_MIN: f64 = 90.0;
const SUBMITTER_BOX: f64 = 60.0;
const PROFILE_BOX: f64 = 40.0;
const TABLE_ROW: f64 = 6.0;
const BAR_ROW: f64 = 6.0;
const BAR_HEIGHT: f64 = 4.0;
/// mm of bar per percentage point of loss.
const BAR_SCALE: f64 = 2.0;
const BAR_LABEL_WIDTH: f64 = 32.0;
const BAR_COUNT: usize = 6;
const BODY_SIZE: f64 = 10.0;

const BLUE_700: Rgb = Rgb(29, 78, 216);
const BLUE_600: Rgb = Rgb(37, 99, 235);
const BLUE_50: Rgb = Rgb(239, 246, 255);
const GRAY_50: Rgb = Rgb(248, 250, 252);
const SLATE_700: Rgb = Rgb(51, 65, 85);
const SLATE_600: Rgb = Rgb(71, 85, 105);
const TEAL_900: Rgb = Rgb(21, 94, 117);

const STRESS_COLUMNS: [Column<'static>; 5] = [
    Column { title: "Scenario", share: 0.22 },
    Column { title: "Portfolio Value", share: 0.18 },
    Column { title: "Loss (%)", share: 0.13 },
    Column { title: "Vulnerable Asset", share: 0.24 },
    Column { title: "Hedging", share: 0.23 },
];

fn severity_fill(severity: ImpactSeverity) -> Rgb {
    match severity {
        ImpactSeverity::Mild => Rgb(234, 179, 8),
        ImpactSeverity::Elevated => Rgb(249, 115, 22),
        ImpactSeverity::Severe => Rgb(239, 68, 68),
    }
}

fn asset_fill(class: AssetClass) -> Rgb {
    match class {
        AssetClass::Stocks => Rgb(59, 130, 246),
        AssetClass::Bonds => Rgb(34, 197, 94),
        AssetClass::Alternatives => Rgb(168, 85, 247),
        AssetClass::Cash => Rgb(156, 163, 175),
    }
}

/// Build the model and lay out the full document on A4 pages.
pub fn generate_report(data: &ReportData, options: &ReportOptions) -> Result<Document, LayoutError> {
    let model = build_report_model(data, options)?;
    let geometry = PageGeometry::a4();
    let engine = LayoutEngine::new(RecordingSurface::new(geometry.width, geometry.height), geometry);
    let doc = render_document(&model, engine)?;
    info!(
        pages = doc.page_count(),
        score = model.assessment.score,
        category = %model.assessment.risk_level,
        "report document generated"
    );
    Ok(doc)
}

/// Run every section against `engine` and finalize it.
pub fn render_document<S: Surface>(
    model: &ReportModel,
    mut engine: LayoutEngine<S>,
) -> Result<S::Output, LayoutError> {
    section_header(&mut engine);
    section_results(&mut engine, model);
    section_stress(&mut engine, model)?;
    section_summary(&mut engine, model);
    section_insights(&mut engine, model);
    section_submitter(&mut engine, model);
    section_profile(&mut engine, model);
    section_allocation(&mut engine, model)?;
    section_recommendations(&mut engine, model);
    engine.finish()
}

fn section_header<S: Surface>(e: &mut LayoutEngine<S>) {
    debug!(section = "header");
    let width = e.geometry().width;
    e.fill(BLUE_700);
    e.rect(0.0, 0.0, width, HEADER_BAND);
    e.fill(BLUE_600);
    e.rect(0.0, 30.0, width, 10.0);
    e.ink(Rgb::WHITE);
    e.font(20.0, FontStyle::Bold);
    e.text_centered(20.0, REPORT_TITLE);
    e.font(11.0, FontStyle::Normal);
    e.text_centered(28.0, REPORT_SUBTITLE);

    e.set_y(HEADER_BAND + 10.0);
    e.ink(SLATE_700);
}

fn section_results<S: Surface>(e: &mut LayoutEngine<S>, m: &ReportModel) {
    debug!(section = "results");
    let g = e.geometry();
    let (x, y) = (g.margin, e.y());
    e.fill(BLUE_50);
    e.rect(x, y, g.content_width(), RESULTS_BOX);
    e.font(14.0, FontStyle::Bold);
    e.text(x + 5.0, y + 8.0, "ASSESSMENT RESULTS");
    e.font(11.0, FontStyle::Normal);
    e.text(x + 5.0, y + 16.0, &format!("Risk Number: {}", m.assessment.score));
    e.text(x + 5.0, y + 22.0, &format!("Risk Level: {}", m.assessment.risk_level));
    e.text(x + 5.0, y + 28.0, &format!("Assessment Date: {}", m.assessment_date));
    e.advance(RESULTS_BOX + 10.0);
}

fn stress_intro(m: &ReportModel) -> String {
    format!(
        "This section analyzes the estimated impact on a sample {} portfolio under severe market \
         scenarios, reflecting their correlation to your risk number. Stress tests include interest \
         rate shocks, equity market crashes, and economic stress events. All projections are for \
         illustration and educational purposes.",
        fmt_usd(m.portfolio_value)
    )
}

fn section_stress<S: Surface>(e: &mut LayoutEngine<S>, m: &ReportModel) -> Result<(), LayoutError> {
    debug!(section = "stress");
    let g = e.geometry();
    let x = g.margin;
    let text_width = g.content_width() - 10.0;
    let intro = stress_intro(m);

    // Title, intro, table, caption and bars move together.
    let intro_h = e.measure_wrapped(&intro, text_width, BODY_SIZE) as f64 * BODY_SIZE * LINE_HEIGHT_FACTOR;
    let table_h = (m.scenarios.len() + 1) as f64 * TABLE_ROW;
    let bars_h = BAR_COUNT as f64 * BAR_ROW;
    let block = (14.0 + intro_h + 6.0 + table_h + 10.0 + 12.0 + bars_h + 12.0).max(STRESS_BLOCK_MIN);
    e.ensure_space(block);

    let top = e.y();
    e.fill(Rgb::WHITE);
    e.rect(x, top, g.content_width(), block);
    e.font(14.0, FontStyle::Bold);
    e.ink(TEAL_900);
    e.text(x + 5.0, top + 8.0, STRESS_HEADING);

    e.font(BODY_SIZE, FontStyle::Normal);
    e.ink(SLATE_700);
    e.set_y(top + 14.0);
    let h = e.draw_wrapped_text(&intro, x + 5.0, text_width, BODY_SIZE);

    let table_y = top + 14.0 + h + 6.0;
    let rows: Vec<Vec<String>> = m
        .scenarios
        .iter()
        .map(|s| {
            vec![
                s.label.clone(),
                fmt_usd(s.portfolio_value_after(m.portfolio_value)),
                pct_label(s.impact),
                s.vulnerable_assets.clone(),
                s.hedging.clone(),
            ]
        })
        .collect();
    e.font(9.0, FontStyle::Normal);
    let drawn = e.draw_table(x + 3.0, table_y, g.content_width() - 6.0, &STRESS_COLUMNS, &rows, TABLE_ROW)?;

    let caption_y = table_y + drawn + 10.0;
    e.font(BODY_SIZE, FontStyle::Italic);
    e.text(x + 5.0, caption_y + 6.0, "Portfolio Loss Visualization");

    let bar_base = caption_y + 12.0;
    let bar_x = x + BAR_LABEL_WIDTH;
    e.font(8.0, FontStyle::Normal);
    let charted = m
        .scenarios
        .iter()
        .filter(|s| matches!(s.group, ScenarioGroup::InterestRate | ScenarioGroup::MarketCrash))
        .take(BAR_COUNT);
    for (i, s) in charted.enumerate() {
        let row_y = bar_base + i as f64 * BAR_ROW;
        e.fill(severity_fill(impact_severity(s.impact)));
        let len = e.draw_proportional_bar(bar_x, row_y, s.impact, BAR_SCALE, BAR_HEIGHT)?;
        e.text(x + 6.0, row_y + 3.0, &s.label);
        e.text(bar_x + len + 4.0, row_y + 3.0, &pct_label(s.impact));
    }

    e.set_y(bar_base + bars_h + 12.0);
    e.new_page();
    Ok(())
}

fn section_summary<S: Surface>(e: &mut LayoutEngine<S>, m: &ReportModel) {
    debug!(section = "executive_summary");
    let g = e.geometry();
    let x = g.margin + 5.0;
    let width = g.content_width() - 10.0;

    e.font(13.0, FontStyle::Bold);
    e.ink(TEAL_900);
    e.text(x, e.y(), SUMMARY_HEADING);
    e.font(BODY_SIZE, FontStyle::Normal);
    e.ink(SLATE_700);
    e.advance(10.0);

    let first = format!(
        "Based on your {} risk profile with a risk score of {}, the most severe projected scenario \
         reduces a {} portfolio by {} ({}). Fixed income assets are most sensitive to interest rate \
         shocks; equity positions are exposed during sharp market declines and recession scenarios. \
         Diversification, tactical hedging (using options, inverse ETFs, TIPS), and maintaining \
         adequate liquidity are recommended mitigation strategies.",
        m.assessment.risk_level,
        m.assessment.score,
        fmt_usd(m.portfolio_value),
        pct_label(m.worst_case),
        fmt_usd(m.worst_case_dollars()),
    );
    let h = e.draw_wrapped_text(&first, x, width, BODY_SIZE);
    e.advance(h + 2.0);

    let history: Vec<String> = m
        .historical
        .iter()
        .map(|ev| {
            format!(
                "the {} (market {}, recovery {} months) would have cost this allocation about {}",
                ev.name,
                pct_label(ev.market_decline),
                ev.recovery_months,
                pct_label(ev.portfolio_impact)
            )
        })
        .collect();
    let second = format!(
        "Historical context: {}. Diversified allocations with hedging recovered within 18-36 months.",
        history.join("; ")
    );
    let h = e.draw_wrapped_text(&second, x, width, BODY_SIZE);
    e.advance(h + 8.0);

    e.font(BODY_SIZE, FontStyle::Italic);
    e.ink(SLATE_600);
    let h = e.draw_wrapped_text(DISCLAIMER, x, width, BODY_SIZE);
    e.advance(h + 6.0);
    e.font(BODY_SIZE, FontStyle::Normal);
    e.ink(SLATE_700);
}

/// Heading followed by wrapped, prefixed items; the heading never sits alone
/// at the bottom of a page.
fn draw_list<S: Surface>(e: &mut LayoutEngine<S>, heading: &str, items: &[String]) {
    let g = e.geometry();
    let x = g.margin + 5.0;
    let width = g.content_width() - 10.0;
    let step = BODY_SIZE * LINE_HEIGHT_FACTOR;

    let first_h = items
        .first()
        .map(|s| e.measure_wrapped(s, width, BODY_SIZE) as f64 * step)
        .unwrap_or(0.0);
    e.ensure_space(7.0 + first_h);
    e.font(11.0, FontStyle::Bold);
    e.text(x, e.y(), heading);
    e.advance(7.0);

    e.font(BODY_SIZE, FontStyle::Normal);
    for item in items {
        let h = e.measure_wrapped(item, width, BODY_SIZE) as f64 * step;
        e.ensure_space(h);
        let drawn = e.draw_wrapped_text(item, x, width, BODY_SIZE);
        e.advance(drawn + 1.5);
    }
    e.advance(4.0);
}

fn section_insights<S: Surface>(e: &mut LayoutEngine<S>, m: &ReportModel) {
    debug!(section = "insights");
    let bullets = |items: &[&str]| -> Vec<String> { items.iter().map(|s| format!("- {s}")).collect() };
    draw_list(e, "Key Vulnerabilities", &bullets(&m.vulnerabilities[..]));
    draw_list(e, "Mitigation Strategies", &bullets(&m.mitigations[..]));
    let hedging: Vec<String> = HEDGING_STRATEGIES
        .iter()
        .map(|h| format!("- {}: {}", h.title, h.instruments.join(", ")))
        .collect();
    draw_list(e, HEDGING_HEADING, &hedging);
    draw_list(e, RECOVERY_HEADING, &[RECOVERY_PROJECTION.to_string()]);
    let actions: Vec<String> = ACTION_ITEMS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}", i + 1))
        .collect();
    draw_list(e, "Immediate Action Items", &actions);
}

/// Filled box with a bold title and label/value lines every 5 mm.
fn draw_box<S: Surface>(e: &mut LayoutEngine<S>, title: &str, height: f64, lines: &[String]) {
    let g = e.geometry();
    e.ensure_space(height);
    let (x, y) = (g.margin, e.y());
    e.fill(GRAY_50);
    e.rect(x, y, g.content_width(), height);
    e.font(14.0, FontStyle::Bold);
    e.text(x + 5.0, y + 8.0, title);
    e.font(BODY_SIZE, FontStyle::Normal);
    for (i, line) in lines.iter().enumerate() {
        e.text(x + 5.0, y + 16.0 + i as f64 * 5.0, line);
    }
    e.advance(height + 10.0);
}

fn section_submitter<S: Surface>(e: &mut LayoutEngine<S>, m: &ReportModel) {
    debug!(section = "submitter");
    let c = &m.contact;
    let lines = [
        format!("Full Legal Name: {} {}", c.first_name, c.last_name),
        format!("Email Address: {}", c.email),
        format!("Primary Phone: {}", c.phone),
        format!("Street Address: {}", c.address),
        format!("City: {}", c.city),
        format!("State: {}", c.state),
        format!("ZIP/Postal Code: {}", c.zipcode),
    ];
    draw_box(e, "SUBMITTER INFORMATION", SUBMITTER_BOX, &lines);
}

fn section_profile<S: Surface>(e: &mut LayoutEngine<S>, m: &ReportModel) {
    let Some(p) = &m.profile else { return };
    debug!(section = "financial_profile");
    let properties = if p.properties.is_empty() { "None".to_string() } else { p.properties.join(", ") };
    let lines = [
        format!("Age Range: {}", p.age),
        format!("Annual Income: {}", p.income),
        format!("Properties: {properties}"),
        format!(
            "Alternative Investments: {}",
            if p.has_alternative_investments { "Yes" } else { "No" }
        ),
    ];
    draw_box(e, "FINANCIAL PROFILE", PROFILE_BOX, &lines);
}

fn section_allocation<S: Surface>(e: &mut LayoutEngine<S>, m: &ReportModel) -> Result<(), LayoutError> {
    debug!(section = "allocation");
    let g = e.geometry();
    let x = g.margin;
    let scale = g.content_width() / 100.0;
    let row = 12.0;
    e.ensure_space(12.0 + 4.0 * row);

    let top = e.y();
    e.font(14.0, FontStyle::Bold);
    e.ink(SLATE_700);
    e.text(x, top + 6.0, "RECOMMENDED ASSET ALLOCATION");
    e.font(BODY_SIZE, FontStyle::Normal);
    for (i, (class, pct)) in m.allocation.classes().enumerate() {
        let y = top + 12.0 + i as f64 * row;
        e.text(
            x,
            y + 3.0,
            &format!(
                "{class}: {pct}% ({})",
                fmt_usd(m.allocation.dollars(class, m.portfolio_value))
            ),
        );
        e.fill(asset_fill(class));
        e.draw_proportional_bar(x, y + 5.0, pct as f64, scale, BAR_HEIGHT)?;
    }
    e.set_y(top + 12.0 + 4.0 * row + 6.0);

    let exposure: Vec<String> = m
        .allocation
        .classes()
        .filter(|(class, _)| !exposure_notes(*class).is_empty())
        .map(|(class, pct)| format!("- {class} ({pct}%): {}", exposure_notes(class).join(", ")))
        .collect();
    draw_list(e, EXPOSURE_HEADING, &exposure);
    Ok(())
}

fn section_recommendations<S: Surface>(e: &mut LayoutEngine<S>, m: &ReportModel) {
    debug!(section = "recommendations");
    let items: Vec<String> = m
        .assessment
        .recommendations
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {r}", i + 1))
        .collect();
    draw_list(e, "PERSONALIZED RECOMMENDATIONS", &items);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rr_algo::assess_score;
    use rr_core::{ContactInfo, FinancialProfile};

    fn data(score: u8) -> ReportData {
        ReportData {
            assessment: assess_score(score).unwrap(),
            profile: None,
            contact_info: ContactInfo {
                first_name: "Jordan".into(),
                last_name: "Reyes".into(),
                email: "jordan@example.com".into(),
                ..Default::default()
            },
            answers: None,
        }
    }

    fn opts() -> ReportOptions {
        ReportOptions::on(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
    }

    #[test]
    fn executive_summary_starts_a_new_page() {
        let doc = generate_report(&data(50), &opts()).unwrap();
        let stress = doc.find_page(STRESS_HEADING).unwrap();
        let summary = doc.find_page(SUMMARY_HEADING).unwrap();
        assert_eq!(stress, 1);
        assert_eq!(summary, stress + 1);
        assert!(doc.pages[summary - 1].texts().next().is_some());
    }

    #[test]
    fn table_lists_every_scenario_with_dollar_value() {
        let doc = generate_report(&data(50), &opts()).unwrap();
        let first = &doc.pages[0];
        assert!(first.contains_text("Market -20%"));
        assert!(first.contains_text("$94,240"));
        assert!(first.contains_text("-5.76%"));
        assert!(first.contains_text("Currency Crisis"));
        assert!(first.contains_text("Risk Number: 50"));
        assert!(first.contains_text("Assessment Date: 3/7/2024"));
    }

    #[test]
    fn summary_names_category_score_and_worst_case() {
        let doc = generate_report(&data(80), &opts()).unwrap();
        let all: String = doc.pages.iter().flat_map(|p| p.texts()).collect::<Vec<_>>().join(" ");
        assert!(all.contains("Aggressive"));
        assert!(all.contains("-19.2%"));
        assert!(all.contains("Full Legal Name: Jordan Reyes"));
        assert!(all.contains("1. Consider a growth-oriented portfolio"));
    }

    #[test]
    fn profile_box_only_when_present() {
        let without = generate_report(&data(20), &opts()).unwrap();
        assert!(without.find_page("FINANCIAL PROFILE").is_none());

        let mut d = data(20);
        d.profile = Some(FinancialProfile {
            age: "35-44".into(),
            income: "$100,000-$150,000".into(),
            properties: vec!["Primary residence".into()],
            has_alternative_investments: true,
        });
        let with = generate_report(&d, &opts()).unwrap();
        assert!(with.find_page("FINANCIAL PROFILE").is_some());
        assert!(with.find_page("Alternative Investments: Yes").is_some());
    }

    #[test]
    fn insights_carry_hedging_and_recovery() {
        let doc = generate_report(&data(50), &opts()).unwrap();
        let summary = doc.find_page(SUMMARY_HEADING).unwrap();
        let hedging = doc.find_page(HEDGING_HEADING).unwrap();
        assert!(hedging >= summary);
        for h in &HEDGING_STRATEGIES {
            assert!(doc.find_page(h.title).is_some(), "missing {}", h.title);
        }
        assert!(doc.find_page("Interest Rate Protection: Floating rate bonds").is_some());
        assert!(doc.find_page(RECOVERY_HEADING).is_some());
        assert!(doc.find_page("24-48").is_some());
    }

    #[test]
    fn allocation_section_lists_exposure_notes() {
        let doc = generate_report(&data(50), &opts()).unwrap();
        let alloc = doc.find_page("RECOMMENDED ASSET ALLOCATION").unwrap();
        let exposure = doc.find_page(EXPOSURE_HEADING).unwrap();
        assert!(exposure >= alloc);
        assert!(doc.find_page("Stocks (60%): Market volatility risk").is_some());
        assert!(doc.find_page("Liquidity constraints").is_some());
        assert!(doc.find_page("Cash (").is_none());
    }

    #[test]
    fn every_page_has_a_footer() {
        let doc = generate_report(&data(50), &opts()).unwrap();
        let n = doc.page_count();
        assert!(n >= 2);
        for (i, p) in doc.pages.iter().enumerate() {
            assert!(p.contains_text(&format!("Page {} of {}", i + 1, n)));
        }
    }

    #[test]
    fn output_is_deterministic() {
        let a = generate_report(&data(42), &opts()).unwrap();
        let b = generate_report(&data(42), &opts()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn nothing_is_drawn_below_the_bottom_margin_except_footers() {
        let doc = generate_report(&data(50), &opts()).unwrap();
        let bottom = PageGeometry::a4().bottom();
        for page in &doc.pages {
            for op in &page.ops {
                if let crate::surface::DrawOp::Text { y, text, .. } = op {
                    let footer = text.starts_with("Page ") || text == crate::layout::CONFIDENTIAL_NOTICE;
                    assert!(footer || *y <= bottom, "{text} at {y}");
                }
            }
        }
    }
}

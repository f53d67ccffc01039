// crates/rr_report/src/render_text.rs
//
// Plain-text fallback report. Same content as the paginated document, laid
// out as fixed-width sections; used when the document cannot be produced.
// Deterministic for a fixed `ReportModel`.

use std::fmt::Write as _;

use rr_algo::allocation::exposure_notes;
use rr_algo::stress::{ACTION_ITEMS, HEDGING_STRATEGIES, RECOVERY_PROJECTION};
use rr_core::{money::fmt_usd, rounding::pct_label};

use crate::generator::{DISCLAIMER, REPORT_SUBTITLE, REPORT_TITLE};
use crate::structure::ReportModel;

const RULE_WIDTH: usize = 72;

pub struct TextBuilder {
    buf: String,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self { buf: String::with_capacity(8 * 1024) }
    }

    fn rule(&mut self, ch: char) {
        let _ = writeln!(self.buf, "{}", ch.to_string().repeat(RULE_WIDTH));
    }

    fn heading(&mut self, title: &str) {
        let _ = writeln!(self.buf);
        let _ = writeln!(self.buf, "{title}");
        self.rule('-');
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.buf, "{text}");
    }

    pub fn start(&mut self) {
        self.rule('=');
        self.line(REPORT_TITLE);
        self.line(REPORT_SUBTITLE);
        self.rule('=');
    }

    pub fn section_results(&mut self, m: &ReportModel) {
        self.heading("ASSESSMENT RESULTS");
        let _ = writeln!(self.buf, "Risk Number: {}", m.assessment.score);
        let _ = writeln!(self.buf, "Risk Level: {}", m.assessment.risk_level);
        let _ = writeln!(self.buf, "Assessment Date: {}", m.assessment_date);
    }

    pub fn section_stress(&mut self, m: &ReportModel) {
        self.heading("STRESS TESTING ANALYSIS");
        let _ = writeln!(self.buf, "Sample portfolio: {}", fmt_usd(m.portfolio_value));
        let _ = writeln!(
            self.buf,
            "{:<18} {:>15} {:>9} {:<20} {}",
            "Scenario", "Portfolio Value", "Loss (%)", "Vulnerable Asset", "Hedging"
        );
        for s in &m.scenarios {
            let _ = writeln!(
                self.buf,
                "{:<18} {:>15} {:>9} {:<20} {}",
                s.label,
                fmt_usd(s.portfolio_value_after(m.portfolio_value)),
                pct_label(s.impact),
                s.vulnerable_assets,
                s.hedging
            );
        }
        self.line("");
        for s in &m.scenarios {
            let _ = writeln!(
                self.buf,
                "{}: {} ({}); vulnerability {}; recovery {}",
                s.name, s.description, fmt_usd(s.dollar_impact(m.portfolio_value)), s.vulnerability, s.recovery_time
            );
        }
    }

    pub fn section_summary(&mut self, m: &ReportModel) {
        self.heading("EXECUTIVE SUMMARY");
        let _ = writeln!(
            self.buf,
            "Risk profile: {} (score {}). Worst case: {} ({}).",
            m.assessment.risk_level,
            m.assessment.score,
            pct_label(m.worst_case),
            fmt_usd(m.worst_case_dollars())
        );
        self.line("Key vulnerabilities:");
        for v in m.vulnerabilities {
            let _ = writeln!(self.buf, "  - {v}");
        }
        self.line("Mitigation strategies:");
        for v in m.mitigations {
            let _ = writeln!(self.buf, "  - {v}");
        }
        self.line("Historical context:");
        for ev in &m.historical {
            let _ = writeln!(
                self.buf,
                "  - {}: market {}, recovery {} months, this allocation {}",
                ev.name,
                pct_label(ev.market_decline),
                ev.recovery_months,
                pct_label(ev.portfolio_impact)
            );
        }
        self.line("Recommended hedging strategies:");
        for h in &HEDGING_STRATEGIES {
            let _ = writeln!(self.buf, "  - {}: {}", h.title, h.instruments.join(", "));
        }
        self.line("Recovery projections:");
        let _ = writeln!(self.buf, "  {RECOVERY_PROJECTION}");
        self.line("Immediate action items:");
        for (i, a) in ACTION_ITEMS.iter().enumerate() {
            let _ = writeln!(self.buf, "  {}. {a}", i + 1);
        }
    }

    pub fn section_submitter(&mut self, m: &ReportModel) {
        let c = &m.contact;
        self.heading("SUBMITTER INFORMATION");
        let _ = writeln!(self.buf, "Full Legal Name: {} {}", c.first_name, c.last_name);
        let _ = writeln!(self.buf, "Email Address: {}", c.email);
        let _ = writeln!(self.buf, "Primary Phone: {}", c.phone);
        let _ = writeln!(self.buf, "Street Address: {}", c.address);
        let _ = writeln!(self.buf, "City: {}", c.city);
        let _ = writeln!(self.buf, "State: {}", c.state);
        let _ = writeln!(self.buf, "ZIP/Postal Code: {}", c.zipcode);
    }

    pub fn section_profile(&mut self, m: &ReportModel) {
        let Some(p) = &m.profile else { return };
        self.heading("FINANCIAL PROFILE");
        let _ = writeln!(self.buf, "Age Range: {}", p.age);
        let _ = writeln!(self.buf, "Annual Income: {}", p.income);
        let props = if p.properties.is_empty() { "None".to_string() } else { p.properties.join(", ") };
        let _ = writeln!(self.buf, "Properties: {props}");
        let _ = writeln!(
            self.buf,
            "Alternative Investments: {}",
            if p.has_alternative_investments { "Yes" } else { "No" }
        );
    }

    pub fn section_allocation(&mut self, m: &ReportModel) {
        self.heading("RECOMMENDED ASSET ALLOCATION");
        for (class, pct) in m.allocation.classes() {
            let _ = writeln!(
                self.buf,
                "{:<13} {:>3}%  {:>10}",
                class.as_str(),
                pct,
                fmt_usd(m.allocation.dollars(class, m.portfolio_value))
            );
            for note in exposure_notes(class) {
                let _ = writeln!(self.buf, "    - {note}");
            }
        }
    }

    pub fn section_recommendations(&mut self, m: &ReportModel) {
        self.heading("PERSONALIZED RECOMMENDATIONS");
        for (i, r) in m.assessment.recommendations.iter().enumerate() {
            let _ = writeln!(self.buf, "{}. {r}", i + 1);
        }
    }

    pub fn finish(mut self) -> String {
        self.line("");
        self.line(DISCLAIMER);
        self.buf
    }
}

impl Default for TextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the complete text report.
pub fn render_text(model: &ReportModel) -> String {
    let mut b = TextBuilder::new();
    b.start();
    b.section_results(model);
    b.section_stress(model);
    b.section_summary(model);
    b.section_submitter(model);
    b.section_profile(model);
    b.section_allocation(model);
    b.section_recommendations(model);
    b.finish()
}

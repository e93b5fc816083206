use crate::domain::model::{Element, LoShuGrid, NumberKind, NumerologyProfile, ReductionChain};
use crate::domain::ports::MeaningLookup;
use chrono::NaiveTime;
use std::fmt;

const RULE: &str =
    "__________________________________________________________________________________________";
const NOT_APPLICABLE: &str = "Not applicable";

/// Header details that do not feed the calculation.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    pub time: Option<NaiveTime>,
    pub place: Option<String>,
}

pub struct Report<'a> {
    profile: &'a NumerologyProfile,
    meanings: &'a dyn MeaningLookup,
    context: &'a ReportContext,
}

impl<'a> Report<'a> {
    pub fn new(
        profile: &'a NumerologyProfile,
        meanings: &'a dyn MeaningLookup,
        context: &'a ReportContext,
    ) -> Self {
        Self {
            profile,
            meanings,
            context,
        }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.profile.birth_date;
        match date.as_naive_date() {
            Some(d) => write!(f, "{}", d.format("%A, %B %-d, %Y"))?,
            None => write!(f, "{}", date)?,
        }
        if let Some(time) = self.context.time {
            write!(f, ", at {}", time.format("%H:%M"))?;
        }
        if let Some(place) = &self.context.place {
            write!(f, " in {}", place)?;
        }
        writeln!(f, ", is your birth day.")?;
        writeln!(f, "{}\n", RULE)
    }

    fn write_core_numbers(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.profile;
        let stats = &p.digit_stats;

        writeln!(f, "Your Core Numbers")?;
        writeln!(
            f,
            "{} is your Psychic/Driver Number from {}",
            p.driver.reduced(),
            p.driver
        )?;
        writeln!(
            f,
            "{} is your Destiny/Conductor Number from {} → {}",
            p.destiny.reduced(),
            p.digit_string(),
            p.destiny
        )?;
        if let Some(kua) = p.kua {
            writeln!(
                f,
                "{} is your KUA Number: {}",
                kua,
                self.meanings.single(kua).unwrap_or(NOT_APPLICABLE)
            )?;
        }

        let present: Vec<String> = stats.present().map(|d| d.to_string()).collect();
        let repeating: Vec<String> = stats
            .repeating
            .iter()
            .map(|(digit, count)| format!("{} ({}x)", digit, count))
            .collect();
        let missing: Vec<String> = stats.missing.iter().map(u32::to_string).collect();

        writeln!(f, "You have numbers: {}", present.join(", "))?;
        writeln!(f, "Repeat Numbers: {}", repeating.join(", "))?;
        writeln!(f, "Missing Numbers: {}", missing.join(", "))?;
        writeln!(f, "{}\n", RULE)
    }

    fn write_lo_shu(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.profile.lo_shu();
        writeln!(f, "Lo Shu Grid")?;
        for (i, row) in grid.cells.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .map(|&(digit, count)| {
                    let cell = if count == 0 {
                        "-".to_string()
                    } else {
                        digit.to_string().repeat(count)
                    };
                    format!("{:^5}", cell)
                })
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
            if i + 1 < LoShuGrid::LAYOUT.len() {
                writeln!(f, "-----+-----+-----")?;
            }
        }
        writeln!(f, "{}\n", RULE)
    }

    fn write_number_section(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        chain: &ReductionChain,
    ) -> fmt::Result {
        let compound = chain.compound();
        let single = chain.reduced();
        let compound_meaning = self.meanings.compound(compound);
        let kind = compound_meaning
            .map(|m| m.kind)
            .unwrap_or_else(|| chain.kind());

        writeln!(f, "{} as Your {} Number", single, title)?;
        writeln!(f, "Compound: {} → Single: {}", compound, single)?;
        match Element::for_number(single) {
            Some(element) => writeln!(f, "Element: {}", element)?,
            None => writeln!(f, "Element: Unknown")?,
        }
        writeln!(
            f,
            "Karmic: {}, Master Number: {}",
            yes_no(kind == NumberKind::Karmic),
            yes_no(kind == NumberKind::Master)
        )?;
        writeln!(
            f,
            "Compound Number meaning ({}): {}",
            compound,
            compound_meaning
                .map(|m| m.text.as_str())
                .unwrap_or(NOT_APPLICABLE)
        )?;
        match kind {
            NumberKind::Karmic => writeln!(
                f,
                "Karmic Number Meaning ({}): {}",
                compound,
                self.meanings.karmic(compound).unwrap_or(NOT_APPLICABLE)
            )?,
            NumberKind::Master => writeln!(
                f,
                "Master Number Meaning ({}): {}",
                compound,
                self.meanings.master(compound).unwrap_or(NOT_APPLICABLE)
            )?,
            NumberKind::Regular => {}
        }
        writeln!(
            f,
            "Single Number meaning ({}): {}",
            single,
            self.meanings.single(single).unwrap_or(NOT_APPLICABLE)
        )?;
        writeln!(f, "{}\n", RULE)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        self.write_core_numbers(f)?;
        self.write_lo_shu(f)?;
        self.write_number_section(f, "Psychic/Driver", &self.profile.driver)?;
        self.write_number_section(f, "Destiny/Conductor", &self.profile.destiny)
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn render_report(
    profile: &NumerologyProfile,
    meanings: &dyn MeaningLookup,
    context: &ReportContext,
) -> String {
    Report::new(profile, meanings, context).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MeaningsTable;
    use crate::core::engine::NumerologyEngine;
    use crate::domain::model::Gender;

    fn profile() -> NumerologyProfile {
        NumerologyEngine::default().profile(&"1990-07-16".parse().unwrap(), Some(Gender::Male))
    }

    #[test]
    fn test_report_core_numbers() {
        let report = render_report(
            &profile(),
            &MeaningsTable::default(),
            &ReportContext {
                time: NaiveTime::from_hms_opt(6, 45, 0),
                place: Some("Pune".to_string()),
            },
        );

        assert!(report.starts_with("Monday, July 16, 1990, at 06:45 in Pune, is your birth day."));
        assert!(report.contains("7 is your Psychic/Driver Number from 16 → 7"));
        assert!(report.contains("33 is your Destiny/Conductor Number from 16071990 → 33"));
        assert!(report.contains("1 is your KUA Number: Not applicable"));
        assert!(report.contains("You have numbers: 1, 6, 7, 9"));
        assert!(report.contains("Repeat Numbers: 1 (2x), 9 (2x)"));
        assert!(report.contains("Missing Numbers: 2, 3, 4, 5, 8"));
    }

    #[test]
    fn test_report_without_meanings_says_not_applicable() {
        let report = render_report(&profile(), &MeaningsTable::default(), &ReportContext::default());

        assert!(report.contains("Compound Number meaning (16): Not applicable"));
        assert!(report.contains("Single Number meaning (7): Not applicable"));
        assert!(report.contains("Karmic: Yes, Master Number: No"));
        assert!(report.contains("Karmic Number Meaning (16): Not applicable"));
        assert!(report.contains("Master Number Meaning (33): Not applicable"));
        assert!(report.contains("Element: Metal"));
        assert!(report.contains("Element: Unknown"));
    }

    #[test]
    fn test_report_uses_meanings() {
        let meanings = MeaningsTable::from_json_str(
            r#"{
                "compound": {"16": {"type": "karmic", "text": "The shattered citadel"}},
                "karmic": {"16": {"text": "Pride before a fall"}},
                "single": {"1": "Leader", "7": "Seeker"}
            }"#,
        )
        .unwrap();
        let report = render_report(&profile(), &meanings, &ReportContext::default());

        assert!(report.contains("1 is your KUA Number: Leader"));
        assert!(report.contains("Compound Number meaning (16): The shattered citadel"));
        assert!(report.contains("Karmic Number Meaning (16): Pride before a fall"));
        assert!(report.contains("Single Number meaning (7): Seeker"));
    }

    #[test]
    fn test_report_lo_shu_grid() {
        let report = render_report(&profile(), &MeaningsTable::default(), &ReportContext::default());
        // top row is 4 9 2; 9 appears twice, 4 and 2 are absent
        assert!(report.contains("  -  | 99  |  -  "));
        // bottom row is 8 1 6
        assert!(report.contains("  -  | 11  |  6  "));
    }
}

use crate::core::analysis::analyze;
use crate::core::reduction::{digit_root, is_master, reduce};
use crate::domain::model::{
    BirthDate, DestinyPolicy, EngineOptions, Gender, NumerologyProfile, ProfileRequest,
    ReductionChain,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

/// Driver (psychic) number: the reduced day of month.
pub fn driver(day: u32) -> ReductionChain {
    reduce(day)
}

/// Destiny (conductor) number. The chain starts at the pre-reduction sum,
/// never at the concatenated date.
pub fn destiny(date: &BirthDate, policy: DestinyPolicy) -> ReductionChain {
    let compound = match policy {
        DestinyPolicy::DigitSum => date.digits().iter().sum::<u32>(),
        DestinyPolicy::IntegerSum => date.day() + date.month() + date.year().unsigned_abs(),
    };
    reduce(compound)
}

/// KUA number for a birth year.
///
/// A year sum that lands on a master number is collapsed to one digit
/// before the gender formula, and the formula result is reduced without
/// the master exemption, so the value is always in 1..=9.
pub fn kua(date: &BirthDate, gender: Gender, lunar_adjustment: bool) -> u32 {
    let year = if lunar_adjustment && date.month() <= 2 && date.day() < 4 {
        date.year() - 1
    } else {
        date.year()
    };

    let mut year_sum = reduce(year.unsigned_abs()).reduced();
    if is_master(year_sum) {
        year_sum = digit_root(year_sum);
    }

    let k = match gender {
        Gender::Male => digit_root(11 - year_sum),
        Gender::Female => digit_root(4 + year_sum),
    };

    // The unreduced formula reaches 0 for a male year sum of 11; collapsing
    // masters first lands on 9 directly, so this arm only keeps the rule whole.
    match (k, gender) {
        (0, _) => 9,
        (5, Gender::Male) => 2,
        (5, Gender::Female) => 8,
        (k, _) => k,
    }
}

impl ProfileRequest {
    pub fn birth_date(&self) -> Result<BirthDate> {
        let day = validate_required_field("day", &self.day)?;
        let month = validate_required_field("month", &self.month)?;
        let year = validate_required_field("year", &self.year)?;
        BirthDate::new(*day, *month, *year)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NumerologyEngine {
    options: EngineOptions,
}

impl NumerologyEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn profile(&self, date: &BirthDate, gender: Option<Gender>) -> NumerologyProfile {
        let digits = date.digits();
        let driver = driver(date.day());
        let destiny = destiny(date, self.options.destiny_policy);
        let kua = gender.map(|g| kua(date, g, self.options.lunar_adjustment));

        let mut extra = vec![destiny.reduced()];
        if self.options.kua_fills_missing {
            extra.extend(kua);
        }
        let digit_stats = analyze(&digits, &extra);

        tracing::debug!(
            "Profile for {}: driver {}, destiny {}, kua {:?}",
            date,
            driver,
            destiny,
            kua
        );

        NumerologyProfile {
            birth_date: *date,
            gender,
            digits,
            driver,
            destiny,
            kua,
            digit_stats,
        }
    }

    /// Validates raw input first, refusing to compute on a partial date.
    pub fn profile_from_request(&self, request: &ProfileRequest) -> Result<NumerologyProfile> {
        let date = request.birth_date().inspect_err(|e| {
            tracing::warn!("Rejected profile request: {}", e);
        })?;
        Ok(self.profile(&date, request.gender))
    }
}

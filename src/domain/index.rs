//! Interest rate index with a mutable fixing history.

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::domain::error::ObjregError;
use crate::domain::object::Object;
use crate::domain::tenor::Tenor;

/// A rate index such as Euribor 6M.
///
/// The fixing history sits behind a `RefCell` because fixings arrive after
/// the index has been stored, through shared handles that cannot borrow it
/// mutably.
pub struct RateIndex {
    family: String,
    tenor: Tenor,
    fixing_days: u32,
    currency: String,
    fixings: RefCell<BTreeMap<NaiveDate, f64>>,
    instance_name: Option<String>,
}

impl RateIndex {
    pub fn new(family: &str, tenor: Tenor, fixing_days: u32, currency: &str) -> Self {
        RateIndex {
            family: family.to_string(),
            tenor,
            fixing_days,
            currency: currency.to_string(),
            fixings: RefCell::new(BTreeMap::new()),
            instance_name: None,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn tenor(&self) -> Tenor {
        self.tenor
    }

    pub fn fixing_days(&self) -> u32 {
        self.fixing_days
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn fixing(&self, date: NaiveDate) -> Option<f64> {
        self.fixings.borrow().get(&date).copied()
    }

    pub fn fixing_count(&self) -> usize {
        self.fixings.borrow().len()
    }

    /// Record historical fixings, returning how many were applied.
    ///
    /// `dates` and `values` pair up positionally and must be the same
    /// length. A value of exactly `0.0` is the null sentinel and is skipped;
    /// any other value that is not strictly positive (negative or NaN)
    /// rejects the whole batch before anything is applied.
    /// A date that already carries a different value is a conflict: with
    /// `force_overwrite` the new value wins, otherwise every non-conflicting
    /// fixing is still applied and the batch then fails naming the first
    /// conflicting date. Re-asserting an identical value is accepted
    /// silently.
    pub fn add_fixings(
        &self,
        dates: &[NaiveDate],
        values: &[f64],
        force_overwrite: bool,
    ) -> Result<usize, ObjregError> {
        if dates.len() != values.len() {
            return Err(ObjregError::FixingSizeMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        for (&date, &value) in dates.iter().zip(values) {
            if value != 0.0 && !(value > 0.0) {
                return Err(ObjregError::NonPositiveFixing { value, date });
            }
        }
        let mut history = self.fixings.borrow_mut();
        let mut applied = 0;
        let mut conflict: Option<NaiveDate> = None;
        for (&date, &value) in dates.iter().zip(values) {
            if value == 0.0 {
                continue;
            }
            match history.get(&date) {
                Some(&existing)
                    if !force_overwrite && (existing - value).abs() > f64::EPSILON =>
                {
                    conflict.get_or_insert(date);
                }
                _ => {
                    history.insert(date, value);
                    applied += 1;
                }
            }
        }
        match conflict {
            Some(date) => Err(ObjregError::DuplicateFixing { date }),
            None => Ok(applied),
        }
    }
}

impl fmt::Display for RateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} index in {}, {} fixing days, {} fixings",
            self.family,
            self.tenor,
            self.currency,
            self.fixing_days,
            self.fixing_count()
        )
    }
}

impl Object for RateIndex {
    fn set_instance_name(&mut self, name: &str) {
        self.instance_name = Some(name.to_string());
    }

    fn instance_name(&self) -> Option<&str> {
        self.instance_name.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

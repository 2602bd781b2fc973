use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Error, Debug)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Settings for the Schur complement assembly.
///
/// Construct with [`SchurSettingsBuilder`], which validates the values
/// before returning, or use `SchurSettings::default()`.
///
/// ```no_run
/// use sdpschur::schur::SchurSettingsBuilder;
///
/// let settings = SchurSettingsBuilder::<f64>::default()
///     .verbose(true)
///     .zero_tolerance(1e-14)
///     .build()
///     .unwrap();
/// ```

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchurSettings<T: FloatT> {
    ///log a summary of every update at info level
    #[builder(default = "false")]
    pub verbose: bool,

    ///Schur entries with absolute value at or below this threshold are
    ///not written.  The default of zero skips exact zeros only.
    #[builder(default = "T::zero()")]
    pub zero_tolerance: T,

    ///check that sparse U and V have no entries outside the diagonal blocks
    #[builder(default = "true")]
    pub check_blocks: bool,

    ///check that dense U and V are exactly symmetric
    #[builder(default = "false")]
    pub check_symmetry: bool,

    ///record per-phase timings in the assembler info
    #[builder(default = "false")]
    pub collect_timings: bool,
}

impl<T> Default for SchurSettings<T>
where
    T: FloatT,
{
    fn default() -> SchurSettings<T> {
        SchurSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> SchurSettings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_zero_tolerance(self.zero_tolerance)
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SchurSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SchurSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> SchurSettingsBuilder<T>
where
    T: FloatT,
{
    /// check that the specified zero tolerance is valid
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(tol) = self.zero_tolerance {
            validate_zero_tolerance(tol)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_zero_tolerance<T: FloatT>(tol: T) -> Result<(), SettingsError> {
    if tol.is_finite() && tol >= T::zero() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("zero_tolerance"))
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    let settings = SchurSettingsBuilder::<f64>::default().build().unwrap();
    assert_eq!(settings, SchurSettings::default());
    assert_eq!(settings.zero_tolerance, 0.);

    // fail on negative or non-finite tolerances
    assert!(SchurSettingsBuilder::<f64>::default()
        .zero_tolerance(-1e-12)
        .build()
        .is_err());
    assert!(SchurSettingsBuilder::<f64>::default()
        .zero_tolerance(f64::NAN)
        .build()
        .is_err());

    // directly construct a bad SchurSettings and manually check
    let settings = SchurSettings::<f64> {
        zero_tolerance: f64::INFINITY,
        ..SchurSettings::default()
    };
    assert!(settings.validate().is_err());
}

// ── Client-side form validation ──
//
// Numeric quantities stay strings all the way to the server; this module
// only checks their shape before submission.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use fleetdesk_api::types::{AddressFormData, OrderFormData, TruckFormData};

static NUMERIC: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[0-9]+([.,][0-9]+)?$"));

/// `"12"`, `"12.5"` and `"12,5"` pass; empty, signed and exponent forms
/// do not. Surrounding whitespace is ignored.
pub fn is_numeric_string(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    NUMERIC.as_ref().is_ok_and(|re| re.is_match(trimmed))
}

/// Present and not blank.
pub fn validate_required(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Present and numeric.
pub fn validate_numeric(value: Option<&str>) -> bool {
    value.is_some_and(is_numeric_string)
}

// ── Field errors ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: Rule,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Rule::Required => write!(f, "{} is required", self.field),
            Rule::Numeric => write!(f, "{} must be a number", self.field),
        }
    }
}

/// Every failing field of one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation failed: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }
}

/// Collects failures while a form is checked.
#[derive(Default)]
struct Checker(Vec<FieldError>);

impl Checker {
    fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if !validate_required(Some(value)) {
            self.0.push(FieldError {
                field,
                rule: Rule::Required,
            });
        }
        self
    }

    /// Required, then numeric. A blank value only reports `Required`.
    fn numeric(&mut self, field: &'static str, value: &str) -> &mut Self {
        if !validate_required(Some(value)) {
            return self.required(field, value);
        }
        if !is_numeric_string(value) {
            self.0.push(FieldError {
                field,
                rule: Rule::Numeric,
            });
        }
        self
    }

    fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.0)))
        }
    }
}

/// Form payloads that can be checked before submission.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validate for AddressFormData {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checker::default()
            .required("addressLine1", &self.address_line1)
            .required("city", &self.city)
            .required("state", &self.state)
            .required("country", &self.country)
            .required("postcode", &self.postcode)
            .finish()
    }
}

impl Validate for TruckFormData {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checker::default()
            .required("plateNumber", &self.plate_number)
            .required("vinCode", &self.vin_code)
            .required("registrationCertificate", &self.registration_certificate)
            .required("driverName", &self.driver_name)
            .numeric("width", &self.width)
            .numeric("height", &self.height)
            .numeric("length", &self.length)
            .numeric("maxWeight", &self.max_weight)
            .finish()
    }
}

impl Validate for OrderFormData {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checker = Checker::default();
        checker
            .numeric("cargoWeight", &self.cargo_weight)
            .required("destination", &self.destination);
        for pallet in &self.pallets {
            checker
                .numeric("pallets.weight", pallet.weight.as_str())
                .numeric("pallets.height", pallet.height.as_str());
        }
        checker.finish()
    }
}

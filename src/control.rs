/// Calculation flags, threaded explicitly into every call.
///
/// `field_coefficients` requires the coefficient ring to be a field;
/// it enables pivot normalization during SNF reduction.
/// `silent_operation` suppresses the per-pivot progress log.
/// `test_smith_normal_form` re-multiplies `P·A·Q` after each SNF and
/// panics on mismatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HomologyControl {
    pub field_coefficients: bool,
    pub silent_operation: bool,
    pub test_smith_normal_form: bool,
}

impl HomologyControl {
    pub fn integral() -> Self {
        Self::default()
    }

    pub fn field() -> Self {
        Self { field_coefficients: true, ..Self::default() }
    }

    pub fn checked(self) -> Self {
        Self { test_smith_normal_form: true, ..self }
    }

    pub fn silent(self) -> Self {
        Self { silent_operation: true, ..self }
    }
}

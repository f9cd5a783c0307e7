use log::debug;
use crate::{EucRing, EucRingOps, HomologyControl};
use crate::dense::*;

/// Inverse of a unimodular matrix via its Smith normal form:
/// `P·M·Q = I` gives `M⁻¹ = Q·P`.
///
/// The product `M·M⁻¹` is always re-checked; a mismatch means `M` was
/// not unimodular over the coefficient ring, and is fatal.
pub fn snf_inverse<R>(m: &Mat<R>, ctl: &HomologyControl) -> Mat<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    assert!(m.is_square());

    debug!("start snf-inverse: {:?}.", m.shape());

    let res = snf(m, ctl);
    let minv = res.q() * res.p();

    let prod = m * &minv;
    if !prod.is_id() {
        panic!(
            "snf-inverse verification failed: M·M⁻¹ ≠ I.\nM = {}\nM⁻¹ = {}\nM·M⁻¹ = {}",
            m, minv, prod
        );
    }

    minv
}

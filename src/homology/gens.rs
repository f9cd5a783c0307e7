use log::{debug, info};
use crate::{EucRing, EucRingOps, HomologyControl};
use crate::dense::*;
use super::HomologySummand;

/// Generators of the (co)homology at position `k` of
///
/// ```text
///   C[k-1] <--[d_k]-- C[k] <--[d_kp1]-- C[k+1]
/// ```
///
/// given as the pair of boundary matrices `(d_k, d_kp1)`. A matrix with
/// no columns stands for a zero map out of the trivial module; the rank
/// of `C[k]` is then read off the other matrix. For cohomology the roles
/// of the two maps are exchanged by transposition.
///
/// Returned generating vectors are coordinates in the chain basis of
/// `C[k]`, torsion generators first. The presentation is re-checked on
/// the way; a failure means `d_k ∘ d_kp1 ≠ 0` and is fatal.
pub fn homology_generators<R>(d_k: &Mat<R>, d_kp1: &Mat<R>, cohomology: bool, ctl: &HomologyControl) -> HomologySummand<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    if d_k.ncols() > 0 && d_kp1.ncols() > 0 {
        assert_eq!(d_k.ncols(), d_kp1.nrows());
    }

    let num_k = if d_k.ncols() > 0 {
        d_k.ncols()
    } else {
        d_kp1.nrows()
    };

    debug!(
        "start homology-generators (num_k = {num_k}, cohomology = {cohomology}): d_k: {:?}, d_kp1: {:?}.",
        d_k.shape(), d_kp1.shape()
    );

    let s_k   = (d_k.ncols()   > 0).then(|| snf(d_k, ctl));
    let s_kp1 = (d_kp1.ncols() > 0).then(|| snf(d_kp1, ctl));

    let r_k   = s_k.as_ref().map_or(0, |s| s.rank());
    let r_kp1 = s_kp1.as_ref().map_or(0, |s| s.rank());

    let (num_cycle, num_boundary) = if cohomology {
        (num_k - r_kp1, r_k)
    } else {
        (num_k - r_k, r_kp1)
    };

    if num_cycle == 0 {
        return HomologySummand::trivial()
    }

    let cycles = cycle_basis(num_k, cohomology, &s_k, &s_kp1);

    let res = if num_boundary == 0 {
        let gens = (0..num_cycle).map(|j| cycles.col_vec(j)).collect();
        HomologySummand::new(gens, vec![])
    } else {
        let s_img = if cohomology {
            s_k.as_ref()
        } else {
            s_kp1.as_ref()
        };
        // num_boundary > 0 implies the corresponding map is present.
        let Some(s_img) = s_img else { unreachable!() };

        let bounds = boundary_basis(cohomology, s_img, ctl);
        let n = presentation(&cycles, &bounds, ctl);

        quotient(&cycles, &n, ctl)
    };

    if !ctl.silent_operation {
        info!("homology-generators done: {res} ({} gens, {} tors).", res.num_gens(), res.num_tors());
    }

    res
}

// Basis of the (co)cycle submodule, as columns. Cycles are the kernel
// columns of Q from snf(d_k); cocycles are the kernel rows of P from
// snf(d_kp1), transposed.
fn cycle_basis<R>(num_k: usize, cohomology: bool, s_k: &Option<SnfResult<R>>, s_kp1: &Option<SnfResult<R>>) -> Mat<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    if cohomology {
        match s_kp1 {
            Some(s) => s.p().submat_rows(s.rank()..num_k).transpose(),
            None    => Mat::id(num_k)
        }
    } else {
        match s_k {
            Some(s) => s.q().submat_cols(s.rank()..num_k),
            None    => Mat::id(num_k)
        }
    }
}

// Basis of the (co)boundary submodule, as columns. The image of d_kp1
// is spanned by the leading columns of P⁻¹·D; the image of the
// transposed d_k by the leading rows of D·Q⁻¹, transposed.
fn boundary_basis<R>(cohomology: bool, s: &SnfResult<R>, ctl: &HomologyControl) -> Mat<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    let r = s.rank();

    if cohomology {
        let qinv = snf_inverse(s.q(), ctl);
        let dq = s.d() * &qinv;
        dq.submat_rows(0..r).transpose()
    } else {
        let pinv = snf_inverse(s.p(), ctl);
        let pd = &pinv * s.d();
        pd.submat_cols(0..r)
    }
}

// Expresses the boundaries in the cycle basis: the unique N with
// cycles·N = bounds. Row-reducing [cycles | bounds] turns the cycle
// block into the identity, since the cycle columns span a direct
// summand; the bounds block then reads off N.
fn presentation<R>(cycles: &Mat<R>, bounds: &Mat<R>, ctl: &HomologyControl) -> Mat<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    let num_cycle = cycles.ncols();
    let num_boundary = bounds.ncols();

    let gk = cycles.concat(bounds);
    let mut e = row_echelon_in_place(gk, ctl.field_coefficients);

    for i in 0..num_cycle {
        if (-&e[(i, i)]).is_one() {
            e.mul_row(i, &-R::one());
        }
    }

    let n = e.submat(0..num_cycle, num_cycle..num_cycle + num_boundary);

    let prod = cycles * &n;
    if &prod != bounds {
        panic!(
            "homology-generators verification failed: boundaries do not lie in the cycle submodule (d∘d ≠ 0?).\ncycles = {}\nN = {}\ncycles·N = {}\nboundaries = {}",
            cycles, n, prod, bounds
        );
    }

    n
}

// Quotient of the free module spanned by the cycle basis, modulo the
// column space of N. With P·N·Q = D the summands are read off the
// diagonal of D, and the generator of summand i is the i-th column of
// cycles·P⁻¹.
fn quotient<R>(cycles: &Mat<R>, n: &Mat<R>, ctl: &HomologyControl) -> HomologySummand<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    let num_cycle = cycles.ncols();

    let s = snf(n, ctl);
    let pinv = snf_inverse(s.p(), ctl);
    let basis = cycles * &pinv;

    let mut gens = vec![];
    let mut tors = vec![];

    for i in 0..s.rank() {
        let d = &s.d()[(i, i)];
        if d.is_unit() {
            continue
        }
        gens.push(basis.col_vec(i));
        tors.push(d.clone());
    }

    for i in s.rank()..num_cycle {
        gens.push(basis.col_vec(i));
    }

    HomologySummand::new(gens, tors)
}

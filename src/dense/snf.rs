use std::cmp::min;
use log::{debug, info, trace};
use crate::{EucRing, EucRingOps, HomologyControl};
use crate::dense::*;

/// Smith normal form of `target`: unimodular `p`, `q` with `p * target * q = d`,
/// `d` diagonal with non-negative entries satisfying `d[i] | d[i+1]` below the rank
/// (trivially so for field coefficients).
pub fn snf<R>(target: &Mat<R>, ctl: &HomologyControl) -> SnfResult<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    snf_in_place(target.clone(), ctl)
}

pub fn snf_in_place<R>(target: Mat<R>, ctl: &HomologyControl) -> SnfResult<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    debug!("start snf: {:?}.", target.shape());
    trace!("{}", target);

    let orig = if ctl.test_smith_normal_form {
        Some(target.clone())
    } else {
        None
    };

    let mut calc = SnfCalc::new(target, *ctl);

    calc.process();

    let res = calc.result();

    if let Some(a) = orig {
        res.verify(&a);
    }

    debug!("snf done, rank = {}.", res.rank());
    trace!("{}", res.d());

    res
}

#[derive(Clone, Debug)]
pub struct SnfResult<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    d: Mat<R>,
    p: Mat<R>,
    q: Mat<R>,
    rank: usize
}

impl<R> SnfResult<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    pub fn d(&self) -> &Mat<R> {
        &self.d
    }

    pub fn p(&self) -> &Mat<R> {
        &self.p
    }

    pub fn q(&self) -> &Mat<R> {
        &self.q
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The nonzero diagonal entries of `d`.
    pub fn factors(&self) -> Vec<&R> {
        (0..self.rank).map(|i| &self.d[(i, i)]).collect()
    }

    pub fn destruct(self) -> (Mat<R>, Mat<R>, Mat<R>, usize) {
        (self.d, self.p, self.q, self.rank)
    }

    pub fn verify(&self, a: &Mat<R>) {
        let paq = &(&self.p * a) * &self.q;
        if paq != self.d {
            panic!(
                "snf verification failed: P·A·Q ≠ D.\nA = {}\nP = {}\nQ = {}\nP·A·Q = {}\nD = {}",
                a, self.p, self.q, paq, self.d
            );
        }
    }
}

#[derive(Debug)]
struct SnfCalc<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    target: Mat<R>,
    p: Mat<R>,
    q: Mat<R>,
    ctl: HomologyControl,
    rank: usize
}

impl<R> SnfCalc<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    fn new(target: Mat<R>, ctl: HomologyControl) -> Self {
        let (m, n) = target.shape();
        let p = Mat::id(m);
        let q = Mat::id(n);

        SnfCalc { target, p, q, ctl, rank: 0 }
    }

    fn result(self) -> SnfResult<R> {
        SnfResult {
            d: self.target,
            p: self.p,
            q: self.q,
            rank: self.rank
        }
    }

    fn process(&mut self) {
        let (m, n) = self.target.shape();
        let bound = min(m, n);

        while self.rank < bound {
            if !self.pivot_step(self.rank) {
                break
            }
            self.rank += 1;
        }

        self.diag_normalize();
        self.sign_normalize();
    }

    fn pivot_step(&mut self, k: usize) -> bool {
        let Some((i, j)) = self.find_pivot(k) else {
            return false
        };

        if !self.ctl.silent_operation {
            info!("snf pivot {k}: found at ({i}, {j})");
        }

        // bring the pivot to (k, k): columns first, then rows.
        if j > k {
            self.swap_cols(k, j);
        }
        if i > k {
            self.swap_rows(k, i);
        }

        if self.ctl.field_coefficients {
            self.normalize_pivot(k);
        }

        self.clear_at(k);

        true
    }

    // Expanding L-shaped search: row k+l rightward from the diagonal,
    // then column k+l downward, advancing l until a nonzero entry is
    // found or either index passes its bound.
    fn find_pivot(&self, k: usize) -> Option<(usize, usize)> {
        let (m, n) = self.target.shape();
        let mut l = 0;

        loop {
            let (i, j) = (k + l, k + l);
            if i >= m || j >= n {
                return None
            }

            if let Some(j1) = (j..n).find(|&j1| !self.target[(i, j1)].is_zero()) {
                return Some((i, j1))
            }
            if let Some(i1) = (i + 1..m).find(|&i1| !self.target[(i1, j)].is_zero()) {
                return Some((i1, j))
            }

            l += 1;
        }
    }

    fn normalize_pivot(&mut self, k: usize) {
        let u = self.target[(k, k)].clone();
        if !u.is_one() {
            self.div_row(k, &u);
        }
    }

    // Two-phase clearing to a fixed point: column elimination can
    // reintroduce nonzero row entries and vice versa.
    fn clear_at(&mut self, k: usize) {
        loop {
            let modified = self.clear_row(k) | self.clear_col(k);
            if !modified {
                break
            }
        }
    }

    fn clear_row(&mut self, k: usize) -> bool {
        let mut modified = false;

        for j in k + 1..self.target.ncols() {
            if self.target[(k, j)].is_zero() {
                continue
            }

            let x = &self.target[(k, k)];
            let y = &self.target[(k, j)];

            if x.divides(y) {
                let r = -(y / x);
                self.add_col_to(k, j, &r);
            } else {
                // d = sx + ty, a = x/d, b = y/d.
                //
                // [x y][s -b] = [d 0]
                //      [t  a]
                let (d, s, t) = EucRing::gcdx(x, y);
                let (a, b) = (x / &d, y / &d);

                self.right_elementary([&s, &t, &-b, &a], k, j);
            }

            modified = true
        }

        modified
    }

    fn clear_col(&mut self, k: usize) -> bool {
        let mut modified = false;

        for i in k + 1..self.target.nrows() {
            if self.target[(i, k)].is_zero() {
                continue
            }

            let x = &self.target[(k, k)];
            let y = &self.target[(i, k)];

            if x.divides(y) {
                let r = -(y / x);
                self.add_row_to(k, i, &r);
            } else {
                // d = sx + ty, a = x/d, b = y/d.
                //
                // [ s t][x] < k  = [d]
                // [-b a][y] < i    [0]
                let (d, s, t) = EucRing::gcdx(x, y);
                let (a, b) = (x / &d, y / &d);

                self.left_elementary([&s, &t, &-b, &a], k, i);
            }

            modified = true
        }

        modified
    }

    // Establish the divisibility chain d[i] | d[i+1] along the diagonal.
    fn diag_normalize(&mut self) {
        debug_assert!(self.target.is_diag());

        let r = self.rank;
        if r < 2 {
            return
        }

        'outer: loop {
            for i in 0..r - 1 {
                if !self.diag_normalize_step(i) {
                    continue 'outer
                }
            }
            break
        }
    }

    fn diag_normalize_step(&mut self, i: usize) -> bool {
        let x = &self.target[(i, i)];
        let y = &self.target[(i + 1, i + 1)];

        assert!(!x.is_zero());
        assert!(!y.is_zero());

        if x.divides(y) {
            return true
        }

        if y.divides(x) {
            self.swap_rows(i, i + 1);
            self.swap_cols(i, i + 1);
            return false
        }

        // sx + ty = d, a = x/d, b = y/d.
        //
        // [1   1 ][x   ][s  -b] = [d      ]
        // [-tb sa][   y][t   a]   [   xy/d]
        let (d, s, t) = EucRing::gcdx(x, y);
        let (a, b) = (x / &d, y / &d);
        let (tb, sa) = (&t * &b, &s * &a);

        self.left_elementary([&R::one(), &R::one(), &-tb, &sa], i, i + 1);
        self.right_elementary([&s, &t, &-b, &a], i, i + 1);

        false
    }

    fn sign_normalize(&mut self) {
        for i in 0..self.rank {
            let u = self.target[(i, i)].normalizing_unit();
            if !u.is_one() {
                self.mul_row(i, &u);
            }
        }
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        self.target.swap_rows(i, j);
        self.p.swap_rows(i, j);

        trace!("swap-rows: ({i}, {j})\n{}", self.target);
    }

    fn swap_cols(&mut self, i: usize, j: usize) {
        self.target.swap_cols(i, j);
        self.q.swap_cols(i, j);

        trace!("swap-cols: ({i}, {j})\n{}", self.target);
    }

    fn mul_row(&mut self, i: usize, u: &R) {
        self.target.mul_row(i, u);
        self.p.mul_row(i, u);

        trace!("mul-row: {i} by {u}\n{}", self.target);
    }

    fn div_row(&mut self, i: usize, u: &R) {
        self.target.div_row(i, u);
        self.p.div_row(i, u);

        trace!("div-row: {i} by {u}\n{}", self.target);
    }

    fn add_row_to(&mut self, i: usize, j: usize, r: &R) {
        self.target.add_row_to(i, j, r);
        self.p.add_row_to(i, j, r);

        trace!("add-row: {i} to {j} by {r}\n{}", self.target);
    }

    fn add_col_to(&mut self, i: usize, j: usize, r: &R) {
        self.target.add_col_to(i, j, r);
        self.q.add_col_to(i, j, r);

        trace!("add-col: {i} to {j} by {r}\n{}", self.target);
    }

    // Multiply [a, b; c, d] from left, assuming det = 1.
    fn left_elementary(&mut self, comps: [&R; 4], i: usize, j: usize) {
        let [a, b, c, d] = comps;
        debug_assert!((a * d - b * c).is_one());

        self.target.left_elementary(comps, i, j);
        self.p.left_elementary(comps, i, j);

        trace!("left-elem: [{a}, {b}; {c}, {d}] for rows ({i}, {j})\n{}", self.target);
    }

    // Multiply [a, c; b, d] from right, assuming det = 1.
    fn right_elementary(&mut self, comps: [&R; 4], i: usize, j: usize) {
        let [a, b, c, d] = comps;
        debug_assert!((a * d - b * c).is_one());

        self.target.right_elementary(comps, i, j);
        self.q.right_elementary(comps, i, j);

        trace!("right-elem: [{a}, {b}; {c}, {d}] for cols ({i}, {j})\n{}", self.target);
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use crate::{FF, Ratio};
    use num_traits::Zero;
    use super::*;

    fn ctl() -> HomologyControl {
        HomologyControl::integral().checked().silent()
    }

    fn assert_snf_of(a: &Mat<i64>, res: &SnfResult<i64>) {
        let paq = &(res.p() * a) * res.q();
        assert_eq!(&paq, res.d());
        assert!(res.d().is_diag());

        for i in 0..res.rank() {
            assert!(res.d()[(i, i)] > 0);
        }
        for i in res.rank()..min(a.nrows(), a.ncols()) {
            assert!(res.d()[(i, i)].is_zero());
        }
        for i in 1..res.rank() {
            let (x, y) = (&res.d()[(i - 1, i - 1)], &res.d()[(i, i)]);
            assert!(x.divides(y));
        }
    }

    #[test]
    fn snf_2x2() {
        let a: Mat<i64> = Mat::from_data((2, 2), [2, 4, 6, 8]);
        let res = snf(&a, &ctl());

        assert_eq!(res.d(), &Mat::diag((2, 2), [2, 4]));
        assert_eq!(res.rank(), 2);
        assert_snf_of(&a, &res);
    }

    #[test]
    fn snf_non_square_wide() {
        let a: Mat<i64> = Mat::from_data((2, 3), [2, 4, 4, -6, 6, 12]);
        let res = snf(&a, &ctl());

        assert_eq!(res.d(), &Mat::diag((2, 3), [2, 6]));
        assert_eq!(res.rank(), 2);
        assert_snf_of(&a, &res);
    }

    #[test]
    fn snf_non_square_tall() {
        let a: Mat<i64> = Mat::from_data((3, 2), [2, -6, 4, 6, 4, 12]);
        let res = snf(&a, &ctl());

        assert_eq!(res.d(), &Mat::diag((3, 2), [2, 6]));
        assert_eq!(res.rank(), 2);
        assert_snf_of(&a, &res);
    }

    #[test]
    fn snf_5x5() {
        let a: Mat<i64> = Mat::from_data((5, 5), [
            -20, -7, -27, 2, 29,
            17, 8, 14, -4, -10,
            13, 8, 10, -4, -6,
            -9, -2, -14, 0, 16,
            5, 0, 5, -1, -4
        ]);
        let res = snf(&a, &ctl());

        assert_eq!(res.d(), &Mat::diag((5, 5), [1, 1, 1, 2, 60]));
        assert_eq!(res.rank(), 5);
        assert_snf_of(&a, &res);
    }

    #[test]
    fn snf_6x9() {
        let a: Mat<i64> = Mat::from_data((6, 9), [
            1, 0, 1, 0, 0, 1, 1, 0, 1,
            0, 1, 3, 1, 0, 1, 0, 2, 0,
            0, 0, 1, 1, 0, 0, 0, 5, 1,
            0, 1, 1, 0, 3, 0, 0, 0, 0,
            0, 1, 0, 1, 0, 0, 1, 0, 1,
            1, 0, 2, 0, 1, 1, 0, 1, 1
        ]);
        let res = snf(&a, &ctl());

        assert_eq!(res.d(), &Mat::diag((6, 9), [1, 1, 1, 1, 1, 1]));
        assert_eq!(res.rank(), 6);
        assert_snf_of(&a, &res);
    }

    #[test]
    fn snf_zero() {
        let a: Mat<i64> = Mat::zero((3, 4));
        let res = snf(&a, &ctl());

        assert_eq!(res.rank(), 0);
        assert!(res.d().is_zero());
        assert!(res.p().is_id());
        assert!(res.q().is_id());
    }

    #[test]
    fn snf_zero_row_col_skip() {
        let a: Mat<i64> = Mat::from_data((2, 2), [0, 0, 0, 5]);
        let res = snf(&a, &ctl());

        assert_eq!(res.d(), &Mat::diag((2, 2), [5, 0]));
        assert_eq!(res.rank(), 1);
        assert_snf_of(&a, &res);
    }

    #[test]
    fn snf_negative_entries() {
        let a: Mat<i64> = Mat::from_data((2, 2), [-2, 0, 0, -3]);
        let res = snf(&a, &ctl());

        assert_eq!(res.d(), &Mat::diag((2, 2), [1, 6]));
        assert_snf_of(&a, &res);
    }

    #[test]
    fn snf_degenerate_shapes() {
        let res = snf(&Mat::<i64>::zero((0, 3)), &ctl());
        assert_eq!(res.rank(), 0);
        assert_eq!(res.q().shape(), (3, 3));

        let res = snf(&Mat::<i64>::zero((3, 0)), &ctl());
        assert_eq!(res.rank(), 0);
        assert_eq!(res.p().shape(), (3, 3));

        let res = snf(&Mat::<i64>::zero((0, 0)), &ctl());
        assert_eq!(res.rank(), 0);
    }

    #[test]
    fn snf_deterministic() {
        let a: Mat<i64> = Mat::from_data((3, 3), [3, 1, 4, 1, 5, 9, 2, 6, 5]);
        let res1 = snf(&a, &ctl());
        let res2 = snf(&a, &ctl());

        assert_eq!(res1.d(), res2.d());
        assert_eq!(res1.rank(), res2.rank());
    }

    #[test]
    fn snf_factors() {
        let a: Mat<i64> = Mat::from_data((2, 2), [2, 4, 6, 8]);
        let res = snf(&a, &ctl());
        assert_eq!(res.factors(), vec![&2, &4]);
    }

    #[test]
    fn snf_bigint() {
        let a: Mat<BigInt> = Mat::from_data((5, 5), [
            -20, -7, -27, 2, 29,
            17, 8, 14, -4, -10,
            13, 8, 10, -4, -6,
            -9, -2, -14, 0, 16,
            5, 0, 5, -1, -4
        ].map(BigInt::from));
        let res = snf(&a, &ctl());

        let paq = &(res.p() * &a) * res.q();
        assert_eq!(&paq, res.d());
        assert_eq!(res.d(), &Mat::diag((5, 5), [1, 1, 1, 2, 60].map(BigInt::from)));
    }

    #[test]
    fn snf_field() {
        type F5 = FF<5>;
        let ctl = HomologyControl::field().checked().silent();

        let a: Mat<F5> = Mat::from_data((2, 2), [2, 4, 6, 8].map(F5::new));
        let res = snf(&a, &ctl);

        assert!(res.d().is_id());
        assert_eq!(res.rank(), 2);

        let paq = &(res.p() * &a) * res.q();
        assert_eq!(&paq, res.d());
    }

    #[test]
    fn snf_rational_rank_deficient() {
        type Q = Ratio<i64>;
        let ctl = HomologyControl::field().checked().silent();

        let a: Mat<Q> = Mat::from_data((2, 2), [1, 2, 2, 4].map(Q::from));
        let res = snf(&a, &ctl);

        assert_eq!(res.d(), &Mat::diag((2, 2), [Q::from(1), Q::from(0)]));
        assert_eq!(res.rank(), 1);
    }
}

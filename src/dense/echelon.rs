use log::trace;
use crate::{EucRing, EucRingOps};
use crate::dense::*;

/// Reduced row echelon form by unimodular row operations.
///
/// Each pivot becomes the gcd of its column segment; entries above a
/// pivot are reduced by the Euclidean quotient, so they vanish whenever
/// the pivot is a unit. With `normalize_pivots` (field coefficients)
/// every pivot row is divided through by the pivot.
pub fn row_echelon<R>(a: &Mat<R>, normalize_pivots: bool) -> Mat<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    row_echelon_in_place(a.clone(), normalize_pivots)
}

pub fn row_echelon_in_place<R>(mut a: Mat<R>, normalize_pivots: bool) -> Mat<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    let (m, n) = a.shape();
    let mut r = 0;

    for c in 0..n {
        if r >= m {
            break
        }

        let Some(i0) = (r..m).find(|&i| !a[(i, c)].is_zero()) else {
            continue
        };

        if i0 > r {
            a.swap_rows(r, i0);
        }

        for i in r + 1..m {
            if a[(i, c)].is_zero() {
                continue
            }

            let x = &a[(r, c)];
            let y = &a[(i, c)];

            if x.divides(y) {
                let q = -(y / x);
                a.add_row_to(r, i, &q);
            } else {
                // d = sx + ty, u = x/d, v = y/d.
                //
                // [ s t][x] < r  = [d]
                // [-v u][y] < i    [0]
                let (d, s, t) = EucRing::gcdx(x, y);
                let (u, v) = (x / &d, y / &d);

                a.left_elementary([&s, &t, &-v, &u], r, i);
            }
        }

        if normalize_pivots {
            let u = a[(r, c)].clone();
            if !u.is_one() {
                a.div_row(r, &u);
            }
        }

        for i in 0..r {
            if a[(i, c)].is_zero() {
                continue
            }

            let q = &a[(i, c)] / &a[(r, c)];
            if !q.is_zero() {
                let q = -q;
                a.add_row_to(r, i, &q);
            }
        }

        trace!("echelon col {c}, pivot row {r}\n{}", a);

        r += 1;
    }

    a
}

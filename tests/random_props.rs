use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use num_traits::Zero;

use chaingen::{EucRing, Ring, Ratio, HomologyControl};
use chaingen::dense::{snf, snf_inverse, row_echelon, Mat, MatType};
use chaingen::homology::homology_generators;

fn ctl() -> HomologyControl {
    HomologyControl::integral().checked().silent()
}

fn rand_mat(rng: &mut StdRng, shape: (usize, usize)) -> Mat<i64> {
    let (m, n) = shape;
    Mat::from_data(shape, (0..m * n).map(|_| rng.gen_range(-5..=5)))
}

#[test]
fn snf_random() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..30 {
        let m = rng.gen_range(1..6);
        let n = rng.gen_range(1..6);
        let a = rand_mat(&mut rng, (m, n));

        let res = snf(&a, &ctl());
        let d = res.d();

        let paq = &(res.p() * &a) * res.q();
        assert_eq!(&paq, d);

        assert!(d.is_diag());

        for i in 0..res.rank() {
            assert!(d[(i, i)] > 0);
        }
        for i in 1..res.rank() {
            let (x, y) = (&d[(i - 1, i - 1)], &d[(i, i)]);
            assert!(x.divides(y));
        }
    }
}

#[test]
fn snf_rank_matches_rational_elimination() {
    type Q = Ratio<i64>;

    let mut rng = StdRng::seed_from_u64(5);

    // rank over Z equals rank over Q; recompute the latter by Gaussian
    // elimination, independent of the SNF reduction.
    for _ in 0..20 {
        let m = rng.gen_range(1..6);
        let n = rng.gen_range(1..6);
        let a = rand_mat(&mut rng, (m, n));

        let rank = snf(&a, &ctl()).rank();

        let qa: Mat<Q> = Mat::from_data((m, n), (0..m * n).map(|k|
            Q::from_numer(a[(k / n, k % n)])
        ));
        let e = row_echelon(&qa, true);
        let pivots = (0..e.nrows()).filter(|&i|
            (0..e.ncols()).any(|j| !e[(i, j)].is_zero())
        ).count();

        assert_eq!(rank, pivots);
    }
}

#[test]
fn snf_transforms_unimodular() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..10 {
        let m = rng.gen_range(1..5);
        let n = rng.gen_range(1..5);
        let a = rand_mat(&mut rng, (m, n));

        let res = snf(&a, &ctl());

        // both transforms invert over Z.
        let pinv = snf_inverse(res.p(), &ctl());
        let qinv = snf_inverse(res.q(), &ctl());

        assert!((res.p() * &pinv).is_id());
        assert!((res.q() * &qinv).is_id());
    }
}

#[test]
fn homology_matches_snf_factors() {
    let mut rng = StdRng::seed_from_u64(23);

    // complexes 0 <-- Z^m <-- Z^l: the summand is determined by the
    // factors of d_kp1 alone.
    for _ in 0..20 {
        let m = rng.gen_range(1..6);
        let l = rng.gen_range(1..6);

        let d_k: Mat<i64> = Mat::zero((0, m));
        let d_kp1 = rand_mat(&mut rng, (m, l));

        let h = homology_generators(&d_k, &d_kp1, false, &ctl());

        let s = snf(&d_kp1, &ctl());
        let tors: Vec<i64> = s.factors().into_iter()
            .filter(|d| !d.is_unit())
            .cloned()
            .collect();

        assert_eq!(h.rank(), m - s.rank());
        assert_eq!(h.tors(), &tors);
        assert_eq!(h.num_gens(), m - s.rank() + tors.len());
    }
}

#[test]
fn cohomology_rank_matches() {
    let mut rng = StdRng::seed_from_u64(99);

    // universal coefficients over Z: free ranks of H_k and H^k agree
    // for complexes with d_k = 0.
    for _ in 0..10 {
        let m = rng.gen_range(1..5);
        let l = rng.gen_range(1..5);

        let d_k: Mat<i64> = Mat::zero((0, m));
        let d_kp1 = rand_mat(&mut rng, (m, l));

        let h = homology_generators(&d_k, &d_kp1, false, &ctl());
        let ch = homology_generators(&d_k, &d_kp1, true, &ctl());

        assert_eq!(h.rank(), ch.rank());
    }
}

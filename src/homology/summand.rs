use std::fmt::Display;
use itertools::Itertools;
use crate::{Ring, RingOps};

/// A finitely generated module presented by explicit generating vectors,
/// torsion generators first. `gens[i]` for `i < num_tors()` generates a
/// cyclic summand of order `tors[i]`; the remaining vectors are free.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomologySummand<R>
where R: Ring, for<'a> &'a R: RingOps<R> {
    gens: Vec<Vec<R>>,
    tors: Vec<R>
}

impl<R> HomologySummand<R>
where R: Ring, for<'a> &'a R: RingOps<R> {
    pub fn new(gens: Vec<Vec<R>>, tors: Vec<R>) -> Self {
        assert!(tors.len() <= gens.len());
        Self { gens, tors }
    }

    pub fn trivial() -> Self {
        Self::new(vec![], vec![])
    }

    pub fn num_gens(&self) -> usize {
        self.gens.len()
    }

    pub fn num_tors(&self) -> usize {
        self.tors.len()
    }

    /// The free rank.
    pub fn rank(&self) -> usize {
        self.gens.len() - self.tors.len()
    }

    pub fn gens(&self) -> &[Vec<R>] {
        &self.gens
    }

    pub fn gen_vec(&self, i: usize) -> &[R] {
        &self.gens[i]
    }

    pub fn tors(&self) -> &[R] {
        &self.tors
    }

    pub fn is_trivial(&self) -> bool {
        self.gens.is_empty()
    }

    pub fn is_free(&self) -> bool {
        self.tors.is_empty()
    }

    pub fn math_symbol(&self) -> String {
        let symbol = R::math_symbol();
        let rank = self.rank();

        if rank == 0 && self.tors.is_empty() {
            return "0".to_string()
        }

        let mut res = vec![];

        if rank == 1 {
            res.push(symbol.clone());
        } else if rank > 1 {
            res.push(format!("{symbol}^{rank}"));
        }

        let tors_acc = self.tors.iter().counts_by(|t| t.to_string());
        for (t, r) in tors_acc.iter().sorted() {
            if *r > 1 {
                res.push(format!("({symbol}/{t})^{r}"));
            } else {
                res.push(format!("({symbol}/{t})"));
            }
        }

        res.iter().join(" ⊕ ")
    }
}

impl<R> Display for HomologySummand<R>
where R: Ring, for<'a> &'a R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.math_symbol())
    }
}

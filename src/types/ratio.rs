use std::fmt::{Display, Debug};
use std::ops::{Add, Sub, Neg, AddAssign, SubAssign, Mul, MulAssign, Div, DivAssign, Rem, RemAssign};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;
use crate::{EucRing, EucRingOps, Elem, Mon, AddMon, AddGrp, AddMonOps, AddGrpOps, MonOps, RingOps, Ring, FieldOps, Field};

/// The field of fractions of a Euclidean domain `T`, kept in reduced form.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Ratio<T> {
    numer: T,
    denom: T,
}

pub type Rational = Ratio<i64>;

impl<T> Ratio<T> {
    #[inline]
    const fn new_raw(numer: T, denom: T) -> Ratio<T> {
        Ratio { numer, denom }
    }

    #[inline]
    pub const fn numer(&self) -> &T {
        &self.numer
    }

    #[inline]
    pub const fn denom(&self) -> &T {
        &self.denom
    }
}

impl<T> Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    #[inline]
    pub fn new(numer: T, denom: T) -> Ratio<T> {
        assert!(!denom.is_zero());

        let mut ret = Ratio::new_raw(numer, denom);
        ret.reduce();
        ret
    }

    fn reduce(&mut self) {
        if self.numer.is_zero() {
            if !self.denom.is_one() {
                self.denom.set_one();
            }
            return;
        }

        let u = self.denom.normalizing_unit();

        if !u.is_one() {
            self.numer *= &u;
            self.denom *= &u;
        }

        if self.denom.is_one() || self.numer.is_unit() {
            return
        }

        let g = EucRing::gcd(&self.numer, &self.denom); // normalized

        if !g.is_one() {
            self.numer /= &g;
            self.denom /= &g;
        }
    }
}

impl<T> Ratio<T>
where T: One {
    pub fn from_numer(a: T) -> Self {
        Self::new_raw(a, T::one())
    }
}

impl<T> Ratio<T>
where T: One + PartialEq {
    pub fn is_numer(&self) -> bool {
        self.denom.is_one()
    }
}

impl<T> From<i32> for Ratio<T>
where T: One + From<i32> {
    fn from(i: i32) -> Self {
        Self::from_numer(T::from(i))
    }
}

impl<T> From<(T, T)> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn from(pair: (T, T)) -> Self {
        let (p, q) = pair;
        Self::new(p, q)
    }
}

impl<T> Default for Ratio<T>
where T: Default + One {
    fn default() -> Self {
        Self::from_numer(T::default())
    }
}

impl<T> Display for Ratio<T>
where T: Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt(f, self.numer.to_string(), self.denom.to_string())
    }
}

impl<T> Debug for Ratio<T>
where T: Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt(f, format!("{:?}", self.numer), format!("{:?}", self.denom))
    }
}

fn fmt(f: &mut std::fmt::Formatter<'_>, numer: String, denom: String) -> std::fmt::Result {
    fn par(s: String) -> String {
        if s.contains(' ') {
            format!("({s})")
        } else {
            s
        }
    }

    let p = par(numer);
    let q = par(denom);

    if &q == "1" {
        write!(f, "{}", p)
    } else {
        write!(f, "{}/{}", p, q)
    }
}

impl<T> Zero for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn zero() -> Self {
        Self::from_numer(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }
}

impl<T> One for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn one() -> Self {
        Self::from_numer(T::one())
    }

    fn is_one(&self) -> bool {
        self.numer == self.denom
    }
}

macro_rules! impl_add_assign_op {
    ($trait:ident, $method:ident) => {
        #[auto_ops]
        impl<T> $trait<&Ratio<T>> for Ratio<T>
        where T: EucRing, for<'x> &'x T: EucRingOps<T> {
            fn $method(&mut self, rhs: &Ratio<T>) {
                let (_, b) = (&self.numer, &self.denom);
                let (c, d) = ( &rhs.numer,  &rhs.denom);

                if rhs.is_zero() {
                    // do nothing
                } else if self.is_zero() {
                    self.numer.$method(c);  // 0 -> 0 ± c
                    self.denom = d.clone(); // 1 -> d
                } else if b == d {
                    self.numer.$method(c);  // a -> a ± c
                    self.reduce()
                } else {
                    let l = EucRing::lcm(b, d); // l = xb = yd
                    self.numer *= (&l / b);     // a -> xa ± yc
                    self.numer.$method((&l / d) * c);
                    self.denom = l;             // b -> l
                    self.reduce()
                }
            }
        }
    };
}

impl_add_assign_op!(AddAssign, add_assign);
impl_add_assign_op!(SubAssign, sub_assign);

impl<T> Neg for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Ratio::new(-&self.numer, self.denom)
    }
}

impl<T> Neg for &Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn neg(self) -> Self::Output {
        Ratio::new(-&self.numer, self.denom.clone())
    }
}

#[auto_ops]
impl<T> MulAssign<&Ratio<T>> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn mul_assign(&mut self, rhs: &Ratio<T>) {
        let (a, b) = (&self.numer, &self.denom);
        let (c, d) = ( &rhs.numer,  &rhs.denom);

        if self.is_zero() || rhs.is_one() {
            // do nothing
        } else if rhs.is_zero() {
            self.set_zero();             // a -> 0, b -> 1
        } else if rhs.is_numer() {
            let k = EucRing::gcd(b, c);  // b = kb', c = kc'
            self.numer *= c / &k;        // a -> a * c'
            self.denom /= &k;            // b -> b'
        } else if self.is_numer() {
            let k = EucRing::gcd(a, d);  // a = ka', d = kd'
            self.numer /= &k;            // a -> a' * c
            self.numer *= c;             //
            self.denom = d / &k;         // 1 ->      d'
        } else {
            let k = EucRing::gcd(a, d);  // a = ka', d = kd'
            let l = EucRing::gcd(b, c);  // b = lb', c = lc'
            self.numer /= &k;            // a -> a' * c'
            self.numer *= c / &l;        //
            self.denom /= &l;            // b -> b' * d'
            self.denom *= d / &k;        //
        }
    }
}

#[auto_ops]
impl<T> DivAssign<&Ratio<T>> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn div_assign(&mut self, rhs: &Ratio<T>) {
        assert!(!rhs.is_zero());
        *self *= rhs.inv().unwrap()
    }
}

#[auto_ops]
impl<'a, 'b, T> Rem<&'b Ratio<T>> for &'a Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn rem(self, rhs: &'b Ratio<T>) -> Self::Output {
        assert!(!rhs.is_zero());
        Ratio::zero() // Ratio<T> is a field.
    }
}

macro_rules! impl_alg_ops {
    ($trait:ident) => {
        impl<T> $trait for Ratio<T>
        where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

        impl<'a, T> $trait<Ratio<T>> for &'a Ratio<T>
        where T: EucRing, for<'x> &'x T: EucRingOps<T> {}
    };
}

impl_alg_ops!(AddMonOps);
impl_alg_ops!(AddGrpOps);
impl_alg_ops!(MonOps);
impl_alg_ops!(RingOps);
impl_alg_ops!(EucRingOps);
impl_alg_ops!(FieldOps);

impl<T> Elem for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn math_symbol() -> String {
        format!("Frac({})", T::math_symbol())
    }
}

impl<T> AddMon for Ratio<T> where T: EucRing, for<'x> &'x T: EucRingOps<T> {}
impl<T> AddGrp for Ratio<T> where T: EucRing, for<'x> &'x T: EucRingOps<T> {}
impl<T> Mon    for Ratio<T> where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> Ring for Ratio<T>
where T: EucRing + From<i32>, for<'x> &'x T: EucRingOps<T> {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self::new(self.denom.clone(), self.numer.clone()))
        }
    }

    fn is_unit(&self) -> bool {
        !self.is_zero()
    }

    fn normalizing_unit(&self) -> Self {
        if self.is_zero() {
            Self::one()
        } else {
            self.inv().unwrap()
        }
    }
}

impl<T> EucRing for Ratio<T> where T: EucRing + From<i32>, for<'x> &'x T: EucRingOps<T> {}
impl<T> Field   for Ratio<T> where T: EucRing + From<i32>, for<'x> &'x T: EucRingOps<T> {}

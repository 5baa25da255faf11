use std::cmp::Ordering;
use std::fmt::{Debug, Error, Formatter};
use std::ops::{Add, AddAssign};

pub(super) type C = u32;

/// Every cost in the look-ahead is a multiple of 1/12.
const DENUM: C = 12;

/// Fraction with a fixed denominator.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(super) struct Frac(C);

impl Debug for Frac {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let (i, a) = (self.0 / DENUM, self.0 % DENUM);
        if a == 0 {
            f.write_fmt(format_args!("{}", i))
        } else if i == 0 {
            f.write_fmt(format_args!("{}/{}", a, DENUM))
        } else {
            f.write_fmt(format_args!("{} + {}/{}", i, a, DENUM))
        }
    }
}

impl Frac {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(num: C, denum: C) -> Self {
        debug_assert!(denum > 0 && DENUM % denum == 0);
        Self(num * (DENUM / denum))
    }

    #[inline]
    pub fn ceil(self) -> Self {
        let rest = self.0 % DENUM;
        if rest != 0 {
            Self(self.0 + DENUM - rest)
        } else {
            self
        }
    }
}

impl AddAssign for Frac {
    fn add_assign(&mut self, rhs: Frac) {
        self.0 += rhs.0;
    }
}

impl Add<C> for Frac {
    type Output = Self;

    fn add(self, rhs: C) -> Self {
        Self(self.0 + rhs * DENUM)
    }
}

impl Add for Frac {
    type Output = Self;

    fn add(self, rhs: Frac) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl PartialOrd for Frac {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frac {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[test]
fn test_order() {
    assert!(Frac::new(0, 1) < Frac::new(1, 1));
    assert!(Frac::new(1, 2) > Frac::new(1, 3));
    assert!(Frac::new(3, 4) == Frac::new(9, 12));
}

#[test]
fn test_add() {
    assert_eq!(Frac::new(1, 2) + 1, Frac::new(3, 2));
    assert_eq!(Frac::new(1, 1) + 1, Frac::new(2, 1));
    assert_eq!(Frac::new(1, 1) + Frac::new(1, 2), Frac::new(3, 2));
    let mut a = Frac::new(2, 3);
    a += Frac::new(3, 4);
    assert_eq!(a, Frac::new(17, 12));
}

#[test]
fn test_ceil() {
    assert_eq!(Frac::new(1, 1).ceil(), Frac::new(1, 1));
    assert_eq!(Frac::new(13, 12).ceil(), Frac::new(2, 1));
    assert_eq!(Frac::ZERO.ceil(), Frac::ZERO);
}

#[test]
fn test_debug() {
    assert_eq!(format!("{:?}", Frac::new(4, 3)), "1 + 4/12");
    assert_eq!(format!("{:?}", Frac::new(3, 3)), "1");
    assert_eq!(format!("{:?}", Frac::new(3, 6)), "6/12");
}

use core::fmt;

use crate::fixed_point::Fixed;
use crate::format::{DefaultFormat, QFormat};

/// Real and imaginary parts. A placeholder: no complex arithmetic is
/// provided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Complex<Q: QFormat = DefaultFormat>(pub Fixed<Q>, pub Fixed<Q>);

impl<Q: QFormat> Complex<Q> {
    pub fn new(re: Fixed<Q>, im: Fixed<Q>) -> Self {
        Self(re, im)
    }

    pub fn re(self) -> Fixed<Q> {
        self.0
    }

    pub fn im(self) -> Fixed<Q> {
        self.1
    }
}

impl<Q: QFormat> fmt::Display for Complex<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.1.is_negative() {
            write!(f, "{} - {}i", self.0, -self.1)
        } else {
            write!(f, "{} + {}i", self.0, self.1)
        }
    }
}

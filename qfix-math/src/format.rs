//! Q-format selection.
//!
//! A format is a zero-sized marker type implementing [`QFormat`]. It fixes
//! the backing [`Storage`], the number of fractional bits and the overflow
//! policy in one place; every kernel and matrix routine is generic over it.

use core::fmt;
use core::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::storage::{Overflow, Storage};

/// Compile-time description of a Q format.
///
/// `FRAC_BITS + 1 < Storage::BITS` must hold so at least one sign bit and
/// one integer bit remain; the check fires when a `Fixed` of the format is
/// first built.
pub trait QFormat:
    Copy + Default + fmt::Debug + PartialEq + Eq + PartialOrd + Ord + Hash + Send + Sync + 'static
{
    type Storage: Storage;

    const FRAC_BITS: u32;

    const OVERFLOW: Overflow = Overflow::Wrap;

    /// Display name, e.g. `"Q15_16"`.
    const NAME: &'static str;
}

/// Declares a [`QFormat`] marker type.
///
/// ```
/// use qfix_math::{q_format, Fixed, Overflow};
///
/// q_format! {
///     /// Saturating Q9.6 on 16-bit storage.
///     pub struct Q9_6Sat(i16, 6, Overflow::Saturate);
/// }
///
/// let x = Fixed::<Q9_6Sat>::from_float(1.5);
/// assert_eq!(x.raw(), 96);
/// ```
#[macro_export]
macro_rules! q_format {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident($storage:ty, $frac:expr $(, $overflow:expr)?);
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $name;

        impl $crate::QFormat for $name {
            type Storage = $storage;
            const FRAC_BITS: u32 = $frac;
            $(const OVERFLOW: $crate::Overflow = $overflow;)?
            const NAME: &'static str = stringify!($name);
        }
    };
}

q_format! {
    /// 8-bit storage, 4 fractional bits. Too narrow for trigonometry.
    pub struct Q3_4(i8, 4);
}

q_format! {
    /// 16-bit storage, 8 fractional bits.
    pub struct Q7_8(i16, 8);
}

q_format! {
    /// 32-bit storage, 10 fractional bits: wide range, coarse resolution.
    pub struct Q21_10(i32, 10);
}

q_format! {
    /// 32-bit storage, 16 fractional bits. The default format.
    pub struct Q15_16(i32, 16);
}

q_format! {
    /// 64-bit storage, 32 fractional bits.
    pub struct Q31_32(i64, 32);
}

/// Format used when a matrix or alias does not name one.
pub type DefaultFormat = Q15_16;

/// Summary of a format's range and resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatInfo {
    pub name: String,
    pub storage_bits: u32,
    pub integer_bits: u32,
    pub fractional_bits: u32,
    pub resolution: f64,
    pub min: f64,
    pub max: f64,
    pub overflow: Overflow,
}

impl FormatInfo {
    pub fn of<Q: QFormat>() -> Self {
        let bits = <Q::Storage as Storage>::BITS;
        let frac = Q::FRAC_BITS;
        Self {
            name: Q::NAME.to_string(),
            storage_bits: bits,
            // Sign bit excluded.
            integer_bits: bits - frac - 1,
            fractional_bits: frac,
            resolution: (-(frac as f64)).exp2(),
            min: <Q::Storage as Storage>::MIN.to_f64_scaled(frac),
            max: <Q::Storage as Storage>::MAX.to_f64_scaled(frac),
            overflow: Q::OVERFLOW,
        }
    }
}

impl fmt::Display for FormatInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "format:     {} ({}-bit storage)", self.name, self.storage_bits)?;
        writeln!(f, "int bits:   {}", self.integer_bits)?;
        writeln!(f, "frac bits:  {}", self.fractional_bits)?;
        writeln!(f, "resolution: {:e}", self.resolution)?;
        writeln!(f, "min:        {}", self.min)?;
        writeln!(f, "max:        {}", self.max)?;
        write!(f, "overflow:   {:?}", self.overflow)
    }
}

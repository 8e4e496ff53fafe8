//! # Bitfield
//!
//! A compact, mutable set over a fixed enumeration of named flags, backed by
//! a single integer mask.
//!
//! A flag family is a fieldless enum implementing [`Flag`]. The family's
//! mapping (name → bit, in declared order) is a `'static` table shared by
//! every `Bitfield` of that family; each `Bitfield` only owns its mask.
//!
//! Bits that the family does not define are kept in the raw mask so that
//! re-encoding never loses information, but they are never reported as flags.

use crate::errors::BitfieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// A family of named flags.
///
/// `ALL` fixes the iteration order of every `Bitfield<Self>`: flags are
/// yielded in declared order, not in numeric order.
pub trait Flag: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every flag of the family, in declared order.
    const ALL: &'static [Self];

    /// Human-readable family name, used in diagnostics.
    const FAMILY: &'static str;

    /// The bit (or disjoint bit combination) this flag occupies.
    fn bit(self) -> u32;

    /// Wire name of the flag, e.g. `STAFF_PICK`.
    fn name(self) -> &'static str;

    /// Look a flag up by its wire name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|flag| flag.name() == name)
    }
}

/// Declare a flag family.
///
/// ```ignore
/// flag_family! {
///     /// Flags on a product.
///     pub enum ProductFlag("product") {
///         Trash = 1 << 0 => "TRASH",
///         StaffPick = 1 << 3 => "STAFF_PICK",
///     }
/// }
/// ```
#[macro_export]
macro_rules! flag_family {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($family:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $bit:expr => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $crate::bitfield::Flag for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const FAMILY: &'static str = $family;

            fn bit(self) -> u32 {
                match self {
                    $(Self::$variant => $bit,)+
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }
    };
}

/// A set of flags from family `F`, stored as one integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitfield<F: Flag> {
    bits: u32,
    family: PhantomData<F>,
}

impl<F: Flag> Bitfield<F> {
    /// Decode a raw wire integer.
    #[must_use]
    pub const fn new(bits: u32) -> Self {
        Self {
            bits,
            family: PhantomData,
        }
    }

    /// A bitfield with no bits set.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(0)
    }

    /// Build a bitfield from wire names.
    ///
    /// # Errors
    ///
    /// `BitfieldError::UnknownFlag` if a name is not part of `F`.
    pub fn from_names<'a, I>(names: I) -> Result<Self, BitfieldError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut field = Self::empty();
        for name in names {
            let flag = F::from_name(name).ok_or_else(|| BitfieldError::UnknownFlag {
                family: F::FAMILY,
                name: name.to_string(),
            })?;
            field.add(flag);
        }
        Ok(field)
    }

    /// Whether any bit of `flag` is set.
    #[must_use]
    pub fn has(&self, flag: F) -> bool {
        self.bits & flag.bit() != 0
    }

    pub fn add(&mut self, flag: F) {
        self.bits |= flag.bit();
    }

    pub fn remove(&mut self, flag: F) {
        self.bits &= !flag.bit();
    }

    pub fn toggle(&mut self, flag: F) {
        self.bits ^= flag.bit();
    }

    /// The raw mask, including bits unknown to `F`.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Set flags in declared order.
    pub fn iter(&self) -> Iter<F> {
        Iter {
            bits: self.bits,
            remaining: F::ALL.iter(),
        }
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<F> {
        self.iter().collect()
    }

    /// Number of known flags that are set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: Flag> Default for Bitfield<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: Flag> From<u32> for Bitfield<F> {
    fn from(bits: u32) -> Self {
        Self::new(bits)
    }
}

impl<F: Flag> FromIterator<F> for Bitfield<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut field = Self::empty();
        for flag in iter {
            field.add(flag);
        }
        field
    }
}

impl<F: Flag> Extend<F> for Bitfield<F> {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        for flag in iter {
            self.add(flag);
        }
    }
}

impl<'a, F: Flag> IntoIterator for &'a Bitfield<F> {
    type Item = F;
    type IntoIter = Iter<F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the set flags of a `Bitfield`, in declared order.
pub struct Iter<F: Flag> {
    bits: u32,
    remaining: std::slice::Iter<'static, F>,
}

impl<F: Flag> Iterator for Iter<F> {
    type Item = F;

    fn next(&mut self) -> Option<F> {
        let bits = self.bits;
        self.remaining
            .by_ref()
            .copied()
            .find(|flag| bits & flag.bit() != 0)
    }
}

impl<F: Flag> fmt::Display for Bitfield<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for flag in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(flag.name())?;
            first = false;
        }
        Ok(())
    }
}

impl<F: Flag> fmt::Debug for Bitfield<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitfield<{}>({:#x})[{}]", F::FAMILY, self.bits, self)
    }
}

impl<F: Flag> Serialize for Bitfield<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits)
    }
}

impl<'de, F: Flag> Deserialize<'de> for Bitfield<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Self::new)
    }
}

//! The prefix mask engine.
//!
//! A prefix mask keeps the top `prefix` bits of an address and clears the
//! rest. The computation is identical for both address families save for
//! the word width, so it is written once over a helper trait implemented
//! for the two canonical integer types.

pub trait PrefixBits: Copy {
    const WIDTH: u8;

    /// Returns the mask keeping the top `prefix` bits.
    ///
    /// The caller has to make sure that `prefix` does not exceed `WIDTH`.
    fn prefix_mask(prefix: u8) -> Self;
}

macro_rules! impl_prefix_bits {
    ($($t:ty)*) => ($(impl PrefixBits for $t {
        const WIDTH: u8 = <$t>::BITS as u8;

        fn prefix_mask(prefix: u8) -> Self {
            debug_assert!(prefix <= Self::WIDTH);
            // The shift formula below is undefined for a shift by the
            // full word width, so both boundary prefixes are handled
            // explicitly rather than derived from it.
            if prefix == 0 {
                0
            } else if prefix == Self::WIDTH {
                !0
            } else {
                !((1 << (Self::WIDTH - prefix)) - 1)
            }
        }
    })*)
}

impl_prefix_bits! { u32 u128 }

//============ Testing =======================================================

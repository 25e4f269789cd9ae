//! The `Canonical` trait: a uniform size/encode/decode surface.
//!
//! Every object family implements `size`, one of the five uniform
//! operations spec.md §4.2 requires (the others — parse/render/evaluate/
//! graph — live above this crate, closer to where a `Settings`/`Arena`
//! context is available). `Canonical` is deliberately narrower than that:
//! it is the mechanical "bytes in the arena ↔ Rust value" bridge that
//! `db48x-derive`'s `#[derive(Canonical)]` generates for payload structs.

use crate::error::Result;

/// Types whose in-arena byte representation can be measured, written, and
/// read back without any outside context (no settings, no directory, no
/// GC handle scope — those belong to `parse`/`render` above this crate).
pub trait Canonical: Sized {
    /// Number of bytes `encode` will write for this value.
    fn encoded_size(&self) -> usize;

    /// Append this value's canonical bytes to `out`.
    fn encode(&self, out: &mut impl Extend<u8>);

    /// Read a value from the front of `bytes`, returning it and the number
    /// of bytes consumed.
    fn decode(bytes: &[u8]) -> Result<(Self, usize)>;
}

impl Canonical for u8 {
    fn encoded_size(&self) -> usize {
        1
    }

    fn encode(&self, out: &mut impl Extend<u8>) {
        out.extend(core::iter::once(*self));
    }

    fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        bytes
            .first()
            .copied()
            .map(|b| (b, 1))
            .ok_or(crate::error::Error::BufferTooShort)
    }
}

impl Canonical for u64 {
    fn encoded_size(&self) -> usize {
        crate::leb128::size_u64(*self)
    }

    fn encode(&self, out: &mut impl Extend<u8>) {
        crate::leb128::write_u64(out, *self);
    }

    fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        crate::leb128::read_u64(bytes)
    }
}

impl Canonical for i64 {
    fn encoded_size(&self) -> usize {
        let zigzag = ((*self << 1) ^ (*self >> 63)) as u64;
        crate::leb128::size_u64(zigzag)
    }

    fn encode(&self, out: &mut impl Extend<u8>) {
        crate::leb128::write_i64(out, *self);
    }

    fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        crate::leb128::read_i64(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u64_round_trips() {
        let v: u64 = 123_456_789;
        let mut buf = Vec::new();
        v.encode(&mut buf);
        assert_eq!(buf.len(), v.encoded_size());
        assert_eq!(u64::decode(&buf), Ok((v, buf.len())));
    }
}

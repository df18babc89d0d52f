//! Fixed-size byte buffers used across the codebase.

use crate::macros::internal::impl_buf_common;

/// A 20-byte buffer, used for account-style identifiers.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Buf20(pub [u8; 20]);

impl_buf_common!(Buf20, 20);

/// A 32-byte buffer, used for hashes and roots.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Buf32(pub [u8; 32]);

impl_buf_common!(Buf32, 32);

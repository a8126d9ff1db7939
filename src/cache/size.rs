//! Byte Size Module
//!
//! Defines the capability every stored value must provide: its logical size.

use std::rc::Rc;
use std::sync::Arc;

// == Byte Size ==
/// Reports the logical size of a value in bytes.
///
/// This is the only requirement the store places on values. The reported
/// size is used for capacity accounting and does not need to match the
/// real heap footprint.
pub trait ByteSize {
    /// Returns the logical size in bytes.
    fn size(&self) -> usize;
}

impl ByteSize for str {
    fn size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for String {
    fn size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for [u8] {
    fn size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Box<T> {
    fn size(&self) -> usize {
        (**self).size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Rc<T> {
    fn size(&self) -> usize {
        (**self).size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Arc<T> {
    fn size(&self) -> usize {
        (**self).size()
    }
}

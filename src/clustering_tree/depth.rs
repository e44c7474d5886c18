use std::{fmt, cmp};


/// Struct `Depth` defines the depth of a node or the maximal depth of a tree.
/// This is just a wrapper for `usize`.
/// An unlimited tree is expressed by `Option::<Depth>::None`,
/// never by a special depth value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Depth(usize);


impl Depth {
    /// The depth of the root.
    pub const ROOT: Self = Self(0);


    /// Returns the depth of the children of a node at depth `self`.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}


impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}


impl From<usize> for Depth {
    fn from(depth: usize) -> Self {
        Self(depth)
    }
}


impl From<Depth> for usize {
    fn from(depth: Depth) -> Self {
        depth.0
    }
}


impl cmp::PartialEq<usize> for Depth {
    #[inline]
    fn eq(&self, rhs: &usize) -> bool {
        self.0.eq(rhs)
    }
}

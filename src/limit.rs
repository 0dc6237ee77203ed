//! Nesting limit for serialization.
//!
//! `serde` happily follows `Rc<RefCell<_>>` links, so a cyclic value recurses
//! until the stack overflows and takes the whole test binary with it.
//! [`DepthLimited`] wraps a value and its serializer so every nested value is
//! counted; past [`MAX_DEPTH`] serialization fails with an ordinary error.

use std::cell::Cell;

use serde::ser::{self, Error as _, Serialize, Serializer};

/// Deepest nesting accepted before a value is treated as cyclic.
pub const MAX_DEPTH: usize = 128;

/// A value serialized with a nesting limit.
pub struct DepthLimited<'a, T: ?Sized> {
    value: &'a T,
    depth: usize,
    tripped: &'a Cell<bool>,
}

impl<'a, T: ?Sized> DepthLimited<'a, T> {
    /// Wraps a top-level value. `tripped` is set when the limit is hit.
    pub fn new(value: &'a T, tripped: &'a Cell<bool>) -> Self {
        Self {
            value,
            depth: 0,
            tripped,
        }
    }
}

impl<T: ?Sized + Serialize> Serialize for DepthLimited<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.depth > MAX_DEPTH {
            self.tripped.set(true);
            return Err(S::Error::custom(format!(
                "value nests deeper than {} levels; is it cyclic?",
                MAX_DEPTH
            )));
        }
        self.value.serialize(LimitedSerializer {
            inner: serializer,
            depth: self.depth,
            tripped: self.tripped,
        })
    }
}

struct LimitedSerializer<'a, S> {
    inner: S,
    depth: usize,
    tripped: &'a Cell<bool>,
}

impl<'a, S> LimitedSerializer<'a, S> {
    fn child<'v, T: ?Sized>(&self, value: &'v T) -> DepthLimited<'v, T>
    where
        'a: 'v,
    {
        DepthLimited {
            value,
            depth: self.depth + 1,
            tripped: self.tripped,
        }
    }
}

macro_rules! forward_scalars {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<S::Ok, S::Error> {
                self.inner.$method(v)
            }
        )*
    };
}

impl<'a, S: Serializer> Serializer for LimitedSerializer<'a, S> {
    type Ok = S::Ok;
    type Error = S::Error;
    type SerializeSeq = Compound<'a, S::SerializeSeq>;
    type SerializeTuple = Compound<'a, S::SerializeTuple>;
    type SerializeTupleStruct = Compound<'a, S::SerializeTupleStruct>;
    type SerializeTupleVariant = Compound<'a, S::SerializeTupleVariant>;
    type SerializeMap = Compound<'a, S::SerializeMap>;
    type SerializeStruct = Compound<'a, S::SerializeStruct>;
    type SerializeStructVariant = Compound<'a, S::SerializeStructVariant>;

    forward_scalars! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_unit_struct(&'static str),
    }

    fn serialize_none(self) -> Result<S::Ok, S::Error> {
        self.inner.serialize_none()
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<S::Ok, S::Error> {
        let child = self.child(value);
        self.inner.serialize_some(&child)
    }

    fn serialize_unit(self) -> Result<S::Ok, S::Error> {
        self.inner.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        index: u32,
        variant: &'static str,
    ) -> Result<S::Ok, S::Error> {
        self.inner.serialize_unit_variant(name, index, variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<S::Ok, S::Error> {
        let child = self.child(value);
        self.inner.serialize_newtype_struct(name, &child)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<S::Ok, S::Error> {
        let child = self.child(value);
        self.inner
            .serialize_newtype_variant(name, index, variant, &child)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, S::Error> {
        let (depth, tripped) = (self.depth, self.tripped);
        let seq = self.inner.serialize_seq(len)?;
        Ok(Compound {
            inner: seq,
            depth,
            tripped,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, S::Error> {
        let (depth, tripped) = (self.depth, self.tripped);
        let tuple = self.inner.serialize_tuple(len)?;
        Ok(Compound {
            inner: tuple,
            depth,
            tripped,
        })
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, S::Error> {
        let (depth, tripped) = (self.depth, self.tripped);
        let tuple = self.inner.serialize_tuple_struct(name, len)?;
        Ok(Compound {
            inner: tuple,
            depth,
            tripped,
        })
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, S::Error> {
        let (depth, tripped) = (self.depth, self.tripped);
        let tuple = self
            .inner
            .serialize_tuple_variant(name, index, variant, len)?;
        Ok(Compound {
            inner: tuple,
            depth,
            tripped,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, S::Error> {
        let (depth, tripped) = (self.depth, self.tripped);
        let map = self.inner.serialize_map(len)?;
        Ok(Compound {
            inner: map,
            depth,
            tripped,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, S::Error> {
        let (depth, tripped) = (self.depth, self.tripped);
        let st = self.inner.serialize_struct(name, len)?;
        Ok(Compound {
            inner: st,
            depth,
            tripped,
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant, S::Error> {
        let (depth, tripped) = (self.depth, self.tripped);
        let st = self
            .inner
            .serialize_struct_variant(name, index, variant, len)?;
        Ok(Compound {
            inner: st,
            depth,
            tripped,
        })
    }

    fn is_human_readable(&self) -> bool {
        self.inner.is_human_readable()
    }
}

/// Compound state of the wrapped serializer; wraps each element it is fed.
struct Compound<'a, C> {
    inner: C,
    depth: usize,
    tripped: &'a Cell<bool>,
}

impl<C: ser::SerializeSeq> ser::SerializeSeq for Compound<'_, C> {
    type Ok = C::Ok;
    type Error = C::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), C::Error> {
        let child = DepthLimited {
            value,
            depth: self.depth + 1,
            tripped: self.tripped,
        };
        self.inner.serialize_element(&child)
    }

    fn end(self) -> Result<C::Ok, C::Error> {
        self.inner.end()
    }
}

impl<C: ser::SerializeTuple> ser::SerializeTuple for Compound<'_, C> {
    type Ok = C::Ok;
    type Error = C::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), C::Error> {
        let child = DepthLimited {
            value,
            depth: self.depth + 1,
            tripped: self.tripped,
        };
        self.inner.serialize_element(&child)
    }

    fn end(self) -> Result<C::Ok, C::Error> {
        self.inner.end()
    }
}

impl<C: ser::SerializeTupleStruct> ser::SerializeTupleStruct for Compound<'_, C> {
    type Ok = C::Ok;
    type Error = C::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), C::Error> {
        let child = DepthLimited {
            value,
            depth: self.depth + 1,
            tripped: self.tripped,
        };
        self.inner.serialize_field(&child)
    }

    fn end(self) -> Result<C::Ok, C::Error> {
        self.inner.end()
    }
}

impl<C: ser::SerializeTupleVariant> ser::SerializeTupleVariant for Compound<'_, C> {
    type Ok = C::Ok;
    type Error = C::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), C::Error> {
        let child = DepthLimited {
            value,
            depth: self.depth + 1,
            tripped: self.tripped,
        };
        self.inner.serialize_field(&child)
    }

    fn end(self) -> Result<C::Ok, C::Error> {
        self.inner.end()
    }
}

impl<C: ser::SerializeMap> ser::SerializeMap for Compound<'_, C> {
    type Ok = C::Ok;
    type Error = C::Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), C::Error> {
        let child = DepthLimited {
            value: key,
            depth: self.depth + 1,
            tripped: self.tripped,
        };
        self.inner.serialize_key(&child)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), C::Error> {
        let child = DepthLimited {
            value,
            depth: self.depth + 1,
            tripped: self.tripped,
        };
        self.inner.serialize_value(&child)
    }

    fn end(self) -> Result<C::Ok, C::Error> {
        self.inner.end()
    }
}

impl<C: ser::SerializeStruct> ser::SerializeStruct for Compound<'_, C> {
    type Ok = C::Ok;
    type Error = C::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), C::Error> {
        let child = DepthLimited {
            value,
            depth: self.depth + 1,
            tripped: self.tripped,
        };
        self.inner.serialize_field(key, &child)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), C::Error> {
        self.inner.skip_field(key)
    }

    fn end(self) -> Result<C::Ok, C::Error> {
        self.inner.end()
    }
}

impl<C: ser::SerializeStructVariant> ser::SerializeStructVariant for Compound<'_, C> {
    type Ok = C::Ok;
    type Error = C::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), C::Error> {
        let child = DepthLimited {
            value,
            depth: self.depth + 1,
            tripped: self.tripped,
        };
        self.inner.serialize_field(key, &child)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), C::Error> {
        self.inner.skip_field(key)
    }

    fn end(self) -> Result<C::Ok, C::Error> {
        self.inner.end()
    }
}

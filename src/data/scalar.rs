//! Scalar type tags for heavy-data buffers.
//!
//! A `ScalarType` is the semantic element type a [`DataBuffer`](super::DataBuffer)
//! is bound with. On the wire it is rendered as the XDMF `NumberType` /
//! `Precision` property pair.

use serde::{Deserialize, Serialize};

/// Scalar element type of a heavy-data array.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ScalarType {
    /// Signed 8-bit integer (`Char`).
    I8,
    /// Signed 16-bit integer (`Short`).
    I16,
    /// Signed 32-bit integer (`Int`, precision 4).
    I32,
    /// Signed 64-bit integer (`Int`, precision 8).
    I64,
    /// Unsigned 8-bit integer (`UChar`).
    U8,
    /// Unsigned 16-bit integer (`UShort`).
    U16,
    /// Unsigned 32-bit integer (`UInt`, precision 4).
    U32,
    /// Unsigned 64-bit integer (`UInt`, precision 8).
    U64,
    /// 32-bit float (`Float`, precision 4).
    F32,
    /// 64-bit float (`Float`, precision 8).
    F64,
}

impl ScalarType {
    /// Every scalar type, in declaration order.
    pub const ALL: [ScalarType; 10] = [
        ScalarType::I8,
        ScalarType::I16,
        ScalarType::I32,
        ScalarType::I64,
        ScalarType::U8,
        ScalarType::U16,
        ScalarType::U32,
        ScalarType::U64,
        ScalarType::F32,
        ScalarType::F64,
    ];

    /// Returns a stable string label for the scalar type.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
        }
    }

    /// Size of one element in bytes.
    pub fn size_in_bytes(self) -> usize {
        match self {
            ScalarType::I8 | ScalarType::U8 => 1,
            ScalarType::I16 | ScalarType::U16 => 2,
            ScalarType::I32 | ScalarType::U32 | ScalarType::F32 => 4,
            ScalarType::I64 | ScalarType::U64 | ScalarType::F64 => 8,
        }
    }

    /// XDMF `NumberType` name.
    pub fn number_type(self) -> &'static str {
        match self {
            ScalarType::I8 => "Char",
            ScalarType::I16 => "Short",
            ScalarType::I32 | ScalarType::I64 => "Int",
            ScalarType::U8 => "UChar",
            ScalarType::U16 => "UShort",
            ScalarType::U32 | ScalarType::U64 => "UInt",
            ScalarType::F32 | ScalarType::F64 => "Float",
        }
    }

    /// XDMF `Precision`, the element size as a decimal string.
    pub fn precision(self) -> String {
        self.size_in_bytes().to_string()
    }

    /// Parse an XDMF `NumberType` / `Precision` pair.
    ///
    /// Names are matched case-insensitively. A missing precision falls back to
    /// the XDMF default for the number type (1 for chars, 2 for shorts, 4
    /// otherwise).
    pub fn from_xdmf(number_type: &str, precision: Option<&str>) -> Option<Self> {
        let precision = match precision {
            Some(raw) => Some(raw.trim().parse::<usize>().ok()?),
            None => None,
        };
        let scalar = match number_type.trim().to_ascii_uppercase().as_str() {
            "CHAR" => ScalarType::I8,
            "UCHAR" => ScalarType::U8,
            "SHORT" => ScalarType::I16,
            "USHORT" => ScalarType::U16,
            "INT" => match precision.unwrap_or(4) {
                1 => ScalarType::I8,
                2 => ScalarType::I16,
                4 => ScalarType::I32,
                8 => ScalarType::I64,
                _ => return None,
            },
            "UINT" => match precision.unwrap_or(4) {
                1 => ScalarType::U8,
                2 => ScalarType::U16,
                4 => ScalarType::U32,
                8 => ScalarType::U64,
                _ => return None,
            },
            "FLOAT" => match precision.unwrap_or(4) {
                4 => ScalarType::F32,
                8 => ScalarType::F64,
                _ => return None,
            },
            _ => return None,
        };
        match precision {
            Some(bytes) if bytes != scalar.size_in_bytes() => None,
            _ => Some(scalar),
        }
    }
}

/// Maps a Rust element type to its scalar tag for typed buffer access.
pub trait Scalar: bytemuck::Pod {
    /// Scalar type tag for this concrete type.
    const SCALAR_TYPE: ScalarType;
}

macro_rules! impl_scalar {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(impl Scalar for $ty {
            const SCALAR_TYPE: ScalarType = ScalarType::$tag;
        })*
    };
}

impl_scalar! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

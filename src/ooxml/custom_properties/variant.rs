//! The File Properties Variant Type catalogue.
//!
//! Each variant kind is declared exactly once in the table at the bottom of
//! this file. The table generates the kind tag ([`VariantKind`]), the typed
//! payload ([`Variant`]), both element spellings and the text codec, so the
//! names used for writing and the names accepted when reading can never
//! disagree.
//!
//! The element spelling depends on the [`Dialect`]:
//!
//! | Dialect  | Writes       | Reads                              |
//! |----------|--------------|------------------------------------|
//! | `Emit`   | `<vt:i4>`    | `<vt:i4>` only                     |
//! | `Accept` | `<i4>`       | `<vt:i4>`, `<i4>` or `<x:i4>`      |
//!
//! Producers frequently declare the variant namespace as the default
//! namespace and drop the prefix, so input is always read with
//! [`Dialect::Accept`] while output is always written with [`Dialect::Emit`].

use super::constants::VT_PREFIX;
use std::borrow::Cow;

/// Spelling of variant element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Canonical output form, always carrying the `vt:` prefix.
    Emit,
    /// Tolerant input form: the prefix is optional and not checked.
    Accept,
}

impl Dialect {
    /// Element name for `kind` in this dialect.
    #[inline]
    pub const fn element_name(self, kind: VariantKind) -> &'static str {
        match self {
            Dialect::Emit => kind.qualified_name(),
            Dialect::Accept => kind.local_name(),
        }
    }

    /// Resolve a raw (possibly prefixed) element name to a variant kind.
    ///
    /// Returns `None` for names outside the catalogue, and in the `Emit`
    /// dialect for names that are not bound to the `vt` prefix.
    pub fn resolve(self, qname: &[u8]) -> Option<VariantKind> {
        let name = std::str::from_utf8(qname).ok()?;
        let local = match self {
            Dialect::Emit => {
                let (prefix, local) = name.split_once(':')?;
                if prefix != VT_PREFIX {
                    return None;
                }
                local
            },
            Dialect::Accept => name.rsplit_once(':').map_or(name, |(_, local)| local),
        };
        VariantKind::from_local_name(local)
    }
}

/// Text codec for a variant payload type.
///
/// `from_text` returns `None` when the text is not a valid lexical form,
/// which the caller turns into a malformed slot rather than an error.
trait VariantText: Sized {
    fn from_text(text: &str) -> Option<Self>;
    fn to_text(&self) -> Cow<'_, str>;
}

macro_rules! integer_text {
    ($($t:ty),* $(,)?) => {
        $(
            impl VariantText for $t {
                #[inline]
                fn from_text(text: &str) -> Option<Self> {
                    atoi_simd::parse::<$t>(text.trim().as_bytes()).ok()
                }

                #[inline]
                fn to_text(&self) -> Cow<'_, str> {
                    Cow::Owned(itoa::Buffer::new().format(*self).to_owned())
                }
            }
        )*
    };
}

integer_text!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! float_text {
    ($($t:ty),* $(,)?) => {
        $(
            impl VariantText for $t {
                fn from_text(text: &str) -> Option<Self> {
                    // xsd:float spells infinity as INF, which fast-float2 accepts case-insensitively
                    fast_float2::parse::<$t, _>(text.trim()).ok()
                }

                fn to_text(&self) -> Cow<'_, str> {
                    if self.is_nan() {
                        Cow::Borrowed("NaN")
                    } else if self.is_infinite() {
                        Cow::Borrowed(if self.is_sign_negative() { "-INF" } else { "INF" })
                    } else {
                        Cow::Owned(ryu::Buffer::new().format_finite(*self).to_owned())
                    }
                }
            }
        )*
    };
}

float_text!(f32, f64);

impl VariantText for bool {
    fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") || text == "1" {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") || text == "0" {
            Some(false)
        } else {
            None
        }
    }

    #[inline]
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

impl VariantText for String {
    #[inline]
    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }

    #[inline]
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

macro_rules! variant_catalogue {
    ($( $(#[$doc:meta])* $kind:ident($ty:ty) => $local:literal, )*) => {
        /// Tag naming one entry of the variant type catalogue.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum VariantKind {
            $( $(#[$doc])* $kind, )*
        }

        /// A variant value: exactly one catalogue entry with its payload.
        ///
        /// Structural kinds (vectors, blobs, storages and the like) keep the
        /// text content of their element so they can be written back in place.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Variant {
            $( $(#[$doc])* $kind($ty), )*
        }

        impl VariantKind {
            /// Every kind, in catalogue order.
            pub const ALL: &'static [VariantKind] = &[$(VariantKind::$kind,)*];

            /// Element name without a namespace prefix, e.g. `i4`.
            pub const fn local_name(self) -> &'static str {
                match self {
                    $(VariantKind::$kind => $local,)*
                }
            }

            /// Element name with the `vt:` prefix, e.g. `vt:i4`.
            pub const fn qualified_name(self) -> &'static str {
                match self {
                    $(VariantKind::$kind => concat!("vt:", $local),)*
                }
            }

            /// Look a kind up by its unprefixed element name.
            pub fn from_local_name(name: &str) -> Option<Self> {
                match name {
                    $($local => Some(VariantKind::$kind),)*
                    _ => None,
                }
            }
        }

        impl Variant {
            /// The catalogue entry this value belongs to.
            pub const fn kind(&self) -> VariantKind {
                match self {
                    $(Variant::$kind(_) => VariantKind::$kind,)*
                }
            }

            /// Lexical form written as element text.
            pub fn text(&self) -> Cow<'_, str> {
                match self {
                    $(Variant::$kind(v) => VariantText::to_text(v),)*
                }
            }

            /// Parse element text as a value of `kind`.
            ///
            /// Returns `None` if the text is not a valid lexical form for
            /// the kind's payload type.
            pub fn parse(kind: VariantKind, text: &str) -> Option<Self> {
                match kind {
                    $(VariantKind::$kind => <$ty as VariantText>::from_text(text).map(Variant::$kind),)*
                }
            }
        }
    };
}

variant_catalogue! {
    /// Counted vector of variants (`vt:vector`)
    Vector(String) => "vector",
    /// Array of variants (`vt:array`)
    Array(String) => "array",
    /// Binary blob, base64 text
    Blob(String) => "blob",
    /// Binary blob object, base64 text
    OBlob(String) => "oblob",
    /// Empty placeholder
    Empty(String) => "empty",
    /// Null placeholder
    Null(String) => "null",
    /// 1-byte signed integer
    I1(i8) => "i1",
    /// 2-byte signed integer
    I2(i16) => "i2",
    /// 4-byte signed integer
    I4(i32) => "i4",
    /// 8-byte signed integer
    I8(i64) => "i8",
    /// Platform-width signed integer, carried as 64 bits
    Int(i64) => "int",
    /// 1-byte unsigned integer
    UI1(u8) => "ui1",
    /// 2-byte unsigned integer
    UI2(u16) => "ui2",
    /// 4-byte unsigned integer
    UI4(u32) => "ui4",
    /// 8-byte unsigned integer
    UI8(u64) => "ui8",
    /// Platform-width unsigned integer, carried as 64 bits
    UInt(u64) => "uint",
    /// 4-byte real
    R4(f32) => "r4",
    /// 8-byte real
    R8(f64) => "r8",
    /// Decimal, kept as text
    Decimal(String) => "decimal",
    /// ANSI string
    LpStr(String) => "lpstr",
    /// Unicode string
    LpwStr(String) => "lpwstr",
    /// Basic string
    BStr(String) => "bstr",
    /// Date and time, xsd:dateTime text
    Date(String) => "date",
    /// FILETIME, xsd:dateTime text
    FileTime(String) => "filetime",
    /// Boolean
    Bool(bool) => "bool",
    /// Currency, kept as text
    Cy(String) => "cy",
    /// Error status code, kept as text
    Error(String) => "error",
    /// Binary stream, base64 text
    Stream(String) => "stream",
    /// Binary stream object, base64 text
    OStream(String) => "ostream",
    /// Binary storage, base64 text
    Storage(String) => "storage",
    /// Binary storage object, base64 text
    OStorage(String) => "ostorage",
    /// Binary versioned stream, base64 text
    VStream(String) => "vstream",
    /// Class ID (GUID)
    ClsId(String) => "clsid",
}

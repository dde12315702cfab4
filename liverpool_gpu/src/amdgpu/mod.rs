//! Console GPU register vocabulary
//!
//! Types decoded from the hardware surface descriptors: texture resource
//! descriptors (generic images), color render-target registers and depth
//! render-target registers. Parsing the raw command stream into these types
//! is done upstream; each enum still decodes from its raw register value.

/// Declares a register-encoded enum with a fallible decoder from the raw field value.
macro_rules! register_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $name {
            /// Raw register field value
            pub fn raw(self) -> u32 {
                self as u32
            }
        }

        impl TryFrom<u32> for $name {
            type Error = crate::error::Error;

            fn try_from(raw: u32) -> crate::error::Result<Self> {
                match raw {
                    $( $value => Ok($name::$variant), )+
                    _ => Err(crate::error::Error::InvalidDescriptor(format!(
                        "unknown {} value {}",
                        stringify!($name),
                        raw
                    ))),
                }
            }
        }
    };
}

pub mod pixel_format;
pub mod resource;
pub mod render_target;
pub mod source;

pub use pixel_format::*;
pub use resource::*;
pub use render_target::*;
pub use source::*;

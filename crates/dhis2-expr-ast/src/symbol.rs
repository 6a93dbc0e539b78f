//! Static symbol tables for closed option domains
//!
//! Each domain is declared once as `Variant = "symbol"` pairs. The same table
//! backs decoding (`from_symbol`), rendering (`symbol`, `Display`) and the
//! option listing of [`ExprError::invalid_option`](dhis2_expr_diagnostics::ExprError::invalid_option).

macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $symbol:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// All options in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// All symbols in declaration order
            pub const SYMBOLS: &'static [&'static str] = &[$($symbol),+];

            /// The source text symbol of this option
            pub const fn symbol(&self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol,)+
                }
            }

            /// Decode a source text symbol, listing all options on failure
            pub fn from_symbol(raw: &str) -> ::dhis2_expr_diagnostics::Result<Self> {
                match raw {
                    $($symbol => Ok(Self::$variant),)+
                    _ => Err(::dhis2_expr_diagnostics::ExprError::invalid_option(
                        stringify!($name),
                        raw,
                        Self::SYMBOLS,
                    )),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.symbol())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::dhis2_expr_diagnostics::ExprError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::from_symbol(s)
            }
        }
    };
}

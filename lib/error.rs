//! Provides `ErrMsg`, a trait to associate a constant message and a short
//! source tag with a fieldless error type, and `mkerr`, a macro to declare such
//! a type together with a `Result` alias.
//!
//! Errors that need to carry data (e.g. file names) should use [`thiserror`]
//! instead; see [`config::ConfigError`][crate::config].

/// Associates a constant message and the name of the module it came from with
/// an error type.
pub trait ErrMsg {
    /// Short name of the originating computation, e.g. `"euler"`.
    fn tag(&self) -> &'static str;

    fn msg(&self) -> &'static str;
}

/// Declare a fieldless error enum with a constant message per variant, a
/// module tag used as a prefix in `Display`, and a matching `Result` alias.
///
/// ```
/// scratchpad::mkerr!(
///     /// Things that can go wrong.
///     DemoError("demo") -> DemoResult : {
///         /// Too big.
///         TooBig => "value too big",
///     }
/// );
///
/// let res: DemoResult<()> = Err(DemoError::TooBig);
/// assert_eq!(res.unwrap_err().to_string(), "demo: value too big");
/// ```
#[macro_export]
macro_rules! mkerr {
    (
        $( #[$meta:meta] )*
        $name:ident ( $tag:literal ) -> $res:ident : {
            $( $( #[$vmeta:meta] )* $var:ident => $msg:literal ),+ $(,)?
        }
    ) => {
        $( #[$meta] )*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $( #[$vmeta] )* $var, )+
        }

        impl $crate::error::ErrMsg for $name {
            fn tag(&self) -> &'static str { $tag }

            fn msg(&self) -> &'static str {
                return match *self {
                    $( $name::$var => $msg, )+
                };
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                use $crate::error::ErrMsg;
                return write!(f, "{}: {}", self.tag(), self.msg());
            }
        }

        impl std::error::Error for $name { }

        pub type $res<T> = Result<T, $name>;
    }
}

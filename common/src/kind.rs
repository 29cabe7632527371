//! Macros for defining kind enums.

/// Macro for defining a kind enum, represented as a `SCREAMING_SNAKE_CASE`
/// string both in [`Display`]/[`FromStr`] and in Serde.
///
/// The first listed variant is the [`Default`] one.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube,
///
///         #[doc = "A sphere"]
///         Sphere,
///     }
/// }
///
/// assert_eq!(Kind::default(), Kind::Cube);
/// assert_eq!(Kind::Sphere.to_string(), "SPHERE");
/// assert_eq!("CUBE".parse::<Kind>(), Ok(Kind::Cube));
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            #[doc = $default_doc:literal]
            $default:ident
            $(,
                #[doc = $variant_doc:literal]
                $variant:ident
            )* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[derive(
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        #[doc = $doc]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            #[doc = $default_doc]
            #[default]
            $default,
            $(
                #[doc = $variant_doc]
                $variant,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[
                Self::$default,
                $( Self::$variant, )*
            ];
        }
    };
}

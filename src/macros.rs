/// Declares a `String`-backed identifier with `new`, `as_str` and the usual
/// conversions. Extra attributes (serde derives, docs) are passed through.
#[macro_export]
macro_rules! string_newtype {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::derive_more::Display,
            ::derive_more::Deref,
            ::derive_more::From,
            ::derive_more::Into,
            ::derive_more::AsRef,
        )]
        $vis struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::string_newtype! {
        /// Test identifier.
        struct Slug;
    }

    #[test]
    fn test_string_newtype_conversions() {
        let slug = Slug::new("japji");
        assert_eq!(slug.as_str(), "japji");
        assert_eq!(slug.to_string(), "japji");
        assert_eq!(Slug::from("japji"), slug);
        assert_eq!(slug.len(), 5);

        let inner: String = slug.into();
        assert_eq!(inner, "japji");
    }
}

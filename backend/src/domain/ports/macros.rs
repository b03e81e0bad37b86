//! Helper macro generating port error enums with snake-case constructors.
//!
//! Every variant carries named fields; each gets a constructor named after
//! the variant in snake case that accepts `impl Into<_>` for every field.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor and message coverage for generated port errors.
    use rstest::rstest;

    define_port_error! {
        /// Errors raised by a hypothetical inventory port.
        pub enum InventoryPortError {
            Unavailable { message: String } => "inventory unavailable: {message}",
            Shortfall { quantity: i64 } => "short by {quantity} units",
            Rejected { sku: String, quantity: i64 } => "rejected {sku} x{quantity}",
        }
    }

    #[rstest]
    fn constructors_accept_str_for_string_fields() {
        let err = InventoryPortError::unavailable("timeout");
        assert_eq!(err.to_string(), "inventory unavailable: timeout");
    }

    #[rstest]
    fn constructors_preserve_non_string_types() {
        let err = InventoryPortError::shortfall(3_i64);
        assert_eq!(err, InventoryPortError::Shortfall { quantity: 3 });
        assert_eq!(err.to_string(), "short by 3 units");
    }

    #[rstest]
    fn constructors_support_mixed_fields() {
        let err = InventoryPortError::rejected("PEN-01", 10_i64);
        assert_eq!(err.to_string(), "rejected PEN-01 x10");
    }
}

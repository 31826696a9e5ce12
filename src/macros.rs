//! Mutation accessor macros
//!
//! These macros eliminate repetitive match code on [`Mutation`](crate::Mutation).
//! They use `paste` internally for identifier concatenation.

/// Generate `is_xxx(&self) -> bool` predicates for each mutation variant.
///
/// # Example
/// ```ignore
/// impl_mutation_predicates!(Create, RemoveDeleteTree);
/// // Expands to: pub fn is_create(&self) -> bool { ... }
/// //             pub fn is_remove_delete_tree(&self) -> bool { ... }
/// ```
#[macro_export]
macro_rules! impl_mutation_predicates {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a `" $variant "` mutation"]
                #[inline]
                pub fn [<is_ $variant:snake>](&self) -> bool {
                    matches!(self, Self::$variant { .. })
                }
            )*
        }
    };
}

/// Generate a `kind(&self) -> MutationKind` method mapping each variant of
/// `Mutation` to the same-named `MutationKind`.
#[macro_export]
macro_rules! impl_mutation_kind {
    ($kind:ident, $($variant:ident),* $(,)?) => {
        /// The kind of this mutation
        #[inline]
        pub fn kind(&self) -> $kind {
            match self {
                $(Self::$variant { .. } => $kind::$variant,)*
            }
        }
    };
}

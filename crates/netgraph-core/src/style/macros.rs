//! Declarative generation of per-shape style structs.

/// Declare a shape's style struct and generate its accessors.
///
/// For every `field, setter: Type => "key"` entry this generates:
/// - the private field, deserialized under the camelCase `key`,
/// - a getter `field()` and a setter `setter(patch)` that merges according
///   to the type's [`StyleValue`](crate::style::StyleValue) schema and returns
///   the stored value,
/// - an entry in `KEYS` and in the by-name `get` / `apply` dispatch,
/// - a line in `apply_patch`, which reads the same-named field of the kind's
///   patch struct.
///
/// `Default` must be implemented by hand; it supplies the shape's defaults.
macro_rules! shape_style {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($shape:literal) patched by $patch:ty {
            $(
                $(#[$field_meta:meta])*
                $field:ident, $setter:ident: $ty:ty => $key:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
        #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                $field: $ty,
            )*
        }

        impl $name {
            /// Shape tag name.
            pub const SHAPE: &'static str = $shape;

            /// Style keys declared by this shape, in declaration order.
            pub const KEYS: &'static [&'static str] = &[$($key),*];

            $(
                $(#[$field_meta])*
                pub fn $field(&self) -> $ty {
                    self.$field
                }

                #[doc = concat!("Merge a patch into `", $key, "` and return the stored value.")]
                pub fn $setter(
                    &mut self,
                    patch: impl Into<<$ty as crate::style::StyleValue>::Patch>,
                ) -> $ty {
                    crate::style::StyleValue::merge(&mut self.$field, patch.into());
                    self.$field
                }
            )*

            /// Read a style key by name.
            pub fn get(&self, key: &str) -> Option<crate::style::Value> {
                match key {
                    $($key => Some(crate::style::StyleValue::to_value(self.$field)),)*
                    _ => None,
                }
            }

            /// Merge a dynamically typed value into a style key by name.
            pub fn apply(
                &mut self,
                key: &str,
                value: crate::style::ValuePatch,
            ) -> Result<crate::style::Value, crate::style::StyleError> {
                match key {
                    $(
                        $key => {
                            let patch = value.coerce::<$ty>(key)?;
                            Ok(crate::style::StyleValue::to_value(self.$setter(patch)))
                        }
                    )*
                    _ => Err(crate::style::StyleError::UnknownKey {
                        shape: Self::SHAPE,
                        key: key.to_string(),
                    }),
                }
            }

            pub(crate) fn apply_patch(&mut self, patch: &$patch) {
                $(
                    if let Some(value) = patch.$field.clone() {
                        crate::style::StyleValue::merge(&mut self.$field, value);
                    }
                )*
            }
        }
    };
}

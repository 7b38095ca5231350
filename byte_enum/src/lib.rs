extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

/// Derive `TryFrom<u8>` and a `VARIANT_COUNT` constant for a
/// field-less `#[repr(u8)]` enum.
///
/// Decoding an out-of-range byte yields `Err(byte)` instead of panicking,
/// so callers decide how a bad byte is reported.
#[proc_macro_derive(ByteEnum)]
pub fn byte_enum(input: TokenStream) -> TokenStream {
  let ast: DeriveInput = syn::parse(input).unwrap();
  let name = &ast.ident;

  let variants: Vec<_> = match &ast.data {
    syn::Data::Enum(e) => e.variants.iter().map(|v| v.ident.clone()).collect(),
    _ => panic!("ByteEnum can only be used with enums"),
  };
  let count = variants.len();

  let gen = quote! {
      impl #name {
          pub const VARIANT_COUNT: usize = #count;
      }

      impl ::std::convert::TryFrom<u8> for #name {
          type Error = u8;

          fn try_from(value: u8) -> Result<Self, u8> {
              match value {
                  #(
                      x if x == #name::#variants as u8 => Ok(#name::#variants),
                  )*
                  _ => Err(value),
              }
          }
      }
  };

  gen.into()
}

mod form;

use proc_macro::TokenStream;

/// Creates a `XForm` struct for the model `X`, holding every field a client may submit.
///
/// Fields with `#[serde(skip_deserializing)]` or `#[serde(skip)]` are left out, all
/// other fields are copied verbatim (including attributes). The model's derives are
/// forwarded to the form, and `From<&X>` is implemented so an existing row can
/// pre-fill the form.
#[proc_macro_attribute]
pub fn form(_args: TokenStream, input: TokenStream) -> TokenStream {
	form::from_input(input)
}

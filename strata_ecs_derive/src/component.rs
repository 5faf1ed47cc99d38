use proc_macro::TokenStream;
use syn::DeriveInput;
use quote::quote;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let gen = quote! {
        impl #impl_generics strata_ecs::components::Component for #name #ty_generics #where_clause {
            const NAME: &'static str = #name_str;
        }
    };
    gen.into()
}

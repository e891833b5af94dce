use typed_builder::TypedBuilder;

/// Configures a [`ShortLinkStore`](crate::ShortLinkStore).
#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreSettings {
    /// Base URL that short codes are appended to, e.g. `https://lnk.box/s`.
    #[builder(setter(into))]
    pub public_base_url: String,
    /// Start with an empty store instead of failing when the backing data
    /// cannot be parsed. Every existing link is lost when this kicks in.
    #[builder(default = false)]
    pub recover_corrupt: bool,
}
